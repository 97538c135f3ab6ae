//! Error types for the state actor.

use thiserror::Error;

/// Errors returned by [`StateClient`](super::StateClient).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    /// The actor task has stopped and no longer accepts requests.
    #[error("State actor closed")]
    ActorClosed,

    /// The actor dropped the response channel without answering.
    #[error("State actor dropped response channel")]
    ActorDropped,

    /// An order edit was requested but no order is in progress.
    #[error("No hay una venta en curso")]
    SinVentaActual,
}
