//! Error types for controller operations.

use thiserror::Error;

use crate::api::ApiError;
use crate::state::StateError;
use crate::validators::ValidationError;

/// Everything a controller operation can fail with.
///
/// The `Display` text is what ends up in the error toast, so the wrapped
/// variants are transparent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    State(#[from] StateError),

    /// The backend answered 2xx but without the data the operation needs.
    #[error("Respuesta inválida del servidor")]
    RespuestaInvalida,

    #[error("Producto no encontrado: {0}")]
    ProductoNoEncontrado(i64),
}
