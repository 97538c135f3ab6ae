//! Error types for backend calls.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Error de conexión: {0}")]
    Network(String),

    /// Non-2xx response. `message` comes from the body when it has one.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// `401`: expired token or bad credentials. Any stored token has already
    /// been discarded. The message comes from the body when it has one.
    #[error("{0}")]
    Unauthorized(String),

    /// The body did not have the expected shape.
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}
