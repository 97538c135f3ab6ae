//! Backend access: the [`Transport`] seam, token storage and the typed
//! [`ApiService`].

pub mod error;
pub mod mock;
pub mod service;
pub mod token;
pub mod transport;

pub use error::*;
pub use mock::MockTransport;
pub use service::*;
pub use token::*;
pub use transport::*;
