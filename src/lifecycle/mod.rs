//! Session wiring and process-wide tracing setup.

pub mod session;
pub mod tracing;

pub use self::session::Session;
pub use self::tracing::setup_tracing;
