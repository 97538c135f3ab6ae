//! User feedback: the [`Notifier`] seam and display formatting.

pub mod format;
pub mod notifier;

pub use format::*;
pub use notifier::*;
