//! Client-side validation.
//!
//! Validation runs before any request is sent; a failure carries a message that
//! can be shown to the user as-is.

pub mod error;
pub mod forms;
pub mod rules;

pub use error::*;
pub use forms::*;
pub use rules::*;
