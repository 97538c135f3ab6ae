//! In-memory application state, owned by a single actor task.

pub mod actions;
pub mod actor;
mod app_state;
pub mod error;

pub use actions::*;
pub use actor::{StateActor, StateClient, StateRequest};
pub use app_state::*;
pub use error::*;

/// Creates the state actor and its client.
pub fn new() -> (StateActor, StateClient) {
    StateActor::new(32)
}
