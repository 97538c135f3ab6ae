//! # Controllers
//!
//! One controller per screen concern. Every public operation follows the same
//! shape: show the spinner, validate, call the backend, update the shared
//! state, toast the outcome and hide the spinner again, on success and on
//! failure alike. Errors are toasted *and* returned to the caller.
//!
//! Deletes ask for confirmation first; declining returns `Ok(false)` and
//! touches nothing.

pub mod auth;
pub mod error;
pub mod producto;
pub mod usuario;
pub mod vendedor;
pub mod venta;

pub use auth::AuthController;
pub use error::*;
pub use producto::ProductoController;
pub use usuario::UsuarioController;
pub use vendedor::VendedorController;
pub use venta::VentaController;

use std::future::Future;
use std::sync::Arc;

use crate::api::ApiService;
use crate::state::StateClient;
use crate::ui::{MessageKind, Notifier};

/// Collaborators shared by every controller.
#[derive(Clone)]
pub struct Context {
    pub api: ApiService,
    pub state: StateClient,
    pub ui: Arc<dyn Notifier>,
}

impl Context {
    pub fn new(api: ApiService, state: StateClient, ui: Arc<dyn Notifier>) -> Self {
        Self { api, state, ui }
    }

    pub(crate) fn success(&self, text: &str) {
        self.ui.show_message(text, MessageKind::Success);
    }
}

/// Runs `op`, toasting `"{error_prefix}: {error}"` if it fails.
pub(crate) async fn reported<T, F>(
    ui: &dyn Notifier,
    error_prefix: &str,
    op: F,
) -> Result<T, ControllerError>
where
    F: Future<Output = Result<T, ControllerError>>,
{
    let result = op.await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, "{error_prefix}");
        ui.show_message(&format!("{error_prefix}: {e}"), MessageKind::Error);
    }
    result
}

/// [`reported`] with the spinner shown for the whole operation.
pub(crate) async fn guarded<T, F>(
    ui: &dyn Notifier,
    error_prefix: &str,
    op: F,
) -> Result<T, ControllerError>
where
    F: Future<Output = Result<T, ControllerError>>,
{
    ui.show_spinner(true);
    let result = reported(ui, error_prefix, op).await;
    ui.show_spinner(false);
    result
}
