use std::sync::Arc;

use tracing::{error, info};

use crate::api::{ApiError, ApiService, HttpTransport, SessionStorage, TokenStore, Transport};
use crate::config::{BackendUrl, Config};
use crate::controllers::{
    AuthController, Context, ProductoController, UsuarioController, VendedorController,
    VentaController,
};
use crate::state::StateClient;
use crate::ui::{Notifier, TracingNotifier};

/// One running client: the state actor plus the controllers wired to it.
///
/// `Session` is responsible for:
/// - **Lifecycle**: spawning the state actor and stopping it on [`shutdown`](Session::shutdown)
/// - **Wiring**: giving every controller the same [`ApiService`], [`StateClient`] and [`Notifier`]
///
/// # Example
///
/// ```ignore
/// let session = Session::from_config(&config, None)?;
///
/// session.auth.login("admin", "1234").await?;
/// session.ventas.cargar_datos().await?;
///
/// session.shutdown().await?;
/// ```
pub struct Session {
    pub ventas: VentaController,
    pub productos: ProductoController,
    pub vendedores: VendedorController,
    pub auth: AuthController,
    pub usuarios: UsuarioController,

    /// Direct handle to the state, for screens that only read it.
    pub state: StateClient,

    /// Task handle of the state actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl Session {
    /// Spawns the state actor and wires the controllers.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        ui: Arc<dyn Notifier>,
    ) -> Self {
        let base_url = base_url.into();
        info!(%base_url, "Starting session");

        let (state_actor, state) = crate::state::new();
        let handle = tokio::spawn(state_actor.run());

        let api = ApiService::new(base_url, transport, tokens);
        let ctx = Context::new(api, state.clone(), ui);

        Self {
            ventas: VentaController::new(ctx.clone()),
            productos: ProductoController::new(ctx.clone()),
            vendedores: VendedorController::new(ctx.clone()),
            auth: AuthController::new(ctx.clone()),
            usuarios: UsuarioController::new(ctx),
            state,
            handle,
        }
    }

    /// Production wiring: reqwest transport, in-memory session storage and
    /// log-only notifications.
    pub fn from_config(config: &Config, backend_url: Option<&str>) -> Result<Self, ApiError> {
        let BackendUrl { url, source } = config.backend_url(backend_url);
        info!(%url, %source, "Backend URL resolved");

        let transport = HttpTransport::new(config.request_timeout())?;
        Ok(Self::new(
            url,
            Arc::new(transport),
            Arc::new(SessionStorage::new()),
            Arc::new(TracingNotifier::new(config.confirm_deletes)),
        ))
    }

    /// Stops the state actor and waits for it to finish.
    ///
    /// Every handle to the state lives in this struct (the controllers' contexts
    /// included), so dropping them closes the actor's channel. Clones taken out
    /// of the session keep the actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down session...");

        drop(self.ventas);
        drop(self.productos);
        drop(self.vendedores);
        drop(self.auth);
        drop(self.usuarios);
        drop(self.state);

        if let Err(e) = self.handle.await {
            error!("State actor task failed: {:?}", e);
            return Err(format!("State actor task failed: {:?}", e));
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
