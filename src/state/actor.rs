//! # Application State Actor
//!
//! The screen state lives in a single [`StateActor`] task. Controllers talk to it
//! through a cloneable [`StateClient`], so there is exactly one owner of the
//! order in progress and the cached catalogues, and no locks around them.
//!
//! ## Key Types
//!
//! - [`StateRequest`]: Messages understood by the actor.
//! - [`StateActor`]: Owns the [`AppState`] and the receiving end of the channel.
//! - [`StateClient`]: Async handle used by the controllers.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::{AppState, StateError, VentaEdit};
use crate::model::{Cliente, DatosIniciales, Producto, Vendedor, Venta, VentaRegistrada};

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, StateError>>;

#[derive(Debug)]
pub enum StateRequest {
    CargarDatos {
        datos: DatosIniciales,
        respond_to: Response<()>,
    },
    CrearVenta {
        respond_to: Response<Venta>,
    },
    EditarVenta {
        edit: VentaEdit,
        respond_to: Response<Venta>,
    },
    LimpiarVenta {
        respond_to: Response<()>,
    },
    SetVentas {
        ventas: Vec<VentaRegistrada>,
        respond_to: Response<()>,
    },
    SetProductos {
        productos: Vec<Producto>,
        respond_to: Response<()>,
    },
    SetVendedores {
        vendedores: Vec<Vendedor>,
        respond_to: Response<()>,
    },
    VentaActual {
        respond_to: Response<Option<Venta>>,
    },
    Productos {
        respond_to: Response<Vec<Producto>>,
    },
    Vendedores {
        respond_to: Response<Vec<Vendedor>>,
    },
    Clientes {
        vendedor: String,
        respond_to: Response<Vec<Cliente>>,
    },
    Ventas {
        respond_to: Response<Vec<VentaRegistrada>>,
    },
    Snapshot {
        respond_to: Response<AppState>,
    },
}

/// Sequentially applies [`StateRequest`]s to the owned [`AppState`].
pub struct StateActor {
    receiver: mpsc::Receiver<StateRequest>,
    state: AppState,
}

impl StateActor {
    pub fn new(buffer_size: usize) -> (Self, StateClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: AppState::default(),
        };
        (actor, StateClient::new(sender))
    }

    /// Runs until every [`StateClient`] has been dropped.
    pub async fn run(mut self) {
        info!("State actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }

        info!(
            productos = self.state.productos.len(),
            ventas = self.state.ventas_listado.len(),
            "State actor shutdown"
        );
    }

    fn handle(&mut self, msg: StateRequest) {
        let state = &mut self.state;
        match msg {
            StateRequest::CargarDatos { datos, respond_to } => {
                state.cargar_datos(datos);
                info!(
                    productos = state.productos.len(),
                    vendedores = state.vendedores.len(),
                    "Datos cargados"
                );
                let _ = respond_to.send(Ok(()));
            }
            StateRequest::CrearVenta { respond_to } => {
                let venta = state.crear_venta().clone();
                debug!("Venta creada");
                let _ = respond_to.send(Ok(venta));
            }
            StateRequest::EditarVenta { edit, respond_to } => {
                debug!(?edit, "EditarVenta");
                let result = match state.venta_actual.as_mut() {
                    Some(venta) => {
                        venta.apply(edit);
                        Ok(venta.clone())
                    }
                    None => {
                        warn!("Edit without a venta in progress");
                        Err(StateError::SinVentaActual)
                    }
                };
                let _ = respond_to.send(result);
            }
            StateRequest::LimpiarVenta { respond_to } => {
                state.limpiar_venta();
                debug!("Venta limpiada");
                let _ = respond_to.send(Ok(()));
            }
            StateRequest::SetVentas { ventas, respond_to } => {
                state.set_ventas(ventas);
                debug!(size = state.ventas_listado.len(), "SetVentas");
                let _ = respond_to.send(Ok(()));
            }
            StateRequest::SetProductos { productos, respond_to } => {
                state.productos = productos;
                debug!(size = state.productos.len(), "SetProductos");
                let _ = respond_to.send(Ok(()));
            }
            StateRequest::SetVendedores { vendedores, respond_to } => {
                state.vendedores = vendedores;
                debug!(size = state.vendedores.len(), "SetVendedores");
                let _ = respond_to.send(Ok(()));
            }
            StateRequest::VentaActual { respond_to } => {
                let _ = respond_to.send(Ok(state.venta_actual.clone()));
            }
            StateRequest::Productos { respond_to } => {
                let _ = respond_to.send(Ok(state.productos.clone()));
            }
            StateRequest::Vendedores { respond_to } => {
                let _ = respond_to.send(Ok(state.vendedores.clone()));
            }
            StateRequest::Clientes { vendedor, respond_to } => {
                let _ = respond_to.send(Ok(state.clientes_de(&vendedor).to_vec()));
            }
            StateRequest::Ventas { respond_to } => {
                let _ = respond_to.send(Ok(state.ventas_listado.clone()));
            }
            StateRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(state.clone()));
            }
        }
    }
}

/// Cloneable handle to the [`StateActor`].
#[derive(Clone)]
pub struct StateClient {
    sender: mpsc::Sender<StateRequest>,
}

impl StateClient {
    pub fn new(sender: mpsc::Sender<StateRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> StateRequest,
    ) -> Result<T, StateError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StateError::ActorClosed)?;
        response.await.map_err(|_| StateError::ActorDropped)?
    }

    pub async fn cargar_datos(&self, datos: DatosIniciales) -> Result<(), StateError> {
        self.request(|respond_to| StateRequest::CargarDatos { datos, respond_to })
            .await
    }

    /// Starts a fresh order and returns it.
    pub async fn crear_venta(&self) -> Result<Venta, StateError> {
        self.request(|respond_to| StateRequest::CrearVenta { respond_to })
            .await
    }

    /// Applies `edit` to the order in progress and returns the result.
    ///
    /// Fails with [`StateError::SinVentaActual`] when no order was started.
    pub async fn editar_venta(&self, edit: VentaEdit) -> Result<Venta, StateError> {
        self.request(|respond_to| StateRequest::EditarVenta { edit, respond_to })
            .await
    }

    pub async fn limpiar_venta(&self) -> Result<(), StateError> {
        self.request(|respond_to| StateRequest::LimpiarVenta { respond_to })
            .await
    }

    pub async fn set_ventas(&self, ventas: Vec<VentaRegistrada>) -> Result<(), StateError> {
        self.request(|respond_to| StateRequest::SetVentas { ventas, respond_to })
            .await
    }

    pub async fn set_productos(&self, productos: Vec<Producto>) -> Result<(), StateError> {
        self.request(|respond_to| StateRequest::SetProductos { productos, respond_to })
            .await
    }

    pub async fn set_vendedores(&self, vendedores: Vec<Vendedor>) -> Result<(), StateError> {
        self.request(|respond_to| StateRequest::SetVendedores { vendedores, respond_to })
            .await
    }

    pub async fn venta_actual(&self) -> Result<Option<Venta>, StateError> {
        self.request(|respond_to| StateRequest::VentaActual { respond_to })
            .await
    }

    pub async fn productos(&self) -> Result<Vec<Producto>, StateError> {
        self.request(|respond_to| StateRequest::Productos { respond_to })
            .await
    }

    pub async fn vendedores(&self) -> Result<Vec<Vendedor>, StateError> {
        self.request(|respond_to| StateRequest::Vendedores { respond_to })
            .await
    }

    pub async fn clientes(&self, vendedor: &str) -> Result<Vec<Cliente>, StateError> {
        let vendedor = vendedor.to_string();
        self.request(|respond_to| StateRequest::Clientes { vendedor, respond_to })
            .await
    }

    pub async fn ventas(&self) -> Result<Vec<VentaRegistrada>, StateError> {
        self.request(|respond_to| StateRequest::Ventas { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<AppState, StateError> {
        self.request(|respond_to| StateRequest::Snapshot { respond_to })
            .await
    }
}
