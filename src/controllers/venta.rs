use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{guarded, reported, Context, ControllerError};
use crate::model::{
    Cliente, DatosIniciales, Estadisticas, Producto, ProductoItem, Vendedor, Venta,
    VentaRegistrada, VentaUpdate,
};
use crate::state::{StateError, VentaEdit};
use crate::validators::{validate_venta, validate_venta_update, ValidationError};

/// Order form and sales dashboard.
#[derive(Clone)]
pub struct VentaController {
    ctx: Context,
}

impl VentaController {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Loads products, sellers and their customers into the state.
    #[instrument(skip(self))]
    pub async fn cargar_datos(&self) -> Result<DatosIniciales, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error cargando datos", async {
            let datos = self.ctx.api.obtener_datos().await?;
            self.ctx.state.cargar_datos(datos.clone()).await?;
            info!(
                productos = datos.productos.len(),
                vendedores = datos.vendedores.len(),
                "Datos iniciales cargados"
            );
            Ok(datos)
        })
        .await
    }

    /// Validates and submits `venta`.
    #[instrument(skip(self, venta))]
    pub async fn crear_venta(&self, venta: &Venta) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", self.submit(venta)).await
    }

    async fn submit(&self, venta: &Venta) -> Result<Value, ControllerError> {
        debug!(?venta, "submit called");
        validate_venta(venta)?;
        let response = self.ctx.api.crear_venta(venta.to_json()).await?;
        info!(total = venta.total(), items = venta.items().len(), "Venta guardada");
        self.ctx.success("Venta guardada exitosamente");
        Ok(response)
    }

    /// Fetches every sale and caches the list.
    #[instrument(skip(self))]
    pub async fn obtener_ventas(&self) -> Result<Vec<VentaRegistrada>, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error obteniendo ventas", async {
            let ventas = self.ctx.api.obtener_ventas().await?;
            self.ctx.state.set_ventas(ventas.clone()).await?;
            info!(size = ventas.len(), "Ventas obtenidas");
            Ok(ventas)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn obtener_venta(&self, id: i64) -> Result<VentaRegistrada, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            Ok(self.ctx.api.obtener_venta(id).await?)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn obtener_estadisticas(&self) -> Result<Estadisticas, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error obteniendo estadísticas", async {
            Ok(self.ctx.api.obtener_estadisticas().await?)
        })
        .await
    }

    #[instrument(skip(self, update))]
    pub async fn actualizar_venta(
        &self,
        id: i64,
        update: &VentaUpdate,
    ) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_venta_update(update)?;
            let response = self.ctx.api.actualizar_venta(id, update).await?;
            info!(id, "Venta actualizada");
            self.ctx.success("Venta actualizada exitosamente");
            Ok(response)
        })
        .await
    }

    // --- Lookups over the loaded data ---

    pub async fn get_clientes_por_vendedor(
        &self,
        vendedor: &str,
    ) -> Result<Vec<Cliente>, ControllerError> {
        Ok(self.ctx.state.clientes(vendedor).await?)
    }

    pub async fn get_producto(&self, id: i64) -> Result<Option<Producto>, ControllerError> {
        let productos = self.ctx.state.productos().await?;
        Ok(productos.into_iter().find(|p| p.id == id))
    }

    pub async fn get_productos(&self) -> Result<Vec<Producto>, ControllerError> {
        Ok(self.ctx.state.productos().await?)
    }

    pub async fn get_vendedores(&self) -> Result<Vec<Vendedor>, ControllerError> {
        Ok(self.ctx.state.vendedores().await?)
    }

    // --- Order in progress ---

    /// Starts an empty order, replacing any order in progress.
    pub async fn nueva_venta(&self) -> Result<Venta, ControllerError> {
        Ok(self.ctx.state.crear_venta().await?)
    }

    /// Adds `cantidad` units of a loaded product to the order in progress.
    #[instrument(skip(self))]
    pub async fn agregar_producto(
        &self,
        product_id: i64,
        cantidad: u32,
    ) -> Result<Venta, ControllerError> {
        reported(self.ctx.ui.as_ref(), "Error", async {
            if cantidad == 0 {
                return Err(ValidationError::new("Cantidad", "Cantidad debe ser mayor a 0").into());
            }
            let producto = self
                .get_producto(product_id)
                .await?
                .ok_or(ControllerError::ProductoNoEncontrado(product_id))?;
            let item = ProductoItem::new(producto.id, producto.tipo_pizza, cantidad, producto.precio);
            Ok(self.ctx.state.editar_venta(VentaEdit::AgregarItem(item)).await?)
        })
        .await
    }

    /// Removes a line; out-of-range indexes leave the order as it was.
    pub async fn quitar_item(&self, index: usize) -> Result<Venta, ControllerError> {
        self.editar_venta(VentaEdit::EliminarItem(index)).await
    }

    pub async fn editar_venta(&self, edit: VentaEdit) -> Result<Venta, ControllerError> {
        Ok(self.ctx.state.editar_venta(edit).await?)
    }

    /// Submits the order in progress and clears it once the backend accepts it.
    #[instrument(skip(self))]
    pub async fn enviar_venta_actual(&self) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            let venta = self
                .ctx
                .state
                .venta_actual()
                .await?
                .ok_or(StateError::SinVentaActual)?;
            let response = self.submit(&venta).await?;
            self.ctx.state.limpiar_venta().await?;
            Ok(response)
        })
        .await
    }
}
