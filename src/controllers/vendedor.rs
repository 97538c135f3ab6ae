use serde_json::Value;
use tracing::{info, instrument};

use super::{guarded, Context, ControllerError};
use crate::model::{Vendedor, VendedorForm};
use crate::validators::validate_vendedor;

/// Seller administration. Every mutation reloads the list.
#[derive(Clone)]
pub struct VendedorController {
    ctx: Context,
}

impl VendedorController {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, form), fields(nombre = %form.nombre))]
    pub async fn crear_vendedor(&self, form: &VendedorForm) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_vendedor(form)?;
            let response = self.ctx.api.crear_vendedor(form).await?;
            self.ctx.success("Vendedor creado exitosamente");
            self.recargar().await?;
            Ok(response)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn obtener_vendedores(&self) -> Result<Vec<Vendedor>, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error obteniendo vendedores", self.recargar()).await
    }

    #[instrument(skip(self, form))]
    pub async fn actualizar_vendedor(
        &self,
        id: i64,
        form: &VendedorForm,
    ) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_vendedor(form)?;
            let response = self.ctx.api.actualizar_vendedor(id, form).await?;
            self.ctx.success("Vendedor actualizado exitosamente");
            self.recargar().await?;
            Ok(response)
        })
        .await
    }

    /// Returns `Ok(false)` when the user declines the confirmation.
    #[instrument(skip(self))]
    pub async fn eliminar_vendedor(&self, id: i64) -> Result<bool, ControllerError> {
        if !self
            .ctx
            .ui
            .confirm("¿Estás seguro de que deseas eliminar este vendedor?")
            .await
        {
            info!(id, "Eliminación cancelada");
            return Ok(false);
        }

        guarded(self.ctx.ui.as_ref(), "Error", async {
            self.ctx.api.eliminar_vendedor(id).await?;
            self.ctx.success("Vendedor eliminado exitosamente");
            self.recargar().await?;
            Ok(true)
        })
        .await
    }

    async fn recargar(&self) -> Result<Vec<Vendedor>, ControllerError> {
        let vendedores = self.ctx.api.obtener_vendedores().await?;
        self.ctx.state.set_vendedores(vendedores.clone()).await?;
        info!(size = vendedores.len(), "Vendedores recargados");
        Ok(vendedores)
    }
}
