use serde_json::Value;
use tracing::{info, instrument};

use super::{guarded, Context, ControllerError};
use crate::model::{Producto, ProductoForm};
use crate::validators::validate_producto;

/// Product administration. Every mutation reloads the catalogue.
#[derive(Clone)]
pub struct ProductoController {
    ctx: Context,
}

impl ProductoController {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, form), fields(tipo_pizza = %form.tipo_pizza))]
    pub async fn crear_producto(&self, form: &ProductoForm) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_producto(form)?;
            let payload = form.to_payload()?;
            let response = self.ctx.api.crear_producto(&payload).await?;
            self.ctx.success("Producto creado exitosamente");
            self.recargar().await?;
            Ok(response)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn obtener_productos(&self) -> Result<Vec<Producto>, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error obteniendo productos", self.recargar()).await
    }

    #[instrument(skip(self, form))]
    pub async fn actualizar_producto(
        &self,
        id: i64,
        form: &ProductoForm,
    ) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_producto(form)?;
            let payload = form.to_payload()?;
            let response = self.ctx.api.actualizar_producto(id, &payload).await?;
            self.ctx.success("Producto actualizado exitosamente");
            self.recargar().await?;
            Ok(response)
        })
        .await
    }

    /// Returns `Ok(false)` when the user declines the confirmation.
    #[instrument(skip(self))]
    pub async fn eliminar_producto(&self, id: i64) -> Result<bool, ControllerError> {
        if !self
            .ctx
            .ui
            .confirm("¿Estás seguro de que deseas eliminar este producto?")
            .await
        {
            info!(id, "Eliminación cancelada");
            return Ok(false);
        }

        guarded(self.ctx.ui.as_ref(), "Error", async {
            self.ctx.api.eliminar_producto(id).await?;
            self.ctx.success("Producto eliminado exitosamente");
            self.recargar().await?;
            Ok(true)
        })
        .await
    }

    async fn recargar(&self) -> Result<Vec<Producto>, ControllerError> {
        let productos = self.ctx.api.obtener_productos().await?;
        self.ctx.state.set_productos(productos.clone()).await?;
        info!(size = productos.len(), "Productos recargados");
        Ok(productos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::harness;
    use crate::ui::{MessageKind, UiEvent};
    use serde_json::json;

    fn form(tipo: &str, precio: &str) -> ProductoForm {
        ProductoForm {
            tipo_pizza: tipo.into(),
            precio: precio.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_crear_producto_reloads_catalogue() {
        let h = harness();
        h.mock.expect_post("/productos").return_status(201, json!({"status": 201, "data": {"id": 3}}));
        h.mock.expect_get("/productos").return_ok(json!({
            "status": 200,
            "data": [{"id": 3, "tipo_pizza": "Napolitana", "precio": 7200.0}]
        }));
        let controller = ProductoController::new(h.ctx.clone());

        controller.crear_producto(&form("Napolitana", "$7,200.00")).await.unwrap();

        let sent = h.mock.requests()[0].body.clone().unwrap();
        assert_eq!(sent["precio"], 7200.0);
        assert_eq!(h.state.productos().await.unwrap()[0].id, 3);
        assert!(h
            .ui
            .messages()
            .contains(&(MessageKind::Success, "Producto creado exitosamente".to_string())));
        assert!(h.ui.spinner_hidden());
        h.mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_producto_never_reaches_backend() {
        let h = harness();
        let controller = ProductoController::new(h.ctx.clone());

        let err = controller.crear_producto(&form("Muzza", "0")).await.unwrap_err();
        assert!(matches!(err, ControllerError::Validation(ref v) if v.field == "Precio"));
        assert!(h.mock.requests().is_empty());
        assert_eq!(h.ui.last_message().map(|(kind, _)| kind), Some(MessageKind::Error));
    }

    #[tokio::test]
    async fn test_eliminar_producto_declined() {
        let h = harness();
        h.ui.set_confirm_answer(false);
        let controller = ProductoController::new(h.ctx.clone());

        assert!(!controller.eliminar_producto(4).await.unwrap());
        assert!(h.mock.requests().is_empty());
        assert_eq!(
            h.ui.events(),
            vec![UiEvent::Confirm(
                "¿Estás seguro de que deseas eliminar este producto?".into()
            )]
        );
    }

    #[tokio::test]
    async fn test_eliminar_producto_confirmed() {
        let h = harness();
        h.mock.expect_delete("/productos/4").return_ok(json!({"status": 200, "data": null}));
        h.mock.expect_get("/productos").return_ok(json!([]));
        let controller = ProductoController::new(h.ctx.clone());

        assert!(controller.eliminar_producto(4).await.unwrap());
        assert!(h
            .ui
            .messages()
            .contains(&(MessageKind::Success, "Producto eliminado exitosamente".to_string())));
        h.mock.verify();
    }
}
