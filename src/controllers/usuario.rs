use serde_json::Value;
use tracing::{info, instrument};

use super::{guarded, Context, ControllerError};
use crate::model::{Usuario, UsuarioForm};
use crate::validators::validate_usuario;

/// Admin-panel account management. Accounts are not cached in the state.
#[derive(Clone)]
pub struct UsuarioController {
    ctx: Context,
}

impl UsuarioController {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn obtener_usuarios(&self) -> Result<Vec<Usuario>, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error obteniendo usuarios", async {
            Ok(self.ctx.api.obtener_usuarios().await?)
        })
        .await
    }

    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn crear_usuario(&self, form: &UsuarioForm) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_usuario(form, true)?;
            let response = self.ctx.api.crear_usuario(form).await?;
            self.ctx.success("Usuario creado exitosamente");
            Ok(response)
        })
        .await
    }

    /// A blank password keeps the current one.
    #[instrument(skip(self, form))]
    pub async fn actualizar_usuario(
        &self,
        id: i64,
        form: &UsuarioForm,
    ) -> Result<Value, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error", async {
            validate_usuario(form, false)?;
            let response = self.ctx.api.actualizar_usuario(id, form).await?;
            self.ctx.success("Usuario actualizado exitosamente");
            Ok(response)
        })
        .await
    }

    /// Returns `Ok(false)` when the user declines the confirmation.
    #[instrument(skip(self))]
    pub async fn eliminar_usuario(&self, id: i64) -> Result<bool, ControllerError> {
        if !self
            .ctx
            .ui
            .confirm("¿Estás seguro de que deseas eliminar este usuario?")
            .await
        {
            info!(id, "Eliminación cancelada");
            return Ok(false);
        }

        guarded(self.ctx.ui.as_ref(), "Error", async {
            self.ctx.api.eliminar_usuario(id).await?;
            self.ctx.success("Usuario eliminado exitosamente");
            Ok(true)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::harness;
    use serde_json::json;

    #[tokio::test]
    async fn test_actualizar_usuario_omits_blank_password() {
        let h = harness();
        h.mock.expect_put("/usuarios/2").return_ok(json!({"status": 200, "data": null}));
        let controller = UsuarioController::new(h.ctx.clone());

        let form = UsuarioForm {
            username: "ana".into(),
            password: String::new(),
            rol: "vendedor".into(),
        };
        controller.actualizar_usuario(2, &form).await.unwrap();

        let sent = h.mock.requests()[0].body.clone().unwrap();
        assert_eq!(sent, json!({"username": "ana", "rol": "vendedor"}));
    }

    #[tokio::test]
    async fn test_crear_usuario_requires_password() {
        let h = harness();
        let controller = UsuarioController::new(h.ctx.clone());

        let form = UsuarioForm {
            username: "ana".into(),
            password: String::new(),
            rol: "vendedor".into(),
        };
        assert!(controller.crear_usuario(&form).await.is_err());
        assert!(h.mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_obtener_usuarios() {
        let h = harness();
        h.mock.expect_get("/usuarios").return_ok(json!({
            "status": 200,
            "data": [{"id": 1, "username": "admin", "rol": "admin"}]
        }));
        let controller = UsuarioController::new(h.ctx.clone());

        let usuarios = controller.obtener_usuarios().await.unwrap();
        assert_eq!(usuarios[0].username, "admin");
    }
}
