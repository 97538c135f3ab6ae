use tracing::{info, instrument};

use super::{guarded, Context, ControllerError};
use crate::model::{LoginForm, LoginResponse};
use crate::ui::MessageKind;
use crate::validators::validate_login;

#[derive(Clone)]
pub struct AuthController {
    ctx: Context,
}

impl AuthController {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Validates the credentials locally, then exchanges them for a token.
    ///
    /// A 2xx answer without a token is rejected with
    /// [`ControllerError::RespuestaInvalida`].
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ControllerError> {
        guarded(self.ctx.ui.as_ref(), "Error de login", async {
            let form = LoginForm::new(username, password);
            validate_login(&form)?;

            let response = self.ctx.api.login(&form).await?;
            if response.token.is_empty() {
                return Err(ControllerError::RespuestaInvalida);
            }
            info!(username, "Login ok");
            self.ctx.success("Login exitoso");
            Ok(response)
        })
        .await
    }

    pub fn logout(&self) {
        self.ctx.api.logout();
        self.ctx.ui.show_message("Sesión cerrada", MessageKind::Info);
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.api.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, TokenStore};
    use crate::controllers::test_support::harness;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_without_token_is_invalid() {
        let h = harness();
        h.mock.expect_post("/auth/login").return_ok(json!({"user": {"username": "admin"}}));
        let auth = AuthController::new(h.ctx.clone());

        let err = auth.login("admin", "1234").await.unwrap_err();
        assert_eq!(err, ControllerError::RespuestaInvalida);
        assert_eq!(
            h.ui.last_message(),
            Some((
                MessageKind::Error,
                "Error de login: Respuesta inválida del servidor".to_string()
            ))
        );
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_bad_credentials_keeps_backend_message() {
        let h = harness();
        h.tokens.set(Some("viejo".into()));
        h.mock
            .expect_post("/auth/login")
            .return_status(401, json!({"status": 401, "message": "Usuario o contraseña incorrectos"}));
        let auth = AuthController::new(h.ctx.clone());

        let err = auth.login("admin", "wrong").await.unwrap_err();
        assert_eq!(
            err,
            ControllerError::Api(ApiError::Unauthorized(
                "Usuario o contraseña incorrectos".to_string()
            ))
        );
        assert_eq!(
            h.ui.last_message(),
            Some((
                MessageKind::Error,
                "Error de login: Usuario o contraseña incorrectos".to_string()
            ))
        );
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_unauthorized_without_message_reads_as_expired_session() {
        let h = harness();
        h.mock.expect_post("/auth/login").return_status(401, serde_json::Value::Null);
        let auth = AuthController::new(h.ctx.clone());

        let err = auth.login("admin", "1234").await.unwrap_err();
        assert_eq!(err.to_string(), "Sesión expirada, volvé a iniciar sesión");
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let h = harness();
        h.tokens.set(Some("t".into()));
        let auth = AuthController::new(h.ctx.clone());
        assert!(auth.is_authenticated());

        auth.logout();
        assert!(!auth.is_authenticated());
        assert_eq!(
            h.ui.last_message(),
            Some((MessageKind::Info, "Sesión cerrada".to_string()))
        );
    }
}
