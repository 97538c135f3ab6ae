//! Typed access to the backend REST API.
//!
//! Every call goes through [`ApiService::request`], which attaches the stored
//! bearer token, drops it again on a `401`, turns non-2xx responses into
//! [`ApiError::Http`] and unwraps the `{status, data, message}` envelope.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{ApiError, ApiRequest, TokenStore, Transport};
use crate::model::{
    DatosIniciales, Estadisticas, LoginForm, LoginResponse, Producto, ProductoPayload, Usuario,
    UsuarioForm, Vendedor, VendedorForm, VentaRegistrada, VentaUpdate,
};

/// Shown for a `401` whose body carries no message.
const SESION_EXPIRADA: &str = "Sesión expirada, volvé a iniciar sesión";

#[derive(Clone)]
pub struct ApiService {
    base_url: String,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiService {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            tokens,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Sends one request and returns the unwrapped payload.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer: self.tokens.get(),
        };

        let response = self
            .transport
            .send(&self.base_url, request)
            .await
            .inspect_err(|e| warn!(path, error = %e, "Request failed"))?;

        if response.status == 401 {
            warn!(path, "Unauthorized, clearing session");
            self.tokens.clear();
            let message = body_message(&response.body)
                .unwrap_or_else(|| SESION_EXPIRADA.to_string());
            return Err(ApiError::Unauthorized(message));
        }

        if !response.is_success() {
            let message = error_message(&response.body, response.status);
            warn!(path, status = response.status, %message, "Backend error");
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        Ok(unwrap_envelope(response.body))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = self.request(method, path, body).await?;
        decode(value)
    }

    /// List endpoints answer `null` when empty.
    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let items: Option<Vec<T>> = self.call(Method::GET, path, None).await?;
        Ok(items.unwrap_or_default())
    }

    // --- Auth ---

    /// Stores the returned token when there is one.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .call(Method::POST, "/auth/login", Some(to_body(form)?))
            .await?;
        if !response.token.is_empty() {
            self.tokens.set(Some(response.token.clone()));
            info!("Session token stored");
        }
        Ok(response)
    }

    pub fn logout(&self) {
        self.tokens.clear();
        info!("Session token cleared");
    }

    // --- Data ---

    #[instrument(skip(self))]
    pub async fn obtener_datos(&self) -> Result<DatosIniciales, ApiError> {
        self.call(Method::GET, "/data", None).await
    }

    // --- Ventas ---

    #[instrument(skip(self, venta))]
    pub async fn crear_venta(&self, venta: Value) -> Result<Value, ApiError> {
        debug!(?venta, "crear_venta called");
        self.request(Method::POST, "/ventas", Some(venta)).await
    }

    #[instrument(skip(self))]
    pub async fn obtener_ventas(&self) -> Result<Vec<VentaRegistrada>, ApiError> {
        self.list("/estadisticas").await
    }

    #[instrument(skip(self))]
    pub async fn obtener_venta(&self, id: i64) -> Result<VentaRegistrada, ApiError> {
        self.call(Method::GET, &format!("/ventas/{id}"), None).await
    }

    #[instrument(skip(self, update))]
    pub async fn actualizar_venta(&self, id: i64, update: &VentaUpdate) -> Result<Value, ApiError> {
        debug!(?update, "actualizar_venta called");
        self.request(Method::PUT, &format!("/ventas/{id}"), Some(to_body(update)?))
            .await
    }

    #[instrument(skip(self))]
    pub async fn obtener_estadisticas(&self) -> Result<Estadisticas, ApiError> {
        self.call(Method::GET, "/estadisticas-sheet", None).await
    }

    // --- Productos ---

    #[instrument(skip(self))]
    pub async fn obtener_productos(&self) -> Result<Vec<Producto>, ApiError> {
        self.list("/productos").await
    }

    #[instrument(skip(self, producto))]
    pub async fn crear_producto(&self, producto: &ProductoPayload) -> Result<Value, ApiError> {
        self.request(Method::POST, "/productos", Some(to_body(producto)?))
            .await
    }

    #[instrument(skip(self, producto))]
    pub async fn actualizar_producto(
        &self,
        id: i64,
        producto: &ProductoPayload,
    ) -> Result<Value, ApiError> {
        self.request(Method::PUT, &format!("/productos/{id}"), Some(to_body(producto)?))
            .await
    }

    #[instrument(skip(self))]
    pub async fn eliminar_producto(&self, id: i64) -> Result<Value, ApiError> {
        self.request(Method::DELETE, &format!("/productos/{id}"), None)
            .await
    }

    // --- Vendedores ---

    #[instrument(skip(self))]
    pub async fn obtener_vendedores(&self) -> Result<Vec<Vendedor>, ApiError> {
        self.list("/vendedores").await
    }

    #[instrument(skip(self, vendedor))]
    pub async fn crear_vendedor(&self, vendedor: &VendedorForm) -> Result<Value, ApiError> {
        self.request(Method::POST, "/vendedores", Some(to_body(vendedor)?))
            .await
    }

    #[instrument(skip(self, vendedor))]
    pub async fn actualizar_vendedor(
        &self,
        id: i64,
        vendedor: &VendedorForm,
    ) -> Result<Value, ApiError> {
        self.request(Method::PUT, &format!("/vendedores/{id}"), Some(to_body(vendedor)?))
            .await
    }

    #[instrument(skip(self))]
    pub async fn eliminar_vendedor(&self, id: i64) -> Result<Value, ApiError> {
        self.request(Method::DELETE, &format!("/vendedores/{id}"), None)
            .await
    }

    // --- Usuarios ---

    #[instrument(skip(self))]
    pub async fn obtener_usuarios(&self) -> Result<Vec<Usuario>, ApiError> {
        self.list("/usuarios").await
    }

    #[instrument(skip(self, usuario))]
    pub async fn crear_usuario(&self, usuario: &UsuarioForm) -> Result<Value, ApiError> {
        self.request(Method::POST, "/usuarios", Some(to_body(usuario)?))
            .await
    }

    #[instrument(skip(self, usuario))]
    pub async fn actualizar_usuario(&self, id: i64, usuario: &UsuarioForm) -> Result<Value, ApiError> {
        self.request(Method::PUT, &format!("/usuarios/{id}"), Some(to_body(usuario)?))
            .await
    }

    #[instrument(skip(self))]
    pub async fn eliminar_usuario(&self, id: i64) -> Result<Value, ApiError> {
        self.request(Method::DELETE, &format!("/usuarios/{id}"), None)
            .await
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Returns `data` for `{status, data, message}` envelopes and the body itself otherwise.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map)
            if map.contains_key("data")
                && map.keys().all(|k| matches!(k.as_str(), "status" | "data" | "message")) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn body_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

fn error_message(body: &Value, status: u16) -> String {
    body_message(body).unwrap_or_else(|| format!("HTTP Error: {status}"))
}
