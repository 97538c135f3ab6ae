use serde::{Deserialize, Serialize};

/// An admin-panel account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub rol: String,
}

/// Credentials typed into the login form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user: Option<Usuario>,
}

/// Admin-form input for creating or editing an account.
///
/// On update an empty password keeps the current one and is left out of
/// the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsuarioForm {
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub rol: String,
}
