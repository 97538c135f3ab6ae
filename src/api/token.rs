use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Key the session token is stored under.
pub const TOKEN_KEY: &str = "authToken";

/// Where the bearer token survives between requests.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: Option<String>);

    fn clear(&self) {
        self.set(None);
    }
}

/// Per-session key/value storage, scoped to the running process.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    pub fn remove_item(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

impl TokenStore for SessionStorage {
    fn get(&self) -> Option<String> {
        self.get_item(TOKEN_KEY)
    }

    /// Empty tokens are treated as no token.
    fn set(&self, token: Option<String>) {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.set_item(TOKEN_KEY, &token),
            None => self.remove_item(TOKEN_KEY),
        }
    }
}
