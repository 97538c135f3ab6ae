//! Runtime settings: a TOML file overlaid with environment variables.
//!
//! ```toml
//! backend_url = "https://pizzas.example.com/api/v1"
//! hostname = "pizzas.example.com"
//! request_timeout_secs = 15
//! confirm_deletes = true
//!
//! [combos]
//! tipos = ["Muzza", "Muzza y Jamón"]
//!
//! [combos.productos."La dupla | 1 Muzza + 1 Muzza y Jamón"]
//! Muzza = 1
//! "Muzza y Jamón" = 1
//! ```

mod backend_url;
pub mod error;

pub use backend_url::*;
pub use error::*;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stats::ComboMap;

pub const ENV_BACKEND_URL: &str = "PIZZAS_ECOS_BACKEND_URL";
pub const ENV_HOSTNAME: &str = "PIZZAS_ECOS_HOSTNAME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL from the config file.
    pub backend_url: Option<String>,
    /// Host the frontend is served from; drives URL auto-detection.
    pub hostname: Option<String>,
    /// `None` waits for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Answer given to delete confirmations when running headless.
    pub confirm_deletes: bool,
    /// Pizzas per combo for the dashboard; the current menu when absent.
    pub combos: ComboMap,
    /// Backend URL injected through the environment.
    #[serde(skip)]
    pub env_backend_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            hostname: None,
            request_timeout_secs: None,
            confirm_deletes: true,
            combos: ComboMap::default(),
            env_backend_url: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlays `PIZZAS_ECOS_BACKEND_URL` and `PIZZAS_ECOS_HOSTNAME`.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.env_backend_url = Some(url);
        }
        if let Some(host) = lookup(ENV_HOSTNAME) {
            self.hostname = Some(host);
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn backend_url(&self, explicit: Option<&str>) -> BackendUrl {
        resolve_backend_url(&UrlInputs {
            explicit,
            environment: self.env_backend_url.as_deref(),
            config_file: self.backend_url.as_deref(),
            hostname: self.hostname.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse("request_timeout_secs = 10\n").unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert!(config.confirm_deletes);
        assert_eq!(config.backend_url, None);
        assert_eq!(config.combos, ComboMap::default());
    }

    #[test]
    fn test_combos_from_file() {
        let config = Config::parse(
            "[combos]\ntipos = [\"Napo\"]\n\n[combos.productos.\"Promo Napo x2\"]\nNapo = 2\n",
        )
        .unwrap();
        assert_eq!(config.combos.tipos, vec!["Napo".to_string()]);
        assert_eq!(config.combos.productos["Promo Napo x2"]["Napo"], 2);
    }

    #[test]
    fn test_env_beats_file() {
        let config = Config::parse("backend_url = \"http://file/api/v1\"\n")
            .unwrap()
            .with_env_from(|key| match key {
                ENV_BACKEND_URL => Some("http://env/api/v1".into()),
                _ => None,
            });

        let resolved = config.backend_url(None);
        assert_eq!(resolved.url, "http://env/api/v1");
        assert_eq!(resolved.source, UrlSource::Environment);

        assert_eq!(config.backend_url(Some("http://cli")).source, UrlSource::Override);
    }

    #[test]
    fn test_hostname_from_env() {
        let config = Config::default().with_env_from(|key| {
            (key == ENV_HOSTNAME).then(|| "qa-ecos.web.app".to_string())
        });
        assert_eq!(config.backend_url(None).url, QA_BACKEND_URL);
    }

    #[test]
    fn test_invalid_file() {
        assert!(Config::parse("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/pizzas-ecos.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
