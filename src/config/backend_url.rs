//! Picks the backend base URL.
//!
//! Sources, strongest first:
//!
//! 1. an explicit override (CLI flag or constructor argument);
//! 2. `PIZZAS_ECOS_BACKEND_URL`, then `backend_url` from the config file;
//! 3. the local backend when running on `localhost`/`127.0.0.1`;
//! 4. the deployment matching the host name, else the same host under `/api/v1`.
//!
//! With no host at all the local backend is used.

use std::fmt;

pub const LOCAL_BACKEND_URL: &str = "http://localhost:8080/api/v1";
pub const QA_BACKEND_URL: &str =
    "https://pizzas-ecos-backend-qa-872448320700.us-central1.run.app/api/v1";
pub const PROD_BACKEND_URL: &str =
    "https://pizzas-ecos-backend-prod-872448320700.us-central1.run.app/api/v1";

/// Host name fragments of the deployed frontends.
const HOST_PATTERNS: &[(&str, &str)] = &[
    ("qa-ecos", QA_BACKEND_URL),
    ("ecos-ventas-pizzas", PROD_BACKEND_URL),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Override,
    Environment,
    ConfigFile,
    Localhost,
    HostPattern,
    SameHost,
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UrlSource::Override => "override",
            UrlSource::Environment => "environment",
            UrlSource::ConfigFile => "config file",
            UrlSource::Localhost => "localhost",
            UrlSource::HostPattern => "host pattern",
            UrlSource::SameHost => "same host",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUrl {
    pub url: String,
    pub source: UrlSource,
}

impl BackendUrl {
    fn new(url: &str, source: UrlSource) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            source,
        }
    }
}

/// Candidate values, each optional. Blank strings count as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlInputs<'a> {
    pub explicit: Option<&'a str>,
    pub environment: Option<&'a str>,
    pub config_file: Option<&'a str>,
    pub hostname: Option<&'a str>,
}

fn given(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn resolve_backend_url(inputs: &UrlInputs<'_>) -> BackendUrl {
    if let Some(url) = given(inputs.explicit) {
        return BackendUrl::new(url, UrlSource::Override);
    }
    if let Some(url) = given(inputs.environment) {
        return BackendUrl::new(url, UrlSource::Environment);
    }
    if let Some(url) = given(inputs.config_file) {
        return BackendUrl::new(url, UrlSource::ConfigFile);
    }

    let Some(host) = given(inputs.hostname) else {
        return BackendUrl::new(LOCAL_BACKEND_URL, UrlSource::Localhost);
    };
    if host == "localhost" || host == "127.0.0.1" {
        return BackendUrl::new(LOCAL_BACKEND_URL, UrlSource::Localhost);
    }
    if let Some((_, url)) = HOST_PATTERNS.iter().find(|(pattern, _)| host.contains(pattern)) {
        return BackendUrl::new(url, UrlSource::HostPattern);
    }
    BackendUrl::new(&format!("https://{host}/api/v1"), UrlSource::SameHost)
}
