//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); structured
//! fields carry the context instead.
//!
//! ## What Gets Traced
//!
//! - **State actor**: startup, shutdown and every mutation of the order in progress
//! - **Backend calls**: one span per [`ApiService`](crate::api::ApiService) method, with
//!   failures and rejected tokens logged at `warn`
//! - **Controllers**: one span per operation; failures are logged next to the toast
//! - **Toasts**: the headless notifier writes every message at a matching level
//!
//! ## Usage
//!
//! ```bash
//! # Outcomes only
//! RUST_LOG=info pizzas-ecos
//!
//! # Full payloads (orders, updates) and response sizes
//! RUST_LOG=debug pizzas-ecos
//! ```
//!
//! With `RUST_LOG=info` loading the reference data looks like:
//!
//! ```text
//! INFO Backend URL resolved url=http://localhost:8080/api/v1 source=localhost
//! INFO Starting session base_url=http://localhost:8080/api/v1
//! INFO State actor started
//! INFO cargar_datos: Datos cargados productos=4 vendedores=3
//! INFO cargar_datos: Datos iniciales cargados productos=4 vendedores=3
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
