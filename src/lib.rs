//! # Pizzas ECOS
//!
//! > **Order-taking client for a small pizza business.**
//!
//! This crate is everything between the screens and the REST backend: the
//! public order form (build a [`Venta`](model::Venta) and submit it), the
//! sales dashboard (fetch the sales and aggregate them) and the admin panel
//! (products, sellers and accounts).
//!
//! ## 🏗️ Design
//!
//! ### One owner for the screen state
//! The order in progress and the cached catalogues live in a single
//! [`StateActor`](state::StateActor) task. Controllers hold a cloneable
//! [`StateClient`](state::StateClient) and send it messages, so mutations are
//! applied one at a time in arrival order and nothing needs a lock.
//!
//! ### Seams instead of globals
//! The network and the screen are reached through traits:
//! [`Transport`](api::Transport) for HTTP, [`TokenStore`](api::TokenStore) for the
//! session token and [`Notifier`](ui::Notifier) for spinner, toasts and
//! confirmations. A [`Session`](lifecycle::Session) wires one of each into
//! the controllers.
//!
//! ### Validate first
//! Every controller operation validates its input with [`validators`] before a
//! request is built. Invalid input never reaches the network.
//!
//! ### Type-safe errors
//! Each layer has its own `thiserror` enum ([`ValidationError`](validators::ValidationError),
//! [`ApiError`](api::ApiError), [`StateError`](state::StateError)) and
//! [`ControllerError`](controllers::ControllerError) wraps them with `#[from]`.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`], [`validators`])
//! Typed records decoded from backend JSON with `serde`, and the field rules
//! that guard every form.
//!
//! ### 2. The State ([`state`])
//! [`AppState`](state::AppState) plus the actor that owns it.
//!
//! ### 3. The Backend ([`api`], [`config`])
//! [`ApiService`](api::ApiService) with one method per endpoint, the reqwest
//! [`HttpTransport`](api::HttpTransport), the scripted
//! [`MockTransport`](api::MockTransport) for tests, and backend URL resolution.
//!
//! ### 4. The Screens ([`controllers`], [`ui`], [`stats`])
//! Controllers run the validate → request → update → notify sequence; `stats`
//! computes the dashboard figures.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`Session`](lifecycle::Session) and [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against a local backend on :8080
//! RUST_LOG=info cargo run
//!
//! # Against QA, logging in first
//! RUST_LOG=info cargo run -- --hostname qa-ecos.web.app --username admin --password 1234
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod api;
pub mod config;
pub mod controllers;
pub mod lifecycle;
pub mod model;
pub mod state;
pub mod stats;
pub mod ui;
pub mod validators;
