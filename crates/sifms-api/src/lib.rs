//! JSON REST API for SIFMS.
//!
//! Exposes an axum [`Router`] backed by any [`sifms_core::store::SifmsStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! Handlers are stateless: the injected store handle is the only shared
//! resource, and every request performs at most one insert or update.

pub mod auth;
pub mod complaints;
pub mod error;
pub mod persons;
pub mod response;

use std::{path::PathBuf, sync::Arc};

use axum::{
  routing::{get, post},
  Router,
};
use serde::Deserialize;
use sifms_core::store::SifmsStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use response::Envelope;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `SIFMS_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: SifmsStore + 'static,
{
  Router::new()
    .route("/api/v1/sifms/register/student", post(persons::register::<S>))
    .route("/api/v1/sifms/login", post(persons::login::<S>))
    .route("/api/v1/sifms/complaint", post(complaints::submit::<S>))
    .route("/api/v1/sifms/respond/complaint", post(complaints::respond::<S>))
    .route("/api/v1/sifms/student/complaints", get(complaints::own::<S>))
    .route("/api/v1/sifms/all/complaints", post(complaints::all::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
