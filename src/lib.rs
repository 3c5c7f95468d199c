pub mod config;
pub mod dataset;
pub mod domains;
pub mod error;
pub mod handlers;
pub mod models;
pub mod preprocess;
pub mod risk;

use std::sync::Arc;

use crate::domains::{breast::BreastContext, ServingContext};

/// Shared application state: one immutable serving context per disease
/// domain, built once at startup. Contexts are read-only during serving,
/// so concurrent requests share them without locking.
#[derive(Clone)]
pub struct AppState {
    pub diabetes: Arc<ServingContext>,
    pub heart: Arc<ServingContext>,
    pub breast: Arc<BreastContext>,
}
