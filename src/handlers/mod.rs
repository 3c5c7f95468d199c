pub mod health;
pub mod predict;

pub use health::{health_check, home};
pub use predict::{predict_breast, predict_diabetes, predict_heart};

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

use crate::AppState;

/// Full application router. The CORS layer allows any origin and answers
/// preflight OPTIONS requests itself, which the web-client collaborator
/// requires.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/predict_diabetes", post(predict_diabetes))
        .route("/predict_heart", post(predict_heart))
        .route("/predict/breast", post(predict_breast))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
