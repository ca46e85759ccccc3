use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod search;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/flight/unified-details", post(search::flight_unified_details))
        .route("/hotel/unified-details", post(search::hotel_unified_details))
        .route("/car/unified-details", post(search::car_unified_details))
        .route("/health", get(search::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
