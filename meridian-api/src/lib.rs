use axum::{
    http::Method,
    response::Redirect,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod aircraft;
pub mod auth;
pub mod collections;
pub mod error;
pub mod exams;
pub mod flights;
pub mod middleware;
pub mod reservations;
pub mod results;
pub mod sectors;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Reservation-app routes carry no authentication, matching the source
    // system's open admin console.
    let reservation_app = Router::new()
        .merge(aircraft::routes())
        .merge(sectors::routes())
        .merge(flights::routes())
        .merge(reservations::routes())
        .merge(collections::routes());

    let exam_public = auth::routes();

    let exam_authenticated = Router::new()
        .merge(exams::routes())
        .merge(results::routes())
        .route("/v1/auth/me", get(auth::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let exam_admin = Router::new()
        .merge(exams::admin_routes())
        .merge(results::admin_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::admin_middleware,
        ));

    Router::new()
        .route("/", get(index))
        .merge(reservation_app)
        .merge(exam_public)
        .merge(exam_authenticated)
        .merge(exam_admin)
        .fallback(fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "meridian",
        "apps": ["reservation", "exam"],
    }))
}

// Unmatched routes redirect to the home screen.
async fn fallback() -> Redirect {
    Redirect::to("/")
}
