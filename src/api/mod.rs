pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::service::NoticeService;
use state::AppState;

pub fn create_app(notice_service: Arc<NoticeService>) -> Router {
    let app_state = AppState::new(notice_service);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        .nest("/notices", notice_routes())

        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn notice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::notices::list).post(handlers::notices::create))
        .route(
            "/:id",
            get(handlers::notices::get)
                .put(handlers::notices::update)
                .delete(handlers::notices::delete),
        )
}
