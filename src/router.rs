// region:    --- Imports
use crate::admin;
use crate::database::DatabaseManager;
use crate::handlers;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// endregion: --- Imports

/// 라우터 설정 (인증 없음)
pub fn create_router(db_manager: Arc<DatabaseManager>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/auctionEvent",
            get(handlers::handle_list_events).post(handlers::handle_create_event),
        )
        .route(
            "/auctionEvent/:id",
            get(handlers::handle_get_event)
                .put(handlers::handle_replace_event)
                .patch(handlers::handle_patch_event)
                .delete(handlers::handle_delete_event),
        )
        .route(
            "/auctionItem",
            get(handlers::handle_list_items).post(handlers::handle_create_item),
        )
        .route(
            "/auctionItem/:id",
            get(handlers::handle_get_item)
                .put(handlers::handle_replace_item)
                .patch(handlers::handle_patch_item)
                .delete(handlers::handle_delete_item),
        )
        .route(
            "/users",
            get(handlers::handle_list_users).post(handlers::handle_create_user),
        )
        .route(
            "/users/:id",
            get(handlers::handle_get_user).delete(handlers::handle_delete_user),
        );

    let console = Router::new()
        .route("/auctionEvent", get(admin::handle_list_events))
        .route(
            "/auctionItem",
            get(admin::handle_list_items).post(admin::handle_create_item),
        )
        .route("/auctionItem/:id", patch(admin::handle_patch_item));

    Router::new()
        .route("/health", get(handlers::handle_health))
        .nest("/api", api)
        .nest("/admin", console)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .with_state(db_manager)
}
