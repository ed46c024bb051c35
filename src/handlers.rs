// region:    --- Imports
use crate::accounts::{self, UserWrite};
use crate::auction::commands::{self, EventWrite, ItemWrite, WriteMode};
use crate::database::DatabaseManager;
use crate::error::AppResult;
use crate::query;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

type Db = State<Arc<DatabaseManager>>;

// region:    --- Auction Event Handlers

/// 이벤트 목록 조회
pub async fn handle_list_events(State(db_manager): Db) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 이벤트 목록 조회", "HandlerQuery");
    let events = query::handlers::get_all_events(&db_manager).await?;
    Ok(Json(events))
}

/// 이벤트 생성
pub async fn handle_create_event(
    State(db_manager): Db,
    payload: Result<Json<EventWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(cmd) = payload?;
    info!("{:<12} --> 이벤트 생성", "Handler");
    let event = commands::create_event(&db_manager, cmd).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// 이벤트 조회
pub async fn handle_get_event(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(event_id) = path?;
    info!("{:<12} --> 이벤트 조회 id: {}", "HandlerQuery", event_id);
    let event = query::handlers::get_event(&db_manager, event_id).await?;
    Ok(Json(event))
}

/// 이벤트 전체 수정
pub async fn handle_replace_event(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(event_id) = path?;
    let Json(cmd) = payload?;
    info!("{:<12} --> 이벤트 전체 수정 id: {}", "Handler", event_id);
    let event = commands::update_event(&db_manager, event_id, cmd, WriteMode::Replace).await?;
    Ok(Json(event))
}

/// 이벤트 부분 수정
pub async fn handle_patch_event(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(event_id) = path?;
    let Json(cmd) = payload?;
    info!("{:<12} --> 이벤트 부분 수정 id: {}", "Handler", event_id);
    let event = commands::update_event(&db_manager, event_id, cmd, WriteMode::Partial).await?;
    Ok(Json(event))
}

/// 이벤트 삭제
pub async fn handle_delete_event(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(event_id) = path?;
    info!("{:<12} --> 이벤트 삭제 id: {}", "Handler", event_id);
    commands::delete_event(&db_manager, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Auction Event Handlers

// region:    --- Auction Item Handlers

/// 상품 목록 조회
pub async fn handle_list_items(State(db_manager): Db) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 상품 목록 조회", "HandlerQuery");
    let items = query::handlers::get_all_items(&db_manager).await?;
    Ok(Json(items))
}

/// 상품 생성
pub async fn handle_create_item(
    State(db_manager): Db,
    payload: Result<Json<ItemWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(cmd) = payload?;
    info!("{:<12} --> 상품 생성", "Handler");
    let item = commands::create_item(&db_manager, cmd).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// 상품 조회
pub async fn handle_get_item(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(item_id) = path?;
    info!("{:<12} --> 상품 조회 id: {}", "HandlerQuery", item_id);
    let item = query::handlers::get_item(&db_manager, item_id).await?;
    Ok(Json(item))
}

/// 상품 전체 수정
pub async fn handle_replace_item(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(item_id) = path?;
    let Json(cmd) = payload?;
    info!("{:<12} --> 상품 전체 수정 id: {}", "Handler", item_id);
    let item = commands::update_item(&db_manager, item_id, cmd, WriteMode::Replace).await?;
    Ok(Json(item))
}

/// 상품 부분 수정
pub async fn handle_patch_item(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(item_id) = path?;
    let Json(cmd) = payload?;
    info!("{:<12} --> 상품 부분 수정 id: {}", "Handler", item_id);
    let item = commands::update_item(&db_manager, item_id, cmd, WriteMode::Partial).await?;
    Ok(Json(item))
}

/// 상품 삭제
pub async fn handle_delete_item(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(item_id) = path?;
    info!("{:<12} --> 상품 삭제 id: {}", "Handler", item_id);
    commands::delete_item(&db_manager, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Auction Item Handlers

// region:    --- User Handlers

/// 사용자 목록 조회
pub async fn handle_list_users(State(db_manager): Db) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 사용자 목록 조회", "HandlerQuery");
    let users = query::handlers::get_all_users(&db_manager).await?;
    Ok(Json(users))
}

/// 사용자 생성
pub async fn handle_create_user(
    State(db_manager): Db,
    payload: Result<Json<UserWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(cmd) = payload?;
    info!("{:<12} --> 사용자 생성", "Handler");
    let user = accounts::create_user(&db_manager, cmd).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 사용자 조회
pub async fn handle_get_user(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(user_id) = path?;
    info!("{:<12} --> 사용자 조회 id: {}", "HandlerQuery", user_id);
    let user = query::handlers::get_user(&db_manager, user_id).await?;
    Ok(Json(user))
}

/// 사용자 삭제
pub async fn handle_delete_user(
    State(db_manager): Db,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(user_id) = path?;
    info!("{:<12} --> 사용자 삭제 id: {}", "Handler", user_id);
    accounts::delete_user(&db_manager, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- User Handlers

/// 헬스 체크
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
