// region:    --- Imports
use super::queries;
use crate::accounts::User;
use crate::auction::model::{AuctionEvent, AuctionItem};
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult};
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 모든 이벤트 조회
pub async fn get_all_events(db_manager: &DatabaseManager) -> AppResult<Vec<AuctionEvent>> {
    info!("{:<12} --> 모든 이벤트 조회", "Query");
    let events = sqlx::query_as::<_, AuctionEvent>(queries::GET_ALL_EVENTS)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(events)
}

/// 이벤트 조회
pub async fn get_event(db_manager: &DatabaseManager, event_id: i64) -> AppResult<AuctionEvent> {
    info!("{:<12} --> 이벤트 조회 id: {}", "Query", event_id);
    sqlx::query_as::<_, AuctionEvent>(queries::GET_EVENT)
        .bind(event_id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or(AppError::NotFound {
            entity: "AuctionEvent",
            id: event_id,
        })
}

/// 모든 상품 조회
pub async fn get_all_items(db_manager: &DatabaseManager) -> AppResult<Vec<AuctionItem>> {
    info!("{:<12} --> 모든 상품 조회", "Query");
    let items = sqlx::query_as::<_, AuctionItem>(queries::GET_ALL_ITEMS)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(items)
}

/// 상품 조회
pub async fn get_item(db_manager: &DatabaseManager, item_id: i64) -> AppResult<AuctionItem> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", item_id);
    sqlx::query_as::<_, AuctionItem>(queries::GET_ITEM)
        .bind(item_id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or(AppError::NotFound {
            entity: "AuctionItem",
            id: item_id,
        })
}

/// 모든 사용자 조회
pub async fn get_all_users(db_manager: &DatabaseManager) -> AppResult<Vec<User>> {
    info!("{:<12} --> 모든 사용자 조회", "Query");
    let users = sqlx::query_as::<_, User>(queries::GET_ALL_USERS)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(users)
}

/// 사용자 조회
pub async fn get_user(db_manager: &DatabaseManager, user_id: i64) -> AppResult<User> {
    info!("{:<12} --> 사용자 조회 id: {}", "Query", user_id);
    sqlx::query_as::<_, User>(queries::GET_USER)
        .bind(user_id)
        .fetch_optional(db_manager.pool())
        .await?
        .ok_or(AppError::NotFound {
            entity: "User",
            id: user_id,
        })
}

// endregion: --- Query Handlers
