//! 관리 콘솔: 필터 / 검색 목록과 현재가를 직접 설정할 수 있는 상품 쓰기 경로
// region:    --- Imports
use crate::auction::commands::{self, ItemWrite, WriteMode};
use crate::auction::model::{AuctionEvent, AuctionItem, ItemStatus};
use crate::auction::validation::{nullable, require};
use crate::database::DatabaseManager;
use crate::error::{AppResult, ValidationError};
use crate::query::queries;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Paging
const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

#[derive(Debug, Clone, Copy, Default)]
struct Paging {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Paging {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder
            .push(" LIMIT ")
            .push_bind(self.limit())
            .push(" OFFSET ")
            .push_bind(self.offset());
    }
}

/// ILIKE 패턴 생성 (와일드카드 문자는 이스케이프)
fn like_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

fn push_search(builder: &mut QueryBuilder<'_, Postgres>, columns: &[&str], pattern: &str) {
    builder.push(" AND (");
    for (idx, column) in columns.iter().enumerate() {
        if idx > 0 {
            builder.push(" OR ");
        }
        builder
            .push(*column)
            .push(" ILIKE ")
            .push_bind(pattern.to_string());
    }
    builder.push(")");
}

fn push_range(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: &str,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) {
    if let Some(from) = from {
        builder.push(format!(" AND {column} >= ")).push_bind(from);
    }
    if let Some(to) = to {
        builder.push(format!(" AND {column} < ")).push_bind(to);
    }
}
// endregion: --- Paging

// region:    --- Event Listing
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EventFilter {
    pub is_active: Option<bool>,
    pub start_from: Option<DateTime<Utc>>,
    pub start_to: Option<DateTime<Utc>>,
    pub end_from: Option<DateTime<Utc>>,
    pub end_to: Option<DateTime<Utc>>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl EventFilter {
    fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(queries::EVENT_SELECT);
        builder.push(" WHERE TRUE");
        if let Some(is_active) = self.is_active {
            builder.push(" AND e.is_active = ").push_bind(is_active);
        }
        push_range(&mut builder, "e.start_datetime", self.start_from, self.start_to);
        push_range(&mut builder, "e.end_datetime", self.end_from, self.end_to);
        push_range(&mut builder, "e.created_at", self.created_from, self.created_to);
        if let Some(pattern) = self.search.as_deref().and_then(like_pattern) {
            push_search(
                &mut builder,
                &["e.name", "e.city", "e.state", "e.zip_code", "u.username"],
                &pattern,
            );
        }
        builder.push(" ORDER BY e.id");
        Paging {
            limit: self.limit,
            offset: self.offset,
        }
        .push_to(&mut builder);
        builder
    }
}

pub async fn search_events(
    db_manager: &DatabaseManager,
    filter: &EventFilter,
) -> AppResult<Vec<AuctionEvent>> {
    info!("{:<12} --> 이벤트 검색: {:?}", "Admin", filter);
    let events = filter
        .build()
        .build_query_as::<AuctionEvent>()
        .fetch_all(db_manager.pool())
        .await?;
    Ok(events)
}
// endregion: --- Event Listing

// region:    --- Item Listing
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub auction_event: Option<i64>,
    pub owner: Option<i64>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub sold_after: Option<DateTime<Utc>>,
    pub sold_before: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ItemFilter {
    fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(queries::ITEM_SELECT);
        builder.push(" WHERE TRUE");
        if let Some(status) = self.status {
            builder.push(" AND i.status = ").push_bind(status.as_str());
        }
        if let Some(auction_event) = self.auction_event {
            builder
                .push(" AND i.auction_event_id = ")
                .push_bind(auction_event);
        }
        if let Some(owner) = self.owner {
            builder.push(" AND i.owner_id = ").push_bind(owner);
        }
        push_range(&mut builder, "i.created_at", self.created_from, self.created_to);
        push_range(&mut builder, "i.sold_at", self.sold_after, self.sold_before);
        if let Some(pattern) = self.search.as_deref().and_then(like_pattern) {
            push_search(
                &mut builder,
                &["i.name", "i.description", "o.username", "e.name"],
                &pattern,
            );
        }
        builder.push(" ORDER BY i.id");
        Paging {
            limit: self.limit,
            offset: self.offset,
        }
        .push_to(&mut builder);
        builder
    }
}

pub async fn search_items(
    db_manager: &DatabaseManager,
    filter: &ItemFilter,
) -> AppResult<Vec<AuctionItem>> {
    info!("{:<12} --> 상품 검색: {:?}", "Admin", filter);
    let items = filter
        .build()
        .build_query_as::<AuctionItem>()
        .fetch_all(db_manager.pool())
        .await?;
    Ok(items)
}
// endregion: --- Item Listing

// region:    --- Admin Handlers
/// 관리 콘솔 상품 쓰기 요청 (현재가 설정 가능)
#[derive(Debug, Deserialize)]
pub struct AdminItemWrite {
    #[serde(flatten)]
    pub item: ItemWrite,
    #[serde(default, deserialize_with = "nullable")]
    pub current_price: Option<Option<Decimal>>,
}

impl AdminItemWrite {
    fn into_command(self) -> Result<ItemWrite, ValidationError> {
        require("current_price", &self.current_price, false)?;
        Ok(ItemWrite {
            current_price: self.current_price.flatten(),
            ..self.item
        })
    }
}

/// 이벤트 목록 (필터 / 검색)
pub async fn handle_list_events(
    State(db_manager): State<Arc<DatabaseManager>>,
    filter: Result<Query<EventFilter>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filter) = filter?;
    let events = search_events(&db_manager, &filter).await?;
    Ok(Json(events))
}

/// 상품 목록 (필터 / 검색)
pub async fn handle_list_items(
    State(db_manager): State<Arc<DatabaseManager>>,
    filter: Result<Query<ItemFilter>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filter) = filter?;
    let items = search_items(&db_manager, &filter).await?;
    Ok(Json(items))
}

/// 상품 생성 (현재가 지정 가능)
pub async fn handle_create_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    payload: Result<Json<AdminItemWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    info!("{:<12} --> 관리 콘솔 상품 생성", "Admin");
    let item = commands::create_item(&db_manager, payload.into_command()?).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// 상품 부분 수정 (현재가 지정 가능)
pub async fn handle_patch_item(
    State(db_manager): State<Arc<DatabaseManager>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AdminItemWrite>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(item_id) = path?;
    let Json(payload) = payload?;
    info!("{:<12} --> 관리 콘솔 상품 수정 id: {}", "Admin", item_id);
    let cmd = payload.into_command()?;
    let item = commands::update_item(&db_manager, item_id, cmd, WriteMode::Partial).await?;
    Ok(Json(item))
}
// endregion: --- Admin Handlers

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("  50%_off "), Some("%50\\%\\_off%".to_string()));
        assert_eq!(like_pattern("   "), None);
    }

    #[test]
    fn paging_is_clamped() {
        let paging = Paging {
            limit: Some(10_000),
            offset: Some(-3),
        };
        assert_eq!(paging.limit(), MAX_LIMIT);
        assert_eq!(paging.offset(), 0);
        assert_eq!(Paging::default().limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn event_filter_sql_includes_requested_clauses() {
        let filter = EventFilter {
            is_active: Some(true),
            search: Some("gala".into()),
            ..Default::default()
        };
        let builder = filter.build();
        let sql = builder.sql();
        assert!(sql.contains("e.is_active = $1"));
        assert!(sql.contains("u.username ILIKE"));
        assert!(sql.contains("ORDER BY e.id LIMIT"));
        assert!(!sql.contains("e.start_datetime >="));
    }

    #[test]
    fn item_filter_sql_includes_sold_range() {
        let filter = ItemFilter {
            status: Some(ItemStatus::Sold),
            sold_after: Some(Utc::now()),
            ..Default::default()
        };
        let builder = filter.build();
        let sql = builder.sql();
        assert!(sql.contains("i.status = $1"));
        assert!(sql.contains("i.sold_at >= $2"));
    }

    #[test]
    fn admin_write_carries_current_price() {
        let payload: AdminItemWrite = serde_json::from_value(json!({
            "auction_event": 1,
            "name": "Vase",
            "description": "Blue glazed vase",
            "owner": 2,
            "starting_price": "10.00",
            "current_price": "5.00"
        }))
        .unwrap();
        let cmd = payload.into_command().unwrap();
        assert!(cmd.current_price.is_some());
        assert!(cmd.validate(WriteMode::Create).is_err());
    }

    #[test]
    fn admin_write_rejects_null_current_price() {
        let payload: AdminItemWrite =
            serde_json::from_value(json!({ "current_price": null })).unwrap();
        let err = payload.into_command().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("current_price"));
        assert_eq!(err.message, "This field may not be null.");
    }

    #[test]
    fn unknown_status_filter_does_not_deserialize() {
        let query = axum::http::Uri::from_static("/admin/auctionItem?status=archived");
        assert!(Query::<ItemFilter>::try_from_uri(&query).is_err());
        let query = axum::http::Uri::from_static("/admin/auctionItem?status=sold&limit=5");
        assert!(Query::<ItemFilter>::try_from_uri(&query).is_ok());
    }
}
// endregion: --- Tests
