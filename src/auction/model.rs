use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// 경매 이벤트 모델 (created_by_username, items_count 는 조회 시 계산)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct AuctionEvent {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i64,
    pub created_by_username: String,
    pub is_active: bool,
    pub items_count: i64,
}

// 경매 상품 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct AuctionItem {
    pub id: i64,
    pub auction_event: i64,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner: i64,
    pub owner_username: String,
    pub starting_price: Decimal,
    pub current_price: Decimal,
    #[sqlx(try_from = "String")]
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sold_at: Option<DateTime<Utc>>,
    pub sold_to: Option<i64>,
    pub sold_to_username: Option<String>,
    pub auction_event_name: String,
}

// 상품 테이블에 저장된 컬럼만 (수정 시 병합용)
#[derive(Debug, sqlx::FromRow, Clone)]
pub struct ItemRecord {
    pub auction_event_id: i64,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner_id: i64,
    pub starting_price: Decimal,
    pub current_price: Decimal,
    #[sqlx(try_from = "String")]
    pub status: ItemStatus,
    pub sold_at: Option<DateTime<Utc>>,
    pub sold_to_id: Option<i64>,
}

/// 상품 상태
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Draft,
    Published,
    Sold,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("unknown item status: {0}")]
pub struct UnknownStatus(pub String);

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Draft => "draft",
            ItemStatus::Published => "published",
            ItemStatus::Sold => "sold",
            ItemStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ItemStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "draft" => Ok(ItemStatus::Draft),
            "published" => Ok(ItemStatus::Published),
            "sold" => Ok(ItemStatus::Sold),
            "cancelled" => Ok(ItemStatus::Cancelled),
            _ => Err(UnknownStatus(value)),
        }
    }
}
