//! 경매 이벤트 / 상품 쓰기 커맨드 처리
//! 1. 이벤트 생성, 수정, 삭제
//! 2. 상품 생성, 수정, 삭제
// region:    --- Imports
use super::model::{AuctionEvent, AuctionItem, ItemRecord, ItemStatus};
use super::validation::{
    nullable, nullable_blank, require, validate_event_window, validate_not_blank,
    validate_price_floor, validate_price_format, validate_starting_price,
};
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult, ValidationError};
use crate::query::queries;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

// endregion: --- Imports

// region:    --- Write Mode
/// 쓰기 종류: 생성(POST), 전체 수정(PUT), 부분 수정(PATCH)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Replace,
    Partial,
}

impl WriteMode {
    fn requires_all(self) -> bool {
        !matches!(self, WriteMode::Partial)
    }
}
// endregion: --- Write Mode

// region:    --- Event Commands
/// 이벤트 쓰기 요청
///
/// 모든 필드는 `Option<Option<_>>`: 필드 없음과 명시적 null 을 구분해 null 을 거부한다.
#[derive(Debug, Deserialize, Validate, Clone, Default)]
pub struct EventWrite {
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 10, message = "Ensure this field has no more than 10 characters."))]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_datetime: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_datetime: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub created_by: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_active: Option<Option<bool>>,
}

impl EventWrite {
    pub fn validate(&self, mode: WriteMode) -> Result<(), ValidationError> {
        let required = mode.requires_all();
        require("name", &self.name, required)?;
        require("city", &self.city, required)?;
        require("state", &self.state, required)?;
        require("zip_code", &self.zip_code, required)?;
        require("start_datetime", &self.start_datetime, required)?;
        require("end_datetime", &self.end_datetime, required)?;
        require("created_by", &self.created_by, required)?;
        require("is_active", &self.is_active, false)?;

        for (field, value) in [
            ("name", &self.name),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
        ] {
            if let Some(Some(value)) = value {
                validate_not_blank(field, value)?;
            }
        }
        Validate::validate(self)?;

        validate_event_window(self.start_datetime.flatten(), self.end_datetime.flatten())
    }
}

/// 이벤트 생성
pub async fn create_event(
    db_manager: &DatabaseManager,
    cmd: EventWrite,
) -> AppResult<AuctionEvent> {
    cmd.validate(WriteMode::Create)?;
    info!(
        "{:<12} --> 이벤트 생성 요청: {:?}",
        "Command",
        cmd.name.as_ref().and_then(|n| n.as_deref())
    );

    let event = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let event_id: i64 = sqlx::query_scalar(queries::INSERT_EVENT)
                    .bind(cmd.name.flatten())
                    .bind(cmd.city.flatten())
                    .bind(cmd.state.flatten())
                    .bind(cmd.zip_code.flatten())
                    .bind(cmd.start_datetime.flatten())
                    .bind(cmd.end_datetime.flatten())
                    .bind(cmd.created_by.flatten())
                    .bind(cmd.is_active.flatten().unwrap_or(true))
                    .fetch_one(&mut **tx)
                    .await?;

                let event = sqlx::query_as::<_, AuctionEvent>(queries::GET_EVENT)
                    .bind(event_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok::<_, AppError>(event)
            })
        })
        .await?;

    info!("{:<12} --> 이벤트 생성 완료 id: {}", "Command", event.id);
    Ok(event)
}

/// 이벤트 수정 (PUT / PATCH)
pub async fn update_event(
    db_manager: &DatabaseManager,
    event_id: i64,
    cmd: EventWrite,
    mode: WriteMode,
) -> AppResult<AuctionEvent> {
    cmd.validate(mode)?;
    info!("{:<12} --> 이벤트 수정 요청 id: {} ({:?})", "Command", event_id, mode);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_scalar::<_, i64>(queries::UPDATE_EVENT)
                    .bind(event_id)
                    .bind(cmd.name.flatten())
                    .bind(cmd.city.flatten())
                    .bind(cmd.state.flatten())
                    .bind(cmd.zip_code.flatten())
                    .bind(cmd.start_datetime.flatten())
                    .bind(cmd.end_datetime.flatten())
                    .bind(cmd.created_by.flatten())
                    .bind(cmd.is_active.flatten())
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound {
                        entity: "AuctionEvent",
                        id: event_id,
                    })?;

                let event = sqlx::query_as::<_, AuctionEvent>(queries::GET_EVENT)
                    .bind(event_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok::<_, AppError>(event)
            })
        })
        .await
}

/// 이벤트 삭제
pub async fn delete_event(db_manager: &DatabaseManager, event_id: i64) -> AppResult<()> {
    info!("{:<12} --> 이벤트 삭제 요청 id: {}", "Command", event_id);
    let result = sqlx::query(queries::DELETE_EVENT)
        .bind(event_id)
        .execute(db_manager.pool())
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound {
            entity: "AuctionEvent",
            id: event_id,
        });
    }
    Ok(())
}
// endregion: --- Event Commands

// region:    --- Item Commands
/// 상품 쓰기 요청
///
/// `current_price` 는 공개 API 에서 읽기 전용이다. 요청 본문의 값은 무시되고
/// 관리 콘솔 경로에서만 설정된다. null 을 받는 필드는 `image_url`, `sold_at`,
/// `sold_to` 뿐이다.
#[derive(Debug, Deserialize, Validate, Clone, Default)]
pub struct ItemWrite {
    #[serde(default, deserialize_with = "nullable")]
    pub auction_event: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_blank")]
    #[validate(
        length(max = 500, message = "Ensure this field has no more than 500 characters."),
        url(message = "Enter a valid URL.")
    )]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub owner: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub starting_price: Option<Option<Decimal>>,
    #[serde(skip_deserializing)]
    pub current_price: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<ItemStatus>>,
    #[serde(default, deserialize_with = "nullable")]
    pub sold_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub sold_to: Option<Option<i64>>,
}

impl ItemWrite {
    pub fn validate(&self, mode: WriteMode) -> Result<(), ValidationError> {
        let required = mode.requires_all();
        require("auction_event", &self.auction_event, required)?;
        require("name", &self.name, required)?;
        require("description", &self.description, required)?;
        require("owner", &self.owner, required)?;
        require("starting_price", &self.starting_price, required)?;
        require("status", &self.status, false)?;

        if let Some(Some(name)) = &self.name {
            validate_not_blank("name", name)?;
        }
        if let Some(Some(description)) = &self.description {
            validate_not_blank("description", description)?;
        }
        Validate::validate(self)?;

        let starting_price = self.starting_price.flatten();
        if let Some(starting_price) = starting_price {
            validate_price_format("starting_price", starting_price)?;
            validate_starting_price(starting_price)?;
        }
        if let Some(current_price) = self.current_price {
            validate_price_format("current_price", current_price)?;
        }

        validate_price_floor(starting_price, self.current_price)
    }

    /// 저장된 상품에 요청을 병합
    ///
    /// 현재가가 요청에 없고 아직 시작가 그대로라면 새 시작가를 따라간다.
    fn merge_into(self, mut record: ItemRecord) -> ItemRecord {
        if let Some(starting_price) = self.starting_price.flatten() {
            if self.current_price.is_none() && record.current_price == record.starting_price {
                record.current_price = starting_price;
            }
            record.starting_price = starting_price;
        }
        if let Some(current_price) = self.current_price {
            record.current_price = current_price;
        }
        if let Some(auction_event) = self.auction_event.flatten() {
            record.auction_event_id = auction_event;
        }
        if let Some(name) = self.name.flatten() {
            record.name = name;
        }
        if let Some(description) = self.description.flatten() {
            record.description = description;
        }
        if let Some(image_url) = self.image_url {
            record.image_url = image_url;
        }
        if let Some(owner) = self.owner.flatten() {
            record.owner_id = owner;
        }
        if let Some(status) = self.status.flatten() {
            record.status = status;
        }
        if let Some(sold_at) = self.sold_at {
            record.sold_at = sold_at;
        }
        if let Some(sold_to) = self.sold_to {
            record.sold_to_id = sold_to;
        }
        record
    }
}

/// 상품 생성
pub async fn create_item(db_manager: &DatabaseManager, cmd: ItemWrite) -> AppResult<AuctionItem> {
    cmd.validate(WriteMode::Create)?;
    info!(
        "{:<12} --> 상품 생성 요청: {:?}",
        "Command",
        cmd.name.as_ref().and_then(|n| n.as_deref())
    );

    let item = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let starting_price = cmd.starting_price.flatten();
                let current_price = cmd.current_price.or(starting_price);
                let status = cmd.status.flatten().unwrap_or_default();

                let item_id: i64 = sqlx::query_scalar(queries::INSERT_ITEM)
                    .bind(cmd.auction_event.flatten())
                    .bind(cmd.name.flatten())
                    .bind(cmd.description.flatten())
                    .bind(cmd.image_url.flatten())
                    .bind(cmd.owner.flatten())
                    .bind(starting_price)
                    .bind(current_price)
                    .bind(status.as_str())
                    .bind(cmd.sold_at.flatten())
                    .bind(cmd.sold_to.flatten())
                    .fetch_one(&mut **tx)
                    .await?;

                let item = sqlx::query_as::<_, AuctionItem>(queries::GET_ITEM)
                    .bind(item_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok::<_, AppError>(item)
            })
        })
        .await?;

    info!("{:<12} --> 상품 생성 완료 id: {}", "Command", item.id);
    Ok(item)
}

/// 상품 수정 (PUT / PATCH)
pub async fn update_item(
    db_manager: &DatabaseManager,
    item_id: i64,
    cmd: ItemWrite,
    mode: WriteMode,
) -> AppResult<AuctionItem> {
    cmd.validate(mode)?;
    info!("{:<12} --> 상품 수정 요청 id: {} ({:?})", "Command", item_id, mode);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let record = sqlx::query_as::<_, ItemRecord>(queries::GET_ITEM_RECORD_FOR_UPDATE)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or(AppError::NotFound {
                        entity: "AuctionItem",
                        id: item_id,
                    })?;

                let record = cmd.merge_into(record);

                sqlx::query(queries::UPDATE_ITEM)
                    .bind(item_id)
                    .bind(record.auction_event_id)
                    .bind(record.name)
                    .bind(record.description)
                    .bind(record.image_url)
                    .bind(record.owner_id)
                    .bind(record.starting_price)
                    .bind(record.current_price)
                    .bind(record.status.as_str())
                    .bind(record.sold_at)
                    .bind(record.sold_to_id)
                    .execute(&mut **tx)
                    .await?;

                let item = sqlx::query_as::<_, AuctionItem>(queries::GET_ITEM)
                    .bind(item_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok::<_, AppError>(item)
            })
        })
        .await
}

/// 상품 삭제
pub async fn delete_item(db_manager: &DatabaseManager, item_id: i64) -> AppResult<()> {
    info!("{:<12} --> 상품 삭제 요청 id: {}", "Command", item_id);
    let result = sqlx::query(queries::DELETE_ITEM)
        .bind(item_id)
        .execute(db_manager.pool())
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound {
            entity: "AuctionItem",
            id: item_id,
        });
    }
    Ok(())
}
// endregion: --- Item Commands

// endregion: --- Tests
