//! 경매 이벤트 / 상품 쓰기 검증 규칙
// region:    --- Imports
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

// endregion: --- Imports

// region:    --- Messages
pub const EVENT_WINDOW_MESSAGE: &str = "End datetime must be after start datetime.";
pub const STARTING_PRICE_MESSAGE: &str = "Starting price must be positive.";
pub const CURRENT_PRICE_MESSAGE: &str =
    "Current price must be greater than or equal to starting price.";

// NUMERIC(10, 2)
const PRICE_DECIMAL_PLACES: u32 = 2;
const PRICE_WHOLE_DIGITS: u32 = 8;
// endregion: --- Messages

// region:    --- Cross-field Rules
/// 시작/종료 시각이 모두 있을 때만 종료 > 시작 을 검사
pub fn validate_event_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end <= start => {
            Err(ValidationError::request(EVENT_WINDOW_MESSAGE))
        }
        _ => Ok(()),
    }
}

/// 시작가는 0 보다 커야 한다
pub fn validate_starting_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::field("starting_price", STARTING_PRICE_MESSAGE));
    }
    Ok(())
}

/// 두 가격이 같은 쓰기에 있을 때 현재가 >= 시작가
pub fn validate_price_floor(
    starting: Option<Decimal>,
    current: Option<Decimal>,
) -> Result<(), ValidationError> {
    match (starting, current) {
        (Some(starting), Some(current)) if current < starting => {
            Err(ValidationError::request(CURRENT_PRICE_MESSAGE))
        }
        _ => Ok(()),
    }
}
// endregion: --- Cross-field Rules

// region:    --- Field Rules
// 길이 / URL / 이메일 규칙은 각 쓰기 요청의 `#[derive(Validate)]` 에 선언되어 있다.

pub fn validate_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, "This field may not be blank."));
    }
    Ok(())
}

/// 소수 자릿수는 입력된 그대로 센다 (`10.500` 은 3 자리)
pub fn validate_price_format(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.scale() > PRICE_DECIMAL_PLACES {
        return Err(ValidationError::field(
            field,
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        ));
    }
    if value.abs().trunc() >= Decimal::from(10_i64.pow(PRICE_WHOLE_DIGITS)) {
        return Err(ValidationError::field(
            field,
            format!(
                "Ensure that there are no more than {PRICE_WHOLE_DIGITS} digits \
                 before the decimal point."
            ),
        ));
    }
    Ok(())
}

/// 필드 없음(None) 은 `required` 일 때만 오류, 명시적 null(Some(None)) 은 항상 오류
pub fn require<T>(
    field: &'static str,
    value: &Option<Option<T>>,
    required: bool,
) -> Result<(), ValidationError> {
    match value {
        None if required => Err(ValidationError::required(field)),
        Some(None) => Err(ValidationError::null(field)),
        _ => Ok(()),
    }
}
// endregion: --- Field Rules

// region:    --- Deserializers
/// 필드 없음(None) 과 명시적 null(Some(None)) 구분
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 빈 문자열은 값 없음으로 취급
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// `nullable` 과 같되 빈 문자열은 null 로 취급
pub fn nullable_blank<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_as_none(deserializer).map(Some)
}
// endregion: --- Deserializers

// endregion: --- Tests
