// region:    --- Imports
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::borrow::Cow;
use thiserror::Error;
use tracing::error;

// endregion: --- Imports

// region:    --- Validation Error
/// 검증 오류: 필드 단위 (`field` 있음) 또는 요청 전체 단위 (`field` 없음)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Option<Cow<'static, str>>,
    pub message: String,
}

impl ValidationError {
    pub fn field(field: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::field(field, "This field is required.")
    }

    pub fn null(field: &'static str) -> Self {
        Self::field(field, "This field may not be null.")
    }
}

/// `#[derive(Validate)]` 결과를 단일 필드 오류로 변환 (필드 이름순 첫 오류)
impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors
            .field_errors()
            .into_iter()
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .and_then(|(field, errs)| Some((field, errs.first()?)));

        match first {
            Some((field, err)) => {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                Self::field(field, message)
            }
            None => Self::request("Invalid input."),
        }
    }
}
// endregion: --- Validation Error

// region:    --- App Error
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match classify_constraint(&err) {
            Some(validation) => AppError::Validation(validation),
            None => AppError::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationError::request(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(ValidationError::request(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(ValidationError::request(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": err.message,
                    "code": "VALIDATION_ERROR",
                    "field": err.field,
                }),
            ),
            AppError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.to_string(), "code": "NOT_FOUND" }),
            ),
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Resource not found", "code": "NOT_FOUND" }),
            ),
            AppError::Database(err) => {
                error!("{:<12} --> 데이터베이스 오류: {:?}", "Error", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
// endregion: --- App Error

// region:    --- Constraint Classification
/// 스키마 제약 조건 위반을 검증 오류로 변환
///
/// 제약 이름은 `sql/01-create-schema.sql` 에 정의된 이름과 일치해야 한다.
fn classify_constraint(err: &sqlx::Error) -> Option<ValidationError> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let code = db_err.code();
    let constraint = db_err.constraint()?;
    constraint_violation(code.as_deref()?, constraint)
}

fn constraint_violation(code: &str, constraint: &str) -> Option<ValidationError> {
    match (code, constraint) {
        // check_violation
        ("23514", "ck_auction_events_window") => Some(ValidationError::request(
            crate::auction::validation::EVENT_WINDOW_MESSAGE,
        )),
        ("23514", "ck_auction_items_starting_price_positive") => Some(ValidationError::field(
            "starting_price",
            crate::auction::validation::STARTING_PRICE_MESSAGE,
        )),
        ("23514", "ck_auction_items_current_price_floor") => Some(ValidationError::request(
            crate::auction::validation::CURRENT_PRICE_MESSAGE,
        )),
        ("23514", "ck_auction_items_status") => {
            Some(ValidationError::field("status", "Not a valid choice."))
        }
        // foreign_key_violation
        ("23503", "fk_auction_events_created_by") => Some(invalid_pk("created_by")),
        ("23503", "fk_auction_items_auction_event") => Some(invalid_pk("auction_event")),
        ("23503", "fk_auction_items_owner") => Some(invalid_pk("owner")),
        ("23503", "fk_auction_items_sold_to") => Some(invalid_pk("sold_to")),
        // unique_violation
        ("23505", "uq_users_username") => Some(ValidationError::field(
            "username",
            "A user with that username already exists.",
        )),
        _ => None,
    }
}

fn invalid_pk(field: &'static str) -> ValidationError {
    ValidationError::field(field, "Invalid pk - object does not exist.")
}
// endregion: --- Constraint Classification

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let response =
            AppError::from(ValidationError::field("starting_price", "nope")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound {
            entity: "AuctionEvent",
            id: 7,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let response = AppError::from(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_database_errors_are_internal() {
        let response = AppError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn window_check_violation_becomes_request_level_error() {
        let err = constraint_violation("23514", "ck_auction_events_window").unwrap();
        assert_eq!(err.field, None);
        assert_eq!(err.message, "End datetime must be after start datetime.");
    }

    #[test]
    fn foreign_key_violation_names_the_field() {
        let err = constraint_violation("23503", "fk_auction_items_owner").unwrap();
        assert_eq!(err.field.as_deref(), Some("owner"));
    }

    #[test]
    fn derived_field_errors_keep_field_and_message() {
        let mut errors = validator::ValidationErrors::new();
        let mut zip = validator::ValidationError::new("length");
        zip.message = Some("Ensure this field has no more than 10 characters.".into());
        errors.add("zip_code", zip);
        errors.add("city", validator::ValidationError::new("length"));

        let err = ValidationError::from(errors);
        assert_eq!(err.field.as_deref(), Some("city"));
        assert_eq!(err.message, "Invalid value (length).");
    }

    #[test]
    fn null_error_names_the_field() {
        let err = ValidationError::null("name");
        assert_eq!(err.field.as_deref(), Some("name"));
        assert_eq!(err.message, "This field may not be null.");
    }

    #[test]
    fn unknown_constraints_are_not_classified() {
        assert!(constraint_violation("23514", "something_else").is_none());
        assert!(constraint_violation("40001", "ck_auction_events_window").is_none());
    }
}
// endregion: --- Tests
