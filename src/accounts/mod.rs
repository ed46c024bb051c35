//! 사용자 (이벤트 작성자, 상품 소유자, 낙찰자)
// region:    --- Imports
use crate::auction::validation::{blank_as_none, nullable, require, validate_not_blank};
use crate::database::DatabaseManager;
use crate::error::{AppError, AppResult, ValidationError};
use crate::query::queries;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::info;
use validator::Validate;

// endregion: --- Imports

// region:    --- Model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

// 문자, 숫자, @ . + - _
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern"));

/// 사용자 생성 요청
#[derive(Debug, Deserialize, Validate, Clone, Default)]
pub struct UserWrite {
    #[serde(default, deserialize_with = "nullable")]
    #[validate(
        length(max = 150, message = "Ensure this field has no more than 150 characters."),
        regex(
            path = *USERNAME_RE,
            message = "Enter a valid username. This value may contain only letters, \
                       numbers, and @/./+/-/_ characters."
        )
    )]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(
        length(max = 254, message = "Ensure this field has no more than 254 characters."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_active: Option<Option<bool>>,
}

impl UserWrite {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username, true)?;
        require("is_active", &self.is_active, false)?;
        if let Some(Some(username)) = &self.username {
            validate_not_blank("username", username)?;
        }
        Validate::validate(self)?;
        Ok(())
    }
}
// endregion: --- Model

// region:    --- Commands
/// 사용자 생성
pub async fn create_user(db_manager: &DatabaseManager, cmd: UserWrite) -> AppResult<User> {
    cmd.validate()?;
    info!(
        "{:<12} --> 사용자 생성: {:?}",
        "Command",
        cmd.username.as_ref().and_then(|u| u.as_deref())
    );

    let user = sqlx::query_as::<_, User>(queries::INSERT_USER)
        .bind(cmd.username.flatten())
        .bind(cmd.email.unwrap_or_default())
        .bind(cmd.first_name)
        .bind(cmd.last_name)
        .bind(cmd.is_staff)
        .bind(cmd.is_active.flatten().unwrap_or(true))
        .fetch_one(db_manager.pool())
        .await?;
    Ok(user)
}

/// 사용자 삭제
pub async fn delete_user(db_manager: &DatabaseManager, user_id: i64) -> AppResult<()> {
    info!("{:<12} --> 사용자 삭제 id: {}", "Command", user_id);
    let result = sqlx::query(queries::DELETE_USER)
        .bind(user_id)
        .execute(db_manager.pool())
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound {
            entity: "User",
            id: user_id,
        });
    }
    Ok(())
}
// endregion: --- Commands

// endregion: --- Tests
