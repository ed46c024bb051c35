// region:    --- Imports
use std::net::SocketAddr;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Config Error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}
// endregion: --- Config Error

// region:    --- Config
/// 서버 설정
///
/// | Env Var              | Default   |
/// |----------------------|-----------|
/// | `DATABASE_URL`       | required  |
/// | `HOST`               | `0.0.0.0` |
/// | `PORT`               | `3000`    |
/// | `DB_MAX_CONNECTIONS` | `5`       |
/// | `BODY_LIMIT_BYTES`   | `2097152` |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Config {
    /// 환경 변수에서 설정 로드 (`.env` 파일이 있으면 먼저 읽는다)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로부터 설정 생성
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", lookup("PORT"), 3000)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 5)?;
        let body_limit_bytes =
            parse_or("BODY_LIMIT_BYTES", lookup("BODY_LIMIT_BYTES"), 2 * 1024 * 1024)?;

        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            db_max_connections,
            body_limit_bytes,
        })
    }

    /// 바인딩 주소
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: self.host.clone(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
// endregion: --- Config

// endregion: --- Tests
