use crate::structs::planning::WeekRollover;
use anyhow::{bail, Context};
use std::{env::var, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub week_rollover: WeekRollover,
}

impl AppConfig {
    /// 讀環境變數 (呼叫前先 dotenvy::dotenv)
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("找不到 DATABASE_URL")?;

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("APP_PORT", 3000)?,
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            cors_origins: split_origins(
                &var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 10)?),
            week_rollover: parse_rollover(
                &var("WEEK_ROLLOVER").unwrap_or_else(|_| "fixed52".to_string()),
            )?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} 格式錯誤: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_rollover(raw: &str) -> anyhow::Result<WeekRollover> {
    match raw.trim().to_lowercase().as_str() {
        "fixed52" => Ok(WeekRollover::Fixed52),
        "iso" => Ok(WeekRollover::Iso),
        other => bail!("WEEK_ROLLOVER 只接受 fixed52 或 iso: {}", other),
    }
}
