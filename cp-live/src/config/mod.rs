//! Process configuration loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:cp-live.db?mode=rwc";
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
const DEFAULT_LIVE_VIDEO_DURATION_HOURS: u64 = 6;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub check_interval: Duration,
    /// Maximum length of a live session before the expiry guard clears it.
    pub live_duration: Duration,
    pub http_timeout: Duration,
    /// Directory for rolling log files; stdout only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            live_duration: Duration::from_secs(DEFAULT_LIVE_VIDEO_DURATION_HOURS * 3600),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let check_interval_secs: u64 =
            parse_var(&var, "CP_LIVE_CHECK_INTERVAL_SECS", DEFAULT_CHECK_INTERVAL_SECS)?;
        if check_interval_secs == 0 {
            return Err(Error::config("CP_LIVE_CHECK_INTERVAL_SECS must be greater than 0"));
        }
        let duration_hours: u64 = parse_var(
            &var,
            "CP_LIVE_VIDEO_DURATION_HOURS",
            DEFAULT_LIVE_VIDEO_DURATION_HOURS,
        )?;
        let http_timeout_secs: u64 =
            parse_var(&var, "CP_LIVE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            check_interval: Duration::from_secs(check_interval_secs),
            live_duration: Duration::from_secs(duration_hours.saturating_mul(3600)),
            http_timeout: Duration::from_secs(http_timeout_secs),
            log_dir: var("CP_LIVE_LOG_DIR").map(PathBuf::from),
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("invalid {key}={raw:?}: {e}"))),
    }
}
