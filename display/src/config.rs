#[cfg(not(target_arch = "wasm32"))]
use crate::error::{DisplayError, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8089";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Origin the `/api/...` paths are resolved against.
    pub base_url: String,
    pub clock_interval: Duration,
    /// Class marking the elements that show the clock.
    pub time_class: String,
    /// Id of the element whose `data-value` says whether the route branches.
    pub branch_flag_id: String,
    pub request_timeout: Duration,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            clock_interval: Duration::from_secs(60),
            time_class: "time".to_string(),
            branch_flag_id: "has-branches".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl DisplayConfig {
    /// Config for a page served from `origin`.
    pub fn for_origin(origin: impl Into<String>) -> Self {
        Self {
            base_url: origin.into(),
            ..Self::default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let base_url = dotenvy::var("DISPLAY_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DisplayError::Config(format!(
                "DISPLAY_BASE_URL must be an http(s) URL, got {base_url}"
            )));
        }

        let clock_interval = parse_env_secs("CLOCK_INTERVAL_SECS", 60)?;
        let request_timeout = parse_env_secs("REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            base_url,
            clock_interval,
            request_timeout,
            ..defaults
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_env_secs(key: &str, default: u64) -> Result<Duration> {
    let secs = dotenvy::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .map_err(|_| DisplayError::Config(format!("Invalid {key}")))?;

    if secs == 0 {
        return Err(DisplayError::Config(format!("{key} must be positive")));
    }

    Ok(Duration::from_secs(secs))
}
