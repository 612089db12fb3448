//! Build-time configuration.
//!
//! The app is shipped as a static bundle, so settings are read from the
//! environment when the crate is compiled, e.g.
//! `ACCOUNTING_API_URL=https://api.example.com trunk build --release`.

use std::str::FromStr;

use tracing::Level;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_USER_NAME: &str = "Suricato";
pub const FIRST_SELECTABLE_YEAR: i32 = 2020;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the transaction service, without a trailing slash.
    pub api_base_url: String,
    /// Name shown in the header greeting.
    pub user_name: String,
    /// Most verbose level forwarded to the browser console.
    pub log_level: Level,
    /// Earliest year offered by the year selector.
    pub first_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            log_level: Level::INFO,
            first_year: FIRST_SELECTABLE_YEAR,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("ACCOUNTING_API_URL"),
            option_env!("ACCOUNTING_USER_NAME"),
            option_env!("ACCOUNTING_LOG_LEVEL"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        user_name: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.api_base_url);

        let user_name = user_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.user_name);

        let log_level = log_level
            .and_then(|level| Level::from_str(level.trim()).ok())
            .unwrap_or(defaults.log_level);

        Self {
            api_base_url,
            user_name,
            log_level,
            first_year: defaults.first_year,
        }
    }
}
