use log::LevelFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Application configuration. A WASM bundle has no process environment, so
/// values are baked in at build time from `FINFLOW_*` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LevelFilter,
    /// Rows shown by the compact recent-transactions list
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_level: LevelFilter::Info,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("FINFLOW_API_URL"),
            option_env!("FINFLOW_LOG_LEVEL"),
            option_env!("FINFLOW_RECENT_LIMIT"),
        )
    }

    /// Build a configuration from optional raw values, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>, recent_limit: Option<&str>) -> Self {
        let defaults = Self::default();

        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.api_base_url);

        let log_level = log_level.and_then(parse_level).unwrap_or(defaults.log_level);

        let recent_limit = recent_limit
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.recent_limit);

        Self {
            api_base_url,
            log_level,
            recent_limit,
        }
    }
}

pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_use_defaults() {
        assert_eq!(AppConfig::from_values(None, None, None), AppConfig::default());
    }

    #[test]
    fn api_url_loses_trailing_slash() {
        let config = AppConfig::from_values(Some("https://api.finflow.app/"), None, None);
        assert_eq!(config.api_base_url, "https://api.finflow.app");
    }

    #[test]
    fn blank_or_invalid_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("loud"), Some("0"));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn log_levels_parse_case_insensitively() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("warning"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("verbose"), None);
    }
}
