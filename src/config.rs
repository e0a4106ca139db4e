use crate::api::PROCESS_PATH;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Deployment settings baked in at build time (`trunk build` environment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_filter: String,
}

impl AppConfig {
    pub fn new(api_base_url: &str, log_filter: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            log_filter: log_filter.trim().to_string(),
        }
    }

    /// Reads `SENTINEL_API_BASE_URL` and `SENTINEL_LOG` from the build environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SENTINEL_API_BASE_URL"),
            option_env!("SENTINEL_LOG"),
        )
    }

    fn from_values(base_url: Option<&str>, log_filter: Option<&str>) -> Self {
        let non_blank = |v: &&str| !v.trim().is_empty();
        Self::new(
            base_url.filter(non_blank).unwrap_or(DEFAULT_API_BASE_URL),
            log_filter.filter(non_blank).unwrap_or(DEFAULT_LOG_FILTER),
        )
    }

    pub fn process_url(&self) -> String {
        format!("{}{}", self.api_base_url, PROCESS_PATH)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
