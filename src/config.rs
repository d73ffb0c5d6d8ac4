use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_RECOMMENDATION_COUNT: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub recommendation_count: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Apply command line overrides on top of the environment
    pub fn with_overrides(mut self, api_url: Option<String>, count: Option<u32>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(n) = count {
            self.recommendation_count = n;
        }
        self
    }
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let defaults = Config::default();

    let api_url = lookup("SOUNDSCOPE_API_URL")
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or(defaults.api_url);

    let recommendation_count = match lookup("SOUNDSCOPE_RECOMMENDATIONS") {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("SOUNDSCOPE_RECOMMENDATIONS is not a count: '{raw}'"))?,
        None => defaults.recommendation_count,
    };

    let timeout_secs = match lookup("SOUNDSCOPE_TIMEOUT_SECS") {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("SOUNDSCOPE_TIMEOUT_SECS is not a number: '{raw}'"))?,
        None => defaults.timeout_secs,
    };

    Ok(Config {
        api_url,
        recommendation_count,
        timeout_secs,
    })
}
