use crate::constants::*;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rank_limit: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    /// Optional catalog file. The embedded catalog is used when absent.
    pub catalog_path: Option<String>,
    pub generation: GenerationConfig,
}

/// Knobs for the generative itinerary service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Absent credentials disable the generative tier without failing startup.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Hard ceiling on one call, in seconds
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: DEFAULT_GEMINI_TEMPERATURE,
            max_output_tokens: DEFAULT_GEMINI_MAX_OUTPUT_TOKENS,
            timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}

impl GenerationConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let timeout_secs: u64 = env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults.timeout_secs.to_string())
            .parse()
            .map_err(|_| "Invalid GENERATION_TIMEOUT_SECS")?;

        if !(1..=120).contains(&timeout_secs) {
            return Err("GENERATION_TIMEOUT_SECS must be between 1 and 120 seconds".to_string());
        }

        let temperature: f32 = env::var("GEMINI_TEMPERATURE")
            .unwrap_or_else(|_| defaults.temperature.to_string())
            .parse()
            .map_err(|_| "Invalid GEMINI_TEMPERATURE")?;

        if !(0.0..=2.0).contains(&temperature) {
            return Err("GEMINI_TEMPERATURE must be between 0.0 and 2.0".to_string());
        }

        Ok(Self {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            temperature,
            max_output_tokens: env::var("GEMINI_MAX_OUTPUT_TOKENS")
                .unwrap_or_else(|_| defaults.max_output_tokens.to_string())
                .parse()
                .map_err(|_| "Invalid GEMINI_MAX_OUTPUT_TOKENS")?,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let rank_limit: usize = env::var("RANK_LIMIT")
            .unwrap_or_else(|_| DEFAULT_RANK_LIMIT.to_string())
            .parse()
            .map_err(|_| "Invalid RANK_LIMIT")?;

        if rank_limit == 0 {
            return Err("RANK_LIMIT must be at least 1".to_string());
        }

        let rate_limit_max_requests: u32 = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_MAX_REQUESTS.to_string())
            .parse()
            .map_err(|_| "Invalid RATE_LIMIT_MAX_REQUESTS")?;

        if rate_limit_max_requests == 0 {
            return Err("RATE_LIMIT_MAX_REQUESTS must be at least 1".to_string());
        }

        let rate_limit_window_secs: u64 = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_WINDOW_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid RATE_LIMIT_WINDOW_SECS")?;

        if rate_limit_window_secs == 0 {
            return Err("RATE_LIMIT_WINDOW_SECS must be at least 1".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            rank_limit,
            rate_limit_max_requests,
            rate_limit_window_secs,
            catalog_path: env::var("CATALOG_PATH").ok(),
            generation: GenerationConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}
