use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The API key comes from the environment (never hardcoded). The .env
/// file is loaded automatically at startup via dotenvy. A missing key
/// does not stop the server from booting; generation requests report it
/// as a configuration error instead.
pub struct Config {
    /// Gemini API key (GEMINI_API_KEY). Empty means unset.
    pub gemini_api_key: String,
    /// Gemini API root (defaults to the public v1 endpoint). Overridable
    /// for tests or proxies via GEMINI_API_URL.
    pub gemini_api_url: String,
    /// Model name used for generateContent (GEMINI_MODEL).
    pub gemini_model: String,
    /// Seconds between automatic carousel advances
    /// (VERSICULO_AUTOPLAY_SECS). Zero disables autoplay.
    pub autoplay_secs: u64,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default except the API key, which stays empty when absent.
    pub fn load() -> Result<Self> {
        let autoplay_secs = env::var("VERSICULO_AUTOPLAY_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8);

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| crate::gemini::client::DEFAULT_API_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            autoplay_secs,
        })
    }
}
