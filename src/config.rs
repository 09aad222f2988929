//! Environment-variable configuration.

/// Navigation cache configuration.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Whether the navigation cache is enabled (from CAMPUS_USE_CACHE).
    pub enabled: bool,
    /// Cache server URL (from CAMPUS_CACHE_URL).
    pub url: String,
}

impl CacheConfig {
    /// Load cache configuration from environment variables.
    pub fn from_env() -> Self {
        let enabled = std::env::var("CAMPUS_USE_CACHE")
            .map(|v| v == "true")
            .unwrap_or(false);

        let url = std::env::var("CAMPUS_CACHE_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        if !enabled {
            tracing::info!("Navigation cache disabled");
        }

        Self { enabled, url }
    }

    /// Create a config with the cache disabled (for local development/testing).
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            url: String::new(),
        }
    }

    /// Create a config pointing at a specific cache URL (for testing).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            url: url.into(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
