use std::env::var;
use tracing::{debug, warn};

/// The public Medium host. The API path is appended to it.
pub const DEFAULT_API_ORIGIN: &str = "https://medium.com";

pub struct Config {
    /// Scheme and host of the metadata API without a trailing slash, e.g. https://medium.com
    pub api_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_origin: DEFAULT_API_ORIGIN.to_owned(),
        }
    }
}

impl Config {
    /// Creates a new Config instance from environment variables and defaults.
    /// Does not panic.
    pub fn from_env() -> Self {
        let api_origin = match var("MEDIUM_API_ORIGIN") {
            Ok(v) if !v.trim().is_empty() => {
                warn!("Using MEDIUM_API_ORIGIN={v} instead of {DEFAULT_API_ORIGIN}");
                v
            }
            _ => DEFAULT_API_ORIGIN.to_owned(),
        };

        let config = Self::with_origin(&api_origin);
        debug!("API origin: {}", config.api_origin);
        config
    }

    /// Creates a config pointing at a different host, e.g. a local stand-in for the API.
    pub fn with_origin(api_origin: &str) -> Self {
        Self {
            api_origin: api_origin.trim().trim_end_matches('/').to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_normalised() {
        assert_eq!(Config::with_origin(" http://127.0.0.1:9002/ ").api_origin, "http://127.0.0.1:9002");
    }

    #[test]
    fn default_origin_is_medium() {
        assert_eq!(Config::default().api_origin, "https://medium.com");
    }
}
