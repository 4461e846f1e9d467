//! Server settings read from the environment.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Model used for dashboard insights unless `GEMINI_MODEL` says otherwise.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory holding `index.html`, `control.html`, and static assets.
    pub public_dir: PathBuf,
    /// Key injected into the dashboard pages; empty when unset.
    pub maps_api_key: String,
    /// Key for the generative-text API; the proxy is disabled without it.
    pub gemini_api_key: Option<String>,
    /// Generative model name.
    pub gemini_model: String,
    /// Upper bound on a single upstream call.
    pub gemini_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            maps_api_key: String::new(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_owned(),
            gemini_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(defaults.port),
            public_dir: non_empty("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            maps_api_key: lookup("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_timeout: non_empty("GEMINI_TIMEOUT_SECS")
                .and_then(|raw| raw.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.gemini_timeout),
        }
    }

    /// Address to bind, if `host` is a literal IP.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `host` is not an IP address.
    pub fn bind_address(&self) -> Result<SocketAddr, AddrParseError> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.maps_api_key, "");
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn values_are_read_and_bad_numbers_ignored() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_TIMEOUT_SECS", "soon"),
            ("GOOGLE_MAPS_API_KEY", "maps-key"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini_timeout, Duration::from_secs(30));
        assert_eq!(config.maps_api_key, "maps-key");

        let bad_port = config_from(&[("PORT", "http")]);
        assert_eq!(bad_port.port, 3000);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = config_from(&[("GEMINI_API_KEY", "  ")]);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn bind_address_combines_host_and_port() {
        let config = config_from(&[("HOST", "127.0.0.1"), ("PORT", "4000")]);
        assert_eq!(
            config.bind_address().expect("literal ip"),
            SocketAddr::from(([127, 0, 0, 1], 4000))
        );
    }
}
