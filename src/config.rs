use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub appdir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

/// Movie catalog API settings. The api key lives here and nowhere else.
#[derive(Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(alias = "apikey")]
    pub api_key: String,
    #[serde(alias = "apiurl", default = "default_api_url")]
    pub api_url: String,
    #[serde(alias = "imagebase", default = "default_image_base")]
    pub image_base: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(alias = "timeout", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Keep the credential out of debug output.
impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("image_base", &self.image_base)
            .field("language", &self.language)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: default_api_url(),
            image_base: default_image_base(),
            language: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p/w1280".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    pub fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        config.tmdb.api_url = config.tmdb.api_url.trim_end_matches('/').to_string();
        config.tmdb.image_base = config.tmdb.image_base.trim_end_matches('/').to_string();
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("tmdb.api_key must not be empty".to_string()));
        }
        if self.tmdb.api_url.is_empty() {
            return Err(ConfigError::Invalid("tmdb.api_url must not be empty".to_string()));
        }
        if self.listen.tlscert.is_some() != self.listen.tlskey.is_some() {
            return Err(ConfigError::Invalid(
                "listen.tlscert and listen.tlskey must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_yaml("test.yaml", "tmdb:\n  api_key: abc\n").unwrap();
        assert_eq!(config.listen.port, "8080");
        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.api_url, "https://api.themoviedb.org");
        assert_eq!(config.tmdb.image_base, "https://image.tmdb.org/t/p/w1280");
        assert_eq!(config.tmdb.timeout(), Duration::from_secs(30));
        assert!(config.appdir.is_none());
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let yaml = "tmdb:\n  apikey: abc\n  apiurl: http://localhost:9000/\n  imagebase: http://img/w500/\n";
        let config = Config::from_yaml("test.yaml", yaml).unwrap();
        assert_eq!(config.tmdb.api_url, "http://localhost:9000");
        assert_eq!(config.tmdb.image_base, "http://img/w500");
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = Config::from_yaml("test.yaml", "tmdb:\n  api_key: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_tmdb_section_is_a_parse_error() {
        let err = Config::from_yaml("test.yaml", "listen:\n  port: \"9000\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(..)));
    }

    #[test]
    fn test_tls_requires_cert_and_key() {
        let yaml = "listen:\n  tlscert: cert.pem\ntmdb:\n  api_key: abc\n";
        let err = Config::from_yaml("test.yaml", yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let tmdb = TmdbConfig::new("secret-key");
        let out = format!("{:?}", tmdb);
        assert!(!out.contains("secret-key"));
        assert!(out.contains("<redacted>"));
    }
}
