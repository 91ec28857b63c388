use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Runtime configuration for the mock server.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// bind_addr = "127.0.0.1:8080"
/// default_content_type = "text/plain"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Content type stored when a request carries none.
    pub default_content_type: String,
    /// Content type stored for every request, whatever it carries.
    pub override_content_type: Option<String>,
    /// Largest request body accepted, in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 80)),
            default_content_type: "application/json".to_string(),
            override_content_type: None,
            max_body_size: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// The override content type, if one is configured and non-empty.
    pub fn override_content_type(&self) -> Option<&str> {
        self.override_content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "0.0.0.0:80".parse::<SocketAddr>().unwrap());
        assert_eq!(c.default_content_type, "application/json");
        assert!(c.override_content_type.is_none());
        assert_eq!(c.max_body_size, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(r#"bind_addr = "127.0.0.1:8080""#).unwrap();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.default_content_type, "application/json");
    }

    #[test]
    fn full_toml() {
        let text = r#"
            bind_addr = "127.0.0.1:9000"
            default_content_type = "text/plain"
            override_content_type = "text/csv"
            max_body_size = 1024
        "#;
        let c = ServerConfig::from_toml_str(text).unwrap();
        assert_eq!(c.default_content_type, "text/plain");
        assert_eq!(c.override_content_type(), Some("text/csv"));
        assert_eq!(c.max_body_size, 1024);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn empty_override_is_ignored() {
        let c = ServerConfig {
            override_content_type: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(c.override_content_type(), None);
    }

    #[test]
    fn toml_round_trip_through_file() {
        let original = ServerConfig {
            override_content_type: Some("text/csv".into()),
            ..Default::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(original.to_toml_string().unwrap().as_bytes()).unwrap();

        let loaded = ServerConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ServerConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
