use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Site origin used when no other is configured
pub const DEFAULT_ORIGIN: &str = "https://allpoetry.com";

/// Configuration for the poetry client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Scheme and host every listing and detail URL is built on
    #[serde(default = "default_origin")]
    pub origin: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop paginating with an error after this many pages (None = no cap)
    #[serde(default = "default_max_pages")]
    pub max_pages: Option<u32>,

    /// Account to log in with. Anonymous sessions only see the first
    /// listing pages of an author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> Option<u32> {
    Some(10_000)
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            origin: default_origin(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_pages: default_max_pages(),
            username: None,
            password: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Credentials, when both halves are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if url::Url::parse(&self.origin).is_err() {
            return Err(Error::Config(format!("origin is not a URL: {}", self.origin)));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        if self.max_pages == Some(0) {
            return Err(Error::Config(
                "max_pages must be positive, use null for no cap".to_string(),
            ));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(Error::Config(
                "username and password must be given together".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.origin, "https://allpoetry.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_pages, Some(10_000));
        assert!(config.user_agent.starts_with("poem-yield/"));
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = Config::from_json(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.max_pages, Some(10_000));
    }

    #[test]
    fn test_from_json_disables_page_cap() {
        let config = Config::from_json(r#"{"max_pages": null}"#).unwrap();
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn test_from_json_credentials() {
        let config =
            Config::from_json(r#"{"username": "keats", "password": "urn"}"#).unwrap();
        assert_eq!(config.credentials(), Some(("keats", "urn")));

        let err = Config::from_json(r#"{"username": "keats"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{"origin": "allpoetry"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"timeout_secs": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_zero_page_cap() {
        let err = Config::from_json(r#"{"max_pages": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = Config::from_json(r#"{"max_pages": 1}"#).unwrap();
        assert_eq!(config.max_pages, Some(1));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
