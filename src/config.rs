//! Configuration for the query service
//!
//! Everything is sourced from the environment, matching how the service is
//! deployed: required Weaviate credentials plus optional per-provider keys
//! that are forwarded to the store as request headers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Weaviate chunk store configuration
    pub weaviate: WeaviateConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Weaviate Cloud connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaviateConfig {
    /// Cluster endpoint URL
    pub cluster_url: String,
    /// Weaviate API key (bearer credential)
    pub api_key: String,
    /// Generation provider key, forwarded as `X-Openai-Api-Key`
    pub openai_api_key: String,
    /// Embedding provider key, forwarded as `X-Voyageai-Api-Key` when set
    pub voyageai_api_key: Option<String>,
    /// Target collection name
    pub collection: String,
    /// Timeout for retrieval-only queries in seconds
    pub search_timeout_secs: u64,
    /// Timeout for pipelined retrieval + generation in seconds
    pub generate_timeout_secs: u64,
}

impl Default for WeaviateConfig {
    fn default() -> Self {
        Self {
            cluster_url: String::new(),
            api_key: String::new(),
            openai_api_key: String::new(),
            voyageai_api_key: None,
            collection: "ISODocuments".to_string(),
            search_timeout_secs: 30,
            generate_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// All required variables are checked up front so a single error lists
    /// everything that is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        const REQUIRED: &[&str] = &["WEAVIATE_URL", "WEAVIATE_API_KEY", "OPENAI_API_KEY"];

        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|key| lookup(key).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("PORT is not a valid port number: {raw}")))?,
            None => ServerConfig::default().port,
        };

        let defaults = WeaviateConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| ServerConfig::default().host),
                port,
            },
            weaviate: WeaviateConfig {
                cluster_url: lookup("WEAVIATE_URL").unwrap_or_default(),
                api_key: lookup("WEAVIATE_API_KEY").unwrap_or_default(),
                openai_api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
                voyageai_api_key: lookup("VOYAGEAI_APIKEY"),
                collection: lookup("WEAVIATE_COLLECTION").unwrap_or(defaults.collection),
                search_timeout_secs: parse_secs(
                    lookup("SEARCH_TIMEOUT_SECS"),
                    defaults.search_timeout_secs,
                )?,
                generate_timeout_secs: parse_secs(
                    lookup("GENERATE_TIMEOUT_SECS"),
                    defaults.generate_timeout_secs,
                )?,
            },
        })
    }
}

fn parse_secs(raw: Option<String>, default: u64) -> Result<u64> {
    match raw {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| Error::Config(format!("Invalid timeout value: {raw}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(vars: &HashMap<String, String>) -> Result<Config> {
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_required_vars_are_all_enumerated() {
        let err = load(&env(&[("WEAVIATE_URL", "https://x.weaviate.cloud")])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("WEAVIATE_API_KEY"));
        assert!(message.contains("OPENAI_API_KEY"));
        assert!(!message.contains("WEAVIATE_URL,"));
    }

    #[test]
    fn loads_with_defaults() {
        let config = load(&env(&[
            ("WEAVIATE_URL", "https://x.weaviate.cloud"),
            ("WEAVIATE_API_KEY", "wk"),
            ("OPENAI_API_KEY", "ok"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.weaviate.collection, "ISODocuments");
        assert_eq!(config.weaviate.search_timeout_secs, 30);
        assert_eq!(config.weaviate.generate_timeout_secs, 60);
        assert!(config.weaviate.voyageai_api_key.is_none());
    }

    #[test]
    fn optional_vars_override_defaults() {
        let config = load(&env(&[
            ("WEAVIATE_URL", "https://x.weaviate.cloud"),
            ("WEAVIATE_API_KEY", "wk"),
            ("OPENAI_API_KEY", "ok"),
            ("VOYAGEAI_APIKEY", "vk"),
            ("WEAVIATE_COLLECTION", "Manuals"),
            ("PORT", "9090"),
            ("GENERATE_TIMEOUT_SECS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.weaviate.collection, "Manuals");
        assert_eq!(config.weaviate.generate_timeout_secs, 120);
        assert_eq!(config.weaviate.voyageai_api_key.as_deref(), Some("vk"));
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = load(&env(&[
            ("WEAVIATE_URL", "https://x.weaviate.cloud"),
            ("WEAVIATE_API_KEY", "wk"),
            ("OPENAI_API_KEY", "ok"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
