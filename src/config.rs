//! Service configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Service configuration, read from `LATENCY_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Telemetry dataset (JSON array of samples)
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub log_json: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_data_path() -> PathBuf {
    PathBuf::from("q-vercel-latency.json")
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_path: default_data_path(),
            log_json: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("LATENCY").try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder().add_source(source).build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        config::Environment::with_prefix("LATENCY")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServiceConfig::from_source(env(&[])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.data_path, PathBuf::from("q-vercel-latency.json"));
        assert!(!config.log_json);
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = ServiceConfig::from_source(env(&[
            ("LATENCY_BIND_ADDR", "127.0.0.1:8080"),
            ("LATENCY_DATA_PATH", "/srv/telemetry.json"),
            ("LATENCY_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.data_path, PathBuf::from("/srv/telemetry.json"));
        assert!(config.log_json);
    }

    #[test]
    fn malformed_value_is_an_error() {
        assert!(ServiceConfig::from_source(env(&[("LATENCY_LOG_JSON", "sometimes")])).is_err());
    }
}
