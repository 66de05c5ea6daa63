use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    /// hourly | daily | never
    pub rotation: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "benefit-transfer.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

/// Where the benefit directory lives and how its routes are named
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub benefits_path: String,
    pub transfer_segment: String,
    pub active_segment: String,
    pub request_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            benefits_path: "/benefits".to_string(),
            transfer_segment: "transfer".to_string(),
            active_segment: "active".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl DirectoryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Path segment preceding the origin id in the screen location
    pub listing_segment: String,
    /// Upper bound for one transfer call; the submit guard is released after it
    pub submit_timeout_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            listing_segment: "benefits".to_string(),
            submit_timeout_ms: 30_000,
        }
    }
}

impl WorkflowConfig {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(&format!("config/{}.yaml", env))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_deserialize() {
        let yaml = r#"
log:
  log_level: "debug"
  log_dir: "./logs"
  log_file: "transfer.log"
  use_json: true
  rotation: "hourly"
directory:
  base_url: "http://localhost:8080"
  benefits_path: "/api/beneficios"
  transfer_segment: "transferir"
  active_segment: "ativos"
workflow:
  listing_segment: "beneficios"
  submit_timeout_ms: 15000
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log.log_level, "debug");
        assert!(config.log.use_json);
        assert_eq!(config.directory.benefits_path, "/api/beneficios");
        assert_eq!(config.directory.transfer_segment, "transferir");
        // Omitted keys fall back to defaults
        assert_eq!(config.directory.request_timeout_ms, 10_000);
        assert_eq!(config.workflow.listing_segment, "beneficios");
        assert_eq!(config.workflow.submit_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_empty_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.directory.benefits_path, "/benefits");
        assert_eq!(config.workflow.submit_timeout_ms, 30_000);
        assert_eq!(config.log.rotation, "daily");
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("config/does-not-exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_repository_configs_parse() {
        for env in ["dev", "pt-br"] {
            let path = format!("{}/config/{}.yaml", env!("CARGO_MANIFEST_DIR"), env);
            AppConfig::from_file(&path).unwrap();
        }
    }
}
