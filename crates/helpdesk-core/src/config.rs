use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default cap on transcript reads when the caller does not pass one.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Top-level config (helpdesk.toml + HELPDESK_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub transcripts: TranscriptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Where the topic records come from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeConfig {
    /// Optional TOML file with operator-authored topic records.
    /// When absent the built-in knowledge base is used.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Maximum messages returned by a history read unless overridden per call.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.helpdesk/helpdesk.db", home)
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.helpdesk/helpdesk.toml", home)
}

impl HelpdeskConfig {
    /// Load config from a TOML file with HELPDESK_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.helpdesk/helpdesk.toml
    ///
    /// A missing file is not an error — every section has defaults, so the
    /// env-only (or all-default) configuration is valid.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: HelpdeskConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("HELPDESK_").split("_"))
            .extract()
            .map_err(|e| crate::error::HelpdeskError::Config(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = HelpdeskConfig::default();
        assert!(config.database.path.ends_with("helpdesk.db"));
        assert!(config.knowledge.path.is_none());
        assert_eq!(config.transcripts.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let config: HelpdeskConfig = Figment::new()
            .merge(Toml::string("[database]\npath = \"/tmp/desk.db\"\n"))
            .extract()
            .unwrap();
        assert_eq!(config.database.path, "/tmp/desk.db");
        assert_eq!(config.transcripts.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
