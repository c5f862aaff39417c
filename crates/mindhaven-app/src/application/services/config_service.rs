use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::config::EngagementConfig;

const CONFIG_FILE_NAME: &str = "engagement_config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Engagement configuration service.
///
/// The config is read once at startup; only the log level can be changed at
/// runtime, and like every other persisted change it takes effect on the next
/// start.
pub struct ConfigService {
    log_level: Arc<AtomicU8>,
    config: EngagementConfig,
    config_path: PathBuf,
}

impl ConfigService {
    /// `<platform config dir>/mindhaven`
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mindhaven"))
    }

    /// Load `engagement_config.json` from `config_dir`.
    ///
    /// A missing file, unparsable JSON or invalid values all fall back to the
    /// defaults.
    pub fn new(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<EngagementConfig>(&content).unwrap_or_default()
        } else {
            EngagementConfig::default()
        };

        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Invalid engagement config, using defaults: {}", e);
                EngagementConfig::default()
            }
        };

        info!("📁 Config loaded from: {:?}", config_path);
        info!(
            "🔧 Engagement config: utc_offset_minutes={} log_level={}",
            config.utc_offset_minutes,
            config.log_level.as_str()
        );

        Ok(Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            config,
            config_path,
        })
    }

    /// Defaults only, nothing persisted.
    pub fn in_memory(config: EngagementConfig) -> Self {
        Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            config,
            config_path: PathBuf::new(),
        }
    }

    pub fn engagement(&self) -> &EngagementConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get current log level
    pub fn get_log_level(&self) -> LogLevel {
        let value = self.log_level.load(Ordering::Relaxed);
        LogLevel::from_u8(value)
    }

    /// Set log level and persist to disk
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        info!("🔧 Changing log level to: {}", level.as_str());
        self.log_level.store(level as u8, Ordering::Relaxed);

        self.persist(&EngagementConfig {
            log_level: level,
            ..self.config.clone()
        })?;

        info!("⚠️  Log level will take effect on next restart");
        Ok(())
    }

    /// Validate and persist a new engagement config for the next start.
    pub fn save(&self, config: &EngagementConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Refusing to save invalid config: {}", e))?;
        self.persist(config)
    }

    fn persist(&self, config: &EngagementConfig) -> Result<()> {
        if self.config_path.as_os_str().is_empty() {
            return Ok(());
        }
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        info!("💾 Engagement config saved to: {:?}", self.config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::from_u8(1), LogLevel::Error);
        assert_eq!(LogLevel::from_u8(3), LogLevel::Info);
        assert_eq!(LogLevel::from_u8(5), LogLevel::Trace);
        assert_eq!(LogLevel::from_u8(99), LogLevel::Info);
    }

    #[test]
    fn test_log_level_string() {
        assert_eq!(LogLevel::Error.as_str(), "error");
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path()).unwrap();
        assert_eq!(service.engagement(), &EngagementConfig::default());
        assert_eq!(service.get_log_level(), LogLevel::Info);
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let service = ConfigService::new(dir.path()).unwrap();
        assert_eq!(service.engagement(), &EngagementConfig::default());
    }

    #[test]
    fn test_invalid_values_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "max_write_attempts": 0 }"#,
        )
        .unwrap();

        let service = ConfigService::new(dir.path()).unwrap();
        assert_eq!(service.engagement().max_write_attempts, 3);
    }

    #[test]
    fn test_set_log_level_persists_for_next_start() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path()).unwrap();

        service.set_log_level(LogLevel::Debug).unwrap();
        assert_eq!(service.get_log_level(), LogLevel::Debug);

        let reloaded = ConfigService::new(dir.path()).unwrap();
        assert_eq!(reloaded.get_log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path()).unwrap();

        let bad = EngagementConfig {
            task_completion_points: 0,
            ..EngagementConfig::default()
        };
        assert!(service.save(&bad).is_err());
    }
}
