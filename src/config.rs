use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::reshuffle::{IdlePolicy, DEFAULT_IDLE_THRESHOLD_MS, DEFAULT_RESHUFFLE_INTERVAL_MS};
use crate::session::{SessionConfig, DEFAULT_DISPLAY_SIZE};

pub const DEFAULT_CLOCK_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display_size: usize,
    pub idle_threshold_ms: u64,
    pub reshuffle_interval_ms: u64,
    pub clock_interval_ms: u64,
    pub word_list: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_size: DEFAULT_DISPLAY_SIZE,
            idle_threshold_ms: DEFAULT_IDLE_THRESHOLD_MS,
            reshuffle_interval_ms: DEFAULT_RESHUFFLE_INTERVAL_MS,
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
            word_list: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.display_size == 0 {
            return Err(Error::InvalidConfig(
                "display size must be at least 1".to_string(),
            ));
        }
        if self.reshuffle_interval_ms == 0 || self.clock_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "timer intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            display_size: self.display_size,
            idle: IdlePolicy {
                threshold: Duration::from_millis(self.idle_threshold_ms),
                period: self.reshuffle_interval(),
            },
        }
    }

    pub fn reshuffle_interval(&self) -> Duration {
        Duration::from_millis(self.reshuffle_interval_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("ignoring unreadable config {}: {}", self.path.display(), e),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            display_size: 8,
            idle_threshold_ms: 1_000,
            reshuffle_interval_ms: 2_000,
            clock_interval_ms: 250,
            word_list: Some(PathBuf::from("/tmp/words.txt")),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"display_size": 3}"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.display_size, 3);
        assert_eq!(cfg.idle_threshold_ms, DEFAULT_IDLE_THRESHOLD_MS);
    }

    #[test]
    fn validate_rejects_zero_values() {
        let cfg = Config {
            display_size: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(Error::InvalidConfig(_)));

        let cfg = Config {
            clock_interval_ms: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(Error::InvalidConfig(_)));

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn session_config_carries_timings() {
        let cfg = Config {
            display_size: 7,
            idle_threshold_ms: 1_500,
            reshuffle_interval_ms: 4_000,
            ..Config::default()
        };
        let sc = cfg.session_config();
        assert_eq!(sc.display_size, 7);
        assert_eq!(sc.idle.threshold, Duration::from_millis(1_500));
        assert_eq!(sc.idle.period, Duration::from_millis(4_000));
        assert_eq!(cfg.clock_interval(), Duration::from_secs(1));
    }
}
