use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "wordrush") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wordrush_config.json")
        }
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("wordrush")
                .join("wordrush.log")
        } else if let Some(pd) = ProjectDirs::from("", "", "wordrush") {
            pd.data_local_dir().join("wordrush.log")
        } else {
            PathBuf::from("wordrush.log")
        }
    }
}
