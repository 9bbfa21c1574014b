use crate::cell::CellWidth;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub last_host: Option<String>,
    #[serde(default)]
    pub default_width: CellWidth,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_theme() -> String {
    "Dark".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_host: None,
            default_width: CellWidth::Byte,
            request_timeout_ms: default_timeout_ms(),
            theme: default_theme(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "memview")
}

/// Default location of the viewer's log file.
pub fn default_log_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_local_dir().join("memview.log"),
        None => std::env::temp_dir().join("memview.log"),
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn load() -> Self {
        match project_dirs() {
            Some(dirs) => Self::load_from(&dirs.config_dir().join("config.json")),
            None => Self::default(),
        }
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists()
            && let Ok(data) = std::fs::read_to_string(path)
            && let Ok(settings) = serde_json::from_str(&data)
        {
            return settings;
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(dirs) = project_dirs() {
            self.save_to(&dirs.config_dir().join("config.json"))?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
