use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

use super::checkin::DEFAULT_INTERVAL_TICKS;
use super::contacts::SOS_NUMBER;

/// Application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Directory holding the dataset exports.
    pub data_dir: PathBuf,
    /// Number the auto-SOS escalation dials.
    #[serde(default = "default_emergency_number")]
    pub emergency_number: String,
    /// Whether the periodic "are you safe" check runs.
    #[serde(default = "default_checkin_enabled")]
    pub checkin_enabled: bool,
    /// Ticks between periodic safety checks.
    #[serde(default = "default_checkin_interval")]
    pub checkin_interval_ticks: u32,
}

fn default_emergency_number() -> String {
    SOS_NUMBER.to_string()
}

fn default_checkin_enabled() -> bool {
    true
}

fn default_checkin_interval() -> u32 {
    DEFAULT_INTERVAL_TICKS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("attached_assets"),
            emergency_number: default_emergency_number(),
            checkin_enabled: true,
            checkin_interval_ticks: DEFAULT_INTERVAL_TICKS,
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(app_config_dir: PathBuf) -> Self {
        Self {
            config_path: app_config_dir.join("settings.json"),
        }
    }

    pub fn load(&self) -> Settings {
        if self.config_path.exists() {
            if let Ok(content) = fs::read_to_string(&self.config_path) {
                if let Ok(settings) = serde_json::from_str(&content) {
                    return settings;
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)
    }
}
