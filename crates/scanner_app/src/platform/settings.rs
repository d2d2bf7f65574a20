use std::fs;
use std::path::Path;
use std::time::Duration;

use scanner_core::Language;
use scanner_engine::AnalystSettings;
use scanner_logging::{scan_warn, LogDestination};
use serde::{Deserialize, Serialize};

pub(crate) const SETTINGS_FILENAME: &str = "scanner.ron";

/// Environment variable holding the inference-service bearer token. The key
/// never lives in the settings file.
const API_KEY_ENV: &str = "SCANNER_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub endpoint: String,
    pub model: String,
    pub language: LanguageSetting,
    pub log: LogSetting,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageSetting {
    En,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogSetting {
    File,
    Terminal,
    Both,
}

impl Default for Settings {
    fn default() -> Self {
        let analyst = AnalystSettings::default();
        Self {
            endpoint: analyst.endpoint,
            model: analyst.model,
            language: LanguageSetting::Id,
            log: LogSetting::File,
            request_timeout_secs: analyst.request_timeout.as_secs(),
        }
    }
}

impl Settings {
    pub fn analyst_settings(&self) -> AnalystSettings {
        AnalystSettings {
            endpoint: self.endpoint.clone(),
            api_key: std::env::var(API_KEY_ENV).ok(),
            model: self.model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..AnalystSettings::default()
        }
    }

    pub fn language(&self) -> Language {
        match self.language {
            LanguageSetting::En => Language::En,
            LanguageSetting::Id => Language::Id,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogSetting::File => LogDestination::File,
            LogSetting::Terminal => LogDestination::Terminal,
            LogSetting::Both => LogDestination::Both,
        }
    }
}

/// Loads settings from `path`, falling back to defaults when the file is
/// missing or malformed.
pub(crate) fn load(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            scan_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            scan_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

/// Writes settings as pretty RON. Used to seed a settings file the user can
/// edit.
pub(crate) fn save(path: &Path, settings: &Settings) -> std::io::Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(settings, pretty)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?;
    fs::write(path, content)
}
