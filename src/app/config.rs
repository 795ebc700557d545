use crate::app::cli::SettingsOverrides;
use crate::app::naming::DEFAULT_TIMESTAMP_FORMAT;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const MIN_RANDOM_LENGTH: usize = 1;
pub const MAX_RANDOM_LENGTH: usize = 32;
const DEFAULT_RANDOM_LENGTH: usize = 6;
const DEFAULT_RANDOM_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Serialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuffixStrategy {
    #[default]
    Timestamp,
    Random,
}

/// Effective configuration. Always normalized: `random_length` lies in
/// `[MIN_RANDOM_LENGTH, MAX_RANDOM_LENGTH]` and `random_chars` is non-empty.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host cosmetic flag, carried along so saving keeps it.
    pub show_ribbon_icon: bool,
    pub include_directory_context: bool,
    pub filename_suffix: SuffixStrategy,
    pub timestamp_format: String,
    pub random_length: usize,
    pub random_chars: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_ribbon_icon: true,
            include_directory_context: false,
            filename_suffix: SuffixStrategy::Timestamp,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            random_length: DEFAULT_RANDOM_LENGTH,
            random_chars: DEFAULT_RANDOM_CHARS.to_string(),
        }
    }
}

impl Settings {
    /// Merges persisted values over the defaults, field by field.
    /// Missing or mistyped entries keep their default.
    pub fn from_table(table: &Table) -> Self {
        let defaults = Self::default();

        let bool_field = |key: &str, default: bool| {
            table.get(key).and_then(Value::as_bool).unwrap_or(default)
        };
        let str_field = |key: &str| table.get(key).and_then(Value::as_str);

        let filename_suffix = match str_field("filename_suffix") {
            Some(name) => <SuffixStrategy as ValueEnum>::from_str(name, false)
                .ok()
                .unwrap_or_else(|| {
                    log::warn!("Unknown filename_suffix '{}', using timestamp", name);
                    defaults.filename_suffix
                }),
            None => defaults.filename_suffix,
        };

        let random_length = table
            .get("random_length")
            .and_then(Value::as_integer)
            .map(clamp_random_length)
            .unwrap_or(defaults.random_length);

        Self {
            show_ribbon_icon: bool_field("show_ribbon_icon", defaults.show_ribbon_icon),
            include_directory_context: bool_field(
                "include_directory_context",
                defaults.include_directory_context,
            ),
            filename_suffix,
            timestamp_format: str_field("timestamp_format")
                .map(String::from)
                .unwrap_or(defaults.timestamp_format),
            random_length,
            random_chars: str_field("random_chars")
                .map(String::from)
                .unwrap_or(defaults.random_chars),
        }
        .normalized()
    }

    /// Re-establishes the invariants after any mutation.
    pub fn normalized(mut self) -> Self {
        self.random_length = self
            .random_length
            .clamp(MIN_RANDOM_LENGTH, MAX_RANDOM_LENGTH);
        if self.random_chars.is_empty() {
            self.random_chars = DEFAULT_RANDOM_CHARS.to_string();
        }
        self
    }

    /// Loads settings from `path`. A missing file yields the defaults, and so
    /// does a file that cannot be read or parsed (with a warning).
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings at {}", path.display()))
            .and_then(|content| {
                toml::from_str::<Table>(&content).context("Failed to parse settings file")
            });

        match parsed {
            Ok(table) => Self::from_table(&table),
            Err(err) => {
                log::warn!("{:#}; using default settings", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(include) = overrides.include_directory_context() {
            self.include_directory_context = include;
        }
        if let Some(strategy) = overrides.suffix {
            self.filename_suffix = strategy;
        }
        if let Some(format) = &overrides.timestamp_format {
            self.timestamp_format = format.clone();
        }
        if let Some(length) = overrides.random_length {
            self.random_length = length;
        }
        if let Some(chars) = &overrides.random_chars {
            self.random_chars = chars.clone();
        }
        self.normalized()
    }
}

fn clamp_random_length(value: i64) -> usize {
    value.clamp(MIN_RANDOM_LENGTH as i64, MAX_RANDOM_LENGTH as i64) as usize
}

/// `<config dir>/mdcombine/settings.toml`
pub fn default_settings_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("mdcombine").join("settings.toml"))
}

/// Resolves the settings file, loads it and applies command-line overrides.
/// With `save` set, the merged result is written back.
pub fn resolve_settings(
    config_path: Option<PathBuf>,
    overrides: &SettingsOverrides,
    save: bool,
) -> Result<Settings> {
    let path = match config_path {
        Some(path) => path,
        None => default_settings_path()?,
    };

    let settings = Settings::load(&path).with_overrides(overrides);
    if save {
        settings.save(&path)?;
    }
    Ok(settings)
}
