use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::candidates::{CandidateSet, DEFAULT_FRUITS};
use crate::error::{Result, SuggestboxError};
use crate::widget::{ResponsePolicy, WidgetTimings};

/// Upper bound for any configured delay, in milliseconds.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Root application configuration, loaded from `~/.config/suggestbox/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub widget: WidgetConfig,
    pub candidates: CandidatesConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Quiet interval before a lookup is issued.
    pub debounce_ms: u64,
    /// Simulated lookup latency.
    pub lookup_delay_ms: u64,
    /// How long the list stays up after the input loses focus.
    pub blur_grace_ms: u64,
    pub policy: ResponsePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatesConfig {
    pub items: Vec<String>,
    /// Plural noun used in messages ("No fruits found ...").
    pub noun: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub max_visible: u16,
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            lookup_delay_ms: 100,
            blur_grace_ms: 150,
            policy: ResponsePolicy::default(),
        }
    }
}

impl Default for CandidatesConfig {
    fn default() -> Self {
        Self {
            items: DEFAULT_FRUITS.iter().map(|s| s.to_string()).collect(),
            noun: "fruits".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Fruit Autocomplete".to_string(),
            max_visible: 6,
            tick_ms: 25,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/suggestbox/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("SUGGESTBOX_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("suggestbox")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path and validate it.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.widget;
        for (name, value) in [
            ("widget.debounce_ms", w.debounce_ms),
            ("widget.lookup_delay_ms", w.lookup_delay_ms),
            ("widget.blur_grace_ms", w.blur_grace_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(SuggestboxError::ConfigError(format!(
                    "{name} = {value} exceeds {MAX_DELAY_MS}"
                )));
            }
        }
        if self.candidate_set().is_empty() {
            return Err(SuggestboxError::ConfigError(
                "candidates.items must contain at least one non-blank entry".to_string(),
            ));
        }
        Ok(())
    }

    // ─── Derived values ────────────────────────────────────

    pub fn candidate_set(&self) -> CandidateSet {
        CandidateSet::new(self.candidates.items.iter().cloned())
    }

    pub fn timings(&self) -> WidgetTimings {
        WidgetTimings {
            debounce: Duration::from_millis(self.widget.debounce_ms),
            blur_grace: Duration::from_millis(self.widget.blur_grace_ms),
        }
    }

    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.widget.lookup_delay_ms)
    }

    /// Log file used in TUI mode.
    pub fn log_path(&self) -> PathBuf {
        match &self.logging.file {
            Some(file) => PathBuf::from(file),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("~/.local/share"))
                .join("suggestbox")
                .join("suggestbox.log"),
        }
    }
}
