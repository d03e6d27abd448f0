use crate::error::{Result, TaskaiError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ReminderLimits
// ---------------------------------------------------------------------------

/// Caps applied when reminders are added or moved by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReminderLimits {
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
    #[serde(default = "default_max_snoozes")]
    pub max_snoozes: usize,
}

fn default_max_pending() -> usize {
    4
}

fn default_max_snoozes() -> usize {
    3
}

impl Default for ReminderLimits {
    fn default() -> Self {
        Self {
            max_pending: default_max_pending(),
            max_snoozes: default_max_snoozes(),
        }
    }
}

// ---------------------------------------------------------------------------
// BandThresholds
// ---------------------------------------------------------------------------

/// Day-count cutoffs for the urgency accent bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    /// At or below this many days: urgent.
    #[serde(default = "default_urgent_days")]
    pub urgent_days: i64,
    /// At or below this many days (and above `urgent_days`): soon.
    #[serde(default = "default_soon_days")]
    pub soon_days: i64,
}

fn default_urgent_days() -> i64 {
    3
}

fn default_soon_days() -> i64 {
    29
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            urgent_days: default_urgent_days(),
            soon_days: default_soon_days(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub reminders: ReminderLimits,
    #[serde(default)]
    pub bands: BandThresholds,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            reminders: ReminderLimits::default(),
            bands: BandThresholds::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(TaskaiError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.reminders.max_pending == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "reminders.max_pending must be at least 1".to_string(),
            });
        }

        if self.reminders.max_snoozes == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "reminders.max_snoozes must be at least 1".to_string(),
            });
        }

        if self.reminders.max_snoozes > self.reminders.max_pending {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "reminders.max_snoozes ({}) exceeds reminders.max_pending ({})",
                    self.reminders.max_snoozes, self.reminders.max_pending
                ),
            });
        }

        if self.bands.urgent_days < 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "bands.urgent_days is negative; only overdue items will be urgent"
                    .to_string(),
            });
        }

        if self.bands.urgent_days >= self.bands.soon_days {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "bands.urgent_days ({}) must be below bands.soon_days ({})",
                    self.bands.urgent_days, self.bands.soon_days
                ),
            });
        }

        if self.version != default_version() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
