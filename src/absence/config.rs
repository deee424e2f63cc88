use std::{
    fs,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;

use super::tier::AbsenceThresholds;

const CONFIG_PATH: &str = "config/absence.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawAbsenceConfig {
    #[serde(default)]
    thresholds: RawThresholds,
    #[serde(default)]
    check: RawCheck,
    #[serde(default)]
    storage: RawStorage,
    #[serde(default)]
    autonomy: RawAutonomy,
    #[serde(default)]
    notice: RawNotice,
    #[serde(default)]
    history: RawHistory,
    #[serde(default)]
    debug: RawDebug,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawThresholds {
    short_seconds: f64,
    medium_seconds: f64,
    long_seconds: f64,
    extended_seconds: f64,
    overnight_seconds: f64,
}

impl Default for RawThresholds {
    fn default() -> Self {
        let defaults = AbsenceThresholds::default();
        Self {
            short_seconds: defaults.short,
            medium_seconds: defaults.medium,
            long_seconds: defaults.long,
            extended_seconds: defaults.extended,
            overnight_seconds: defaults.overnight,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCheck {
    interval_seconds: f32,
    pointer_throttle_seconds: f64,
}

impl Default for RawCheck {
    fn default() -> Self {
        Self {
            interval_seconds: 3.0,
            pointer_throttle_seconds: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawStorage {
    path: String,
}

impl Default for RawStorage {
    fn default() -> Self {
        Self {
            path: "last_active.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawAutonomy {
    medium_wander_chance: f32,
}

impl Default for RawAutonomy {
    fn default() -> Self {
        Self {
            medium_wander_chance: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawNotice {
    startup_min_away_seconds: f64,
    display_seconds: f32,
}

impl Default for RawNotice {
    fn default() -> Self {
        Self {
            startup_min_away_seconds: 30.0,
            display_seconds: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHistory {
    capacity: usize,
    log_path: String,
}

impl Default for RawHistory {
    fn default() -> Self {
        Self {
            capacity: 32,
            log_path: "logs/absence_history.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDebug {
    simulated_absence_seconds: f64,
}

impl Default for RawDebug {
    fn default() -> Self {
        Self {
            simulated_absence_seconds: 3600.0,
        }
    }
}

/// Runtime absence settings.
#[derive(Resource, Debug, Clone)]
pub struct AbsenceSettings {
    pub thresholds: AbsenceThresholds,
    pub check_interval_secs: f32,
    pub pointer_throttle_secs: f64,
    pub save_path: PathBuf,
    pub medium_wander_chance: f32,
    pub notice: NoticeSettings,
    pub history: HistorySettings,
    pub simulated_absence_secs: f64,
}

#[derive(Debug, Clone)]
pub struct NoticeSettings {
    pub startup_min_away_secs: f64,
    pub display_secs: f32,
}

#[derive(Debug, Clone)]
pub struct HistorySettings {
    pub capacity: usize,
    pub log_path: PathBuf,
}

impl AbsenceSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match Self::parse(&raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawAbsenceConfig>(raw).map(Self::from)
    }
}

impl Default for AbsenceSettings {
    fn default() -> Self {
        RawAbsenceConfig::default().into()
    }
}

impl From<RawAbsenceConfig> for AbsenceSettings {
    fn from(raw: RawAbsenceConfig) -> Self {
        let thresholds = AbsenceThresholds {
            short: raw.thresholds.short_seconds,
            medium: raw.thresholds.medium_seconds,
            long: raw.thresholds.long_seconds,
            extended: raw.thresholds.extended_seconds,
            overnight: raw.thresholds.overnight_seconds,
        }
        .normalised();

        let defaults = RawAbsenceConfig::default();
        Self {
            thresholds,
            check_interval_secs: positive_or(
                raw.check.interval_seconds,
                defaults.check.interval_seconds,
            ),
            pointer_throttle_secs: raw.check.pointer_throttle_seconds.max(0.0),
            save_path: path_or(raw.storage.path, &defaults.storage.path),
            medium_wander_chance: raw.autonomy.medium_wander_chance.clamp(0.0, 1.0),
            notice: NoticeSettings {
                startup_min_away_secs: raw.notice.startup_min_away_seconds.max(0.0),
                display_secs: positive_or(
                    raw.notice.display_seconds,
                    defaults.notice.display_seconds,
                ),
            },
            history: HistorySettings {
                capacity: raw.history.capacity.max(1),
                log_path: path_or(raw.history.log_path, &defaults.history.log_path),
            },
            simulated_absence_secs: raw.debug.simulated_absence_seconds.max(0.0),
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn path_or(value: String, fallback: &str) -> PathBuf {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PathBuf::from(fallback)
    } else {
        PathBuf::from(trimmed)
    }
}
