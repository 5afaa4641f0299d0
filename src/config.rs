// src/config.rs

use serde::{Deserialize, Serialize};
use std::{env, fmt};

/// A list of recognized video file extensions (all lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "mpg", "mpeg", "m4v",
];
/// The filename used when exporting the current schedule.
pub const SCHEDULE_FILE_NAME: &str = "schedule.json";
/// The application name, used for creating the application-specific data directory.
pub const APP_NAME: &str = "clip_queue";

/// The name of the ffprobe executable, which is platform-dependent.
#[cfg(windows)]
pub const FFPROBE_EXECUTABLE_NAME: &str = "ffprobe.exe";
#[cfg(not(windows))]
pub const FFPROBE_EXECUTABLE_NAME: &str = "ffprobe";

/// Seconds charged per clip against a file's watched budget, and the
/// leading offset applied to every placed clip.
pub const CLIP_GAP_SECONDS: u64 = 10;
/// Share of a file's duration after which it stops receiving new clips.
pub const EXHAUSTION_RATIO: f64 = 0.6;

/// Environment variable overriding the minimum clip length.
pub const MIN_ENV_VAR: &str = "CLIP_MIN_SECONDS";
/// Environment variable overriding the maximum clip length.
pub const MAX_ENV_VAR: &str = "CLIP_MAX_SECONDS";

/// Error raised when clip bounds cannot be read or are inconsistent.
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Bounds for the length of generated clips, in whole seconds.
/// Durations are drawn from the half-open range `[min, max)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipConfiguration {
    pub min: u64,
    pub max: u64,
}

impl Default for ClipConfiguration {
    fn default() -> Self {
        Self { min: 5, max: 120 }
    }
}

impl ClipConfiguration {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Builds a configuration from `CLIP_MIN_SECONDS` / `CLIP_MAX_SECONDS`,
    /// falling back to the defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            min: read_seconds_var(MIN_ENV_VAR)?.unwrap_or(defaults.min),
            max: read_seconds_var(MAX_ENV_VAR)?.unwrap_or(defaults.max),
        })
    }

    /// Replaces the bounds that were explicitly provided (e.g. from CLI flags).
    pub fn with_overrides(self, min: Option<u64>, max: Option<u64>) -> Self {
        Self {
            min: min.unwrap_or(self.min),
            max: max.unwrap_or(self.max),
        }
    }

    /// Rejects bounds where `max` is below `min`.
    /// `min == max` is accepted and always yields clips of exactly `min` seconds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max < self.min {
            return Err(ConfigError::new(format!(
                "max clip length ({}s) must not be below min clip length ({}s)",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

fn read_seconds_var(name: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
            ConfigError::new(format!("{} must be whole seconds, got '{}': {}", name, raw, e))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::new(format!("{} is not readable: {}", name, e))),
    }
}
