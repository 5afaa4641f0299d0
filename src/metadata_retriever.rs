// src/metadata_retriever.rs

use crate::config::FFPROBE_EXECUTABLE_NAME;
use log::{debug, warn};
use serde::Deserialize;
use std::{
    env,
    fmt,
    io::Error as IoError,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Custom error type for ffprobe command execution failures.
#[derive(Debug)]
pub struct FfprobeError {
    message: String,
}

impl FfprobeError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for FfprobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ffprobe error: {}", self.message)
    }
}

impl std::error::Error for FfprobeError {}

// Internal structs for parsing ffprobe JSON output.
#[derive(Deserialize, Debug)]
struct FfprobeOutput {
    #[serde(default)] // Handles cases where 'streams' might be missing.
    streams: Vec<FfprobeStream>,
    #[serde(default)]
    format: FfprobeFormat,
}

#[derive(Deserialize, Debug)]
struct FfprobeStream {
    codec_type: Option<String>, // e.g., "video", "audio".
    duration: Option<String>,   // Duration in seconds (string format), per stream.
}

#[derive(Deserialize, Debug, Default)]
struct FfprobeFormat {
    duration: Option<String>, // Overall duration in seconds (string format).
}

/// Formats a number of seconds as HH:MM:SS or MM:SS.
/// Returns `None` for negative or non-finite values.
pub fn format_duration(secs_float: f64) -> Option<String> {
    if !secs_float.is_finite() || secs_float < 0.0 {
        return None;
    }
    let secs = secs_float.round() as u64;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        Some(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
    } else {
        Some(format!("{:02}:{:02}", minutes, seconds))
    }
}

/// Parses an ffprobe duration string (seconds, e.g. "12.345000").
fn parse_duration_seconds(duration_str: &str) -> Option<f64> {
    match duration_str.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Some(secs),
        Ok(secs) => {
            warn!("Ignoring unusable duration '{}' ({})", duration_str, secs);
            None
        }
        Err(_) => {
            warn!("Could not parse duration string '{}' as float.", duration_str);
            None
        }
    }
}

/// Extracts the total duration from ffprobe's JSON output.
/// Prefers `format.duration`, falling back to the first video stream.
fn duration_from_probe_json(json_str: &str) -> Result<f64, FfprobeError> {
    let parsed: FfprobeOutput = serde_json::from_str(json_str)
        .map_err(|e| FfprobeError::new(format!("Failed to parse ffprobe JSON: {}", e)))?;

    let from_stream = || {
        parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .and_then(|s| s.duration.as_deref())
            .and_then(parse_duration_seconds)
    };

    parsed
        .format
        .duration
        .as_deref()
        .and_then(parse_duration_seconds)
        .or_else(from_stream)
        .ok_or_else(|| FfprobeError::new("ffprobe reported no duration".to_string()))
}

/// Finds the ffprobe executable.
///
/// Searched in order:
/// 1. Next to the application executable.
/// 2. In a `tools` subdirectory next to the executable.
/// 3. In `CARGO_MANIFEST_DIR/tools` (debug builds only, for development).
/// 4. In the system's PATH.
fn locate_ffprobe() -> PathBuf {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let mut candidates = Vec::new();
    if let Some(dir) = exe_dir {
        candidates.push(dir.join(FFPROBE_EXECUTABLE_NAME));
        candidates.push(dir.join("tools").join(FFPROBE_EXECUTABLE_NAME));
    }
    if cfg!(debug_assertions) {
        if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
            candidates.push(PathBuf::from(manifest_dir).join("tools").join(FFPROBE_EXECUTABLE_NAME));
        }
    }

    candidates
        .into_iter()
        .find(|p| p.is_file())
        .unwrap_or_else(|| PathBuf::from(FFPROBE_EXECUTABLE_NAME))
}

/// Reads the total duration (in seconds) of a media file by running `ffprobe`.
///
/// # Errors
///
/// Returns an error if `ffprobe` cannot be executed, exits unsuccessfully,
/// or its output carries no usable duration.
pub fn probe_duration(file_path: &Path) -> Result<f64, Box<dyn std::error::Error>> {
    let ffprobe_command_path = locate_ffprobe();
    debug!(
        "Probing '{}' with '{}'",
        file_path.display(),
        ffprobe_command_path.display()
    );

    let output = Command::new(&ffprobe_command_path)
        .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(file_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            IoError::new(
                e.kind(),
                format!(
                    "Failed to execute ffprobe command '{}': {}",
                    ffprobe_command_path.display(),
                    e
                ),
            )
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Box::new(FfprobeError::new(format!(
            "ffprobe failed (status: {}): {}",
            output.status,
            stderr.trim()
        ))));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    Ok(duration_from_probe_json(&json_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0).as_deref(), Some("00:00"));
        assert_eq!(format_duration(59.6).as_deref(), Some("01:00"));
        assert_eq!(format_duration(3725.0).as_deref(), Some("01:02:05"));
        assert_eq!(format_duration(-1.0), None);
        assert_eq!(format_duration(f64::NAN), None);
    }

    #[test]
    fn test_duration_prefers_format() {
        let json = r#"{
            "streams": [{"codec_type": "video", "duration": "10.0"}],
            "format": {"duration": "12.5"}
        }"#;
        assert_eq!(duration_from_probe_json(json).unwrap(), 12.5);
    }

    #[test]
    fn test_duration_falls_back_to_video_stream() {
        let json = r#"{
            "streams": [
                {"codec_type": "audio", "duration": "99.0"},
                {"codec_type": "video", "duration": "42.25"}
            ],
            "format": {}
        }"#;
        assert_eq!(duration_from_probe_json(json).unwrap(), 42.25);
    }

    #[test]
    fn test_duration_missing_or_invalid() {
        assert!(duration_from_probe_json(r#"{"format": {"duration": "N/A"}}"#).is_err());
        assert!(duration_from_probe_json(r#"{"streams": []}"#).is_err());
        assert!(duration_from_probe_json("not json").is_err());
    }
}
