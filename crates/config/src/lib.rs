//! Input record models and loaders for the ferry battery planner.
//!
//! The record mirrors the planner form one-to-one: numeric fields stay as the
//! text the operator typed, so a saved record reloads exactly as it was
//! entered. Parsing into typed route parameters happens in `ferry_planner`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A complete planner submission: ferry, route, charging rules and the day's departures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerryInput {
    #[serde(default)]
    pub ferry_name: String,
    /// Engine capacity in kW.
    #[serde(deserialize_with = "text_or_number")]
    pub engine_capacity: String,
    /// Cruise speed in knots.
    #[serde(deserialize_with = "text_or_number")]
    pub ferry_speed: String,
    /// One-way route distance in nautical miles.
    #[serde(deserialize_with = "text_or_number")]
    pub distance: String,
    /// Charger power in kW.
    #[serde(deserialize_with = "text_or_number")]
    pub fast_charging_power: String,
    /// Reserved buffer, percent of total capacity.
    #[serde(deserialize_with = "text_or_number")]
    pub buffer_capacity: String,
    /// Fast-charge ceiling, percent of total capacity.
    #[serde(deserialize_with = "text_or_number")]
    pub max_fast_charging: String,
    #[serde(deserialize_with = "text_or_number")]
    pub max_non_stop_trips: String,
    #[serde(default)]
    pub charge_at_port1: bool,
    #[serde(default)]
    pub charge_at_port2: bool,
    #[serde(default)]
    pub schedules: Vec<ScheduleInput>,
    /// Shortest dwell, in minutes, worth plugging in for.
    #[serde(deserialize_with = "text_or_number")]
    pub min_fast_charge_time: String,
}

/// One scheduled departure as entered: `HH:MM` and the departure port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub time: String,
    pub port: PortValue,
}

/// Port selector; form widgets hand it over either as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

impl PortValue {
    /// Port number if the value holds an integer, regardless of representation.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            PortValue::Number(n) => Some(*n),
            PortValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<u8> for PortValue {
    fn from(port: u8) -> Self {
        PortValue::Number(i64::from(port))
    }
}

/// Errors that can occur while loading or saving input records.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read input record: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load an input record, picking the format from the file extension.
///
/// `.yaml`/`.yml` and `.toml` are recognised; anything else is read as JSON,
/// the format [`save_input`] writes.
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<FerryInput, ConfigError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let record = match ext.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_reader(File::open(path)?)?,
        Some("toml") => toml::from_str(&fs::read_to_string(path)?)?,
        _ => serde_json::from_reader(File::open(path)?)?,
    };
    tracing::debug!(path = %path.display(), "loaded input record");
    Ok(record)
}

/// Parse an input record from a JSON document.
pub fn input_from_json(json: &str) -> Result<FerryInput, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize an input record to the JSON export shape.
pub fn input_to_json(input: &FerryInput) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(input)?)
}

/// Write an input record as pretty JSON, creating parent directories as needed.
pub fn save_input<P: AsRef<Path>>(path: P, input: &FerryInput) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, input)?;
    Ok(())
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(v) => v.to_string(),
    })
}
