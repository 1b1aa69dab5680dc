// Event table loading.
//
// Two source formats: the operator CSV sheet (`Mins,Secs,Event,Player,Team,
// X,Y,X2,Y2`) and a JSON array of the same records. Malformed rows are
// skipped with a warning rather than failing the whole table.

use crate::events::model::{Coord, Event, EventType};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("unsupported event file extension for {path} (expected .csv or .json)")]
    UnsupportedFormat { path: String },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw row structs (private)
// ---------------------------------------------------------------------------

/// Operator CSV row. `X2`/`Y2` come in as raw strings so that empty cells
/// and stray annotations coerce to missing instead of failing the row.
/// Extra columns on the sheet are ignored by the csv deserializer.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawCsvEvent {
    Mins: u32,
    Secs: u32,
    Event: String,
    Player: String,
    Team: String,
    X: f64,
    Y: f64,
    #[serde(default)]
    X2: Option<String>,
    #[serde(default)]
    Y2: Option<String>,
}

/// JSON record, keyed the way exported feeds name the fields.
#[derive(Debug, Deserialize)]
struct RawJsonEvent {
    minute: u32,
    second: u32,
    #[serde(rename = "type")]
    event_type: String,
    player: String,
    team: String,
    x: f64,
    y: f64,
    #[serde(default)]
    x2: Option<serde_json::Value>,
    #[serde(default)]
    y2: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Parse an optional raw cell into a finite coordinate, treating empty and
/// non-numeric values as missing.
fn coerce_cell(cell: Option<&str>) -> Option<f64> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Same coercion for JSON values: accept numbers and numeric strings.
fn coerce_json(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => coerce_cell(Some(s)),
        _ => None,
    }
}

/// Combine the two destination coordinates, enforcing the pair invariant:
/// a half-present destination is demoted to none.
fn pair_destination(x2: Option<f64>, y2: Option<f64>, context: &str) -> Option<Coord> {
    match (x2, y2) {
        (Some(x), Some(y)) => Some(Coord::new(x, y)),
        (None, None) => None,
        _ => {
            warn!("{context}: destination has only one coordinate, dropping both");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_csv_from_reader<R: Read>(rdr: R) -> Result<Vec<Event>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut events = Vec::new();
    for (i, result) in reader.deserialize::<RawCsvEvent>().enumerate() {
        match result {
            Ok(raw) => {
                if !raw.X.is_finite() || !raw.Y.is_finite() {
                    warn!("skipping event row {i}: non-finite origin coordinates");
                    continue;
                }
                let x2 = coerce_cell(raw.X2.as_deref());
                let y2 = coerce_cell(raw.Y2.as_deref());
                events.push(Event {
                    minute: raw.Mins,
                    second: raw.Secs,
                    event_type: EventType::parse(&raw.Event),
                    player: raw.Player.trim().to_string(),
                    team: raw.Team.trim().to_string(),
                    origin: Coord::new(raw.X, raw.Y),
                    destination: pair_destination(x2, y2, &format!("event row {i}")),
                });
            }
            Err(e) => {
                warn!("skipping malformed event row: {e}");
            }
        }
    }
    Ok(events)
}

fn load_json_from_reader<R: Read>(rdr: R) -> Result<Vec<Event>, serde_json::Error> {
    let raw: Vec<RawJsonEvent> = serde_json::from_reader(rdr)?;
    let mut events = Vec::with_capacity(raw.len());
    for (i, record) in raw.into_iter().enumerate() {
        if !record.x.is_finite() || !record.y.is_finite() {
            warn!("skipping event record {i}: non-finite origin coordinates");
            continue;
        }
        let x2 = coerce_json(record.x2.as_ref());
        let y2 = coerce_json(record.y2.as_ref());
        events.push(Event {
            minute: record.minute,
            second: record.second,
            event_type: EventType::parse(&record.event_type),
            player: record.player.trim().to_string(),
            team: record.team.trim().to_string(),
            origin: Coord::new(record.x, record.y),
            destination: pair_destination(x2, y2, &format!("event record {i}")),
        });
    }
    Ok(events)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load an event table from the operator CSV sheet.
pub fn load_events_csv(path: &Path) -> Result<Vec<Event>, EventError> {
    let file = std::fs::File::open(path).map_err(|e| EventError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_csv_from_reader(file).map_err(|e| EventError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load an event table from a JSON array of records.
pub fn load_events_json(path: &Path) -> Result<Vec<Event>, EventError> {
    let file = std::fs::File::open(path).map_err(|e| EventError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_json_from_reader(file).map_err(|e| EventError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load an event table, dispatching on file extension. Errors if the table
/// produced zero usable rows; an all-skipped sheet is a data problem the
/// operator needs to see, not an empty chart.
pub fn load_events(path: &Path) -> Result<Vec<Event>, EventError> {
    let events = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("csv") => load_events_csv(path)?,
        Some("json") => load_events_json(path)?,
        _ => {
            return Err(EventError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };
    if events.is_empty() {
        return Err(EventError::Validation(format!(
            "event table {} produced zero valid rows",
            path.display()
        )));
    }
    Ok(events)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
