// Event record model.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The action recorded on an event row. Operator sheets use a small fixed
/// vocabulary; anything unrecognized is preserved verbatim in `Other` so a
/// sheet with extra annotation rows still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    FailedPass,
    Pass,
    Assist,
    PassReceived,
    Shot,
    Goal,
    Clearance,
    Other(String),
}

impl EventType {
    pub fn parse(raw: &str) -> EventType {
        match raw.trim() {
            "Failed Pass" => EventType::FailedPass,
            "Pass" => EventType::Pass,
            "Assist" => EventType::Assist,
            "Pass Received" => EventType::PassReceived,
            "Shot" => EventType::Shot,
            "Goal" => EventType::Goal,
            "Clearance" => EventType::Clearance,
            other => EventType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventType::FailedPass => "Failed Pass",
            EventType::Pass => "Pass",
            EventType::Assist => "Assist",
            EventType::PassReceived => "Pass Received",
            EventType::Shot => "Shot",
            EventType::Goal => "Goal",
            EventType::Clearance => "Clearance",
            EventType::Other(s) => s,
        }
    }

    /// A completed pass is the first leg of a passer/receiver pairing.
    pub fn is_completed_pass(&self) -> bool {
        matches!(self, EventType::Pass | EventType::Assist)
    }

    /// Tie-break rank for events sharing the same minute and second: passes
    /// and assists sort ahead of their receptions so a sequential scan sees
    /// each pairing in order. Unknown types sort last, among themselves in
    /// input order.
    pub(crate) fn sort_rank(&self) -> u8 {
        match self {
            EventType::FailedPass => 0,
            EventType::Pass => 1,
            EventType::Assist => 2,
            EventType::PassReceived => 3,
            EventType::Shot => 4,
            EventType::Goal => 5,
            EventType::Clearance => 6,
            EventType::Other(_) => 7,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EventType::parse(&raw))
    }
}

/// A point on the pitch, in whatever coordinate system the table uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }
}

/// One observed match action. Immutable once parsed: the preparation
/// pipeline produces new vectors instead of mutating rows in place.
///
/// `destination` is present only for events with a target location (passes);
/// point events carry `None`. Loading guarantees the end coordinates come as
/// a pair; a row with only one of them is demoted to no destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub minute: u32,
    pub second: u32,
    pub event_type: EventType,
    pub player: String,
    pub team: String,
    pub origin: Coord,
    pub destination: Option<Coord>,
}
