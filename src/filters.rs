// Event subset selectors consumed by the rendering layer.
//
// All selectors operate on the table's own (source-system) coordinates;
// standardization to the drawing system happens when the report is built.

use crate::events::model::{Event, EventType};
use crate::pitch::spec::PitchSpec;
use crate::pitch::standardizer::transform_point;

pub fn passes(events: &[Event]) -> Vec<&Event> {
    of_type(events, &EventType::Pass)
}

pub fn failed_passes(events: &[Event]) -> Vec<&Event> {
    of_type(events, &EventType::FailedPass)
}

pub fn shots(events: &[Event]) -> Vec<&Event> {
    of_type(events, &EventType::Shot)
}

pub fn goals(events: &[Event]) -> Vec<&Event> {
    of_type(events, &EventType::Goal)
}

pub fn of_type<'a>(events: &'a [Event], event_type: &EventType) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.event_type == *event_type)
        .collect()
}

pub fn for_team<'a>(events: &'a [Event], team: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.team == team).collect()
}

pub fn by_player<'a>(events: &'a [Event], player: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.player == player).collect()
}

/// Completed passes played entirely inside the final third: both the origin
/// and the destination sit beyond two thirds of the pitch length.
pub fn final_third_passes<'a>(events: &'a [Event], pitch: &PitchSpec) -> Vec<&'a Event> {
    let threshold = pitch.x_min + pitch.x_extent() * 2.0 / 3.0;
    passes(events)
        .into_iter()
        .filter(|e| {
            e.origin.x > threshold
                && e.destination.map(|d| d.x > threshold).unwrap_or(false)
        })
        .collect()
}

/// Passes ending inside the attacking penalty box.
///
/// The box is defined in StatsBomb terms (x >= 102, 18 <= y <= 62) and
/// standardized into the table's coordinate system, so the same reference
/// bounds work for any source system.
pub fn passes_into_box<'a>(events: &'a [Event], pitch: &PitchSpec) -> Vec<&'a Event> {
    let sb = PitchSpec::statsbomb();
    let (x_from, y_a) = transform_point(102.0, 18.0, &sb, pitch);
    let (_, y_b) = transform_point(102.0, 62.0, &sb, pitch);
    let (y_min, y_max) = if y_a <= y_b { (y_a, y_b) } else { (y_b, y_a) };

    passes(events)
        .into_iter()
        .filter(|e| match e.destination {
            Some(d) => d.x >= x_from && d.y >= y_min && d.y <= y_max,
            None => false,
        })
        .collect()
}
