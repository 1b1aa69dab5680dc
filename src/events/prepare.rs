// Event table preparation: chronological ordering, pairing tie-breaks,
// half mirroring, and player-name aliasing.
//
// Every step takes a slice and returns a new vector; the input table is
// never mutated.

use crate::events::model::Event;
use crate::pitch::spec::PitchSpec;
use std::collections::HashMap;

/// Settings for [`prepare`].
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    /// Minute boundary between the halves. Events at exactly this minute
    /// count as second-half events.
    pub half_time_cutoff: u32,
    /// Mirror the first half instead of the second, for sheets recorded
    /// with the second half already facing the nominal attack direction.
    pub invert_first_half: bool,
    /// The coordinate system the raw table is recorded in; mirroring
    /// reflects within its extents.
    pub source_pitch: PitchSpec,
    /// Break minute/second ties by event-type rank so a completed pass
    /// sorts immediately ahead of its reception. Required before building
    /// a pass network.
    pub tie_break_by_type: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        PrepareConfig {
            half_time_cutoff: 45,
            invert_first_half: false,
            source_pitch: PitchSpec::opta(),
            tie_break_by_type: true,
        }
    }
}

/// Stable chronological sort by `(minute, second)`. Ties keep input order.
pub fn sort_chronological(events: &[Event]) -> Vec<Event> {
    let mut out = events.to_vec();
    out.sort_by_key(|e| (e.minute, e.second));
    out
}

/// Stable sort by `(minute, second, event-type rank)`. The rank puts
/// completed passes directly ahead of receptions sharing their timestamp,
/// which is what the pass-network scan relies on.
pub fn sort_with_type_priority(events: &[Event]) -> Vec<Event> {
    let mut out = events.to_vec();
    out.sort_by_key(|e| (e.minute, e.second, e.event_type.sort_rank()));
    out
}

/// Reflect the events of one half so both halves attack the same nominal
/// direction. First half is `minute < cutoff`, second half is
/// `minute >= cutoff`; by default the second half is mirrored.
pub fn mirror_half(
    events: &[Event],
    half_time_cutoff: u32,
    invert_first_half: bool,
    pitch: &PitchSpec,
) -> Vec<Event> {
    events
        .iter()
        .map(|e| {
            let in_first_half = e.minute < half_time_cutoff;
            if in_first_half == invert_first_half {
                mirror_event(e, pitch)
            } else {
                e.clone()
            }
        })
        .collect()
}

fn mirror_event(event: &Event, pitch: &PitchSpec) -> Event {
    let mut out = event.clone();
    out.origin.x = pitch.mirror_x(out.origin.x);
    out.origin.y = pitch.mirror_y(out.origin.y);
    if let Some(dest) = &mut out.destination {
        dest.x = pitch.mirror_x(dest.x);
        dest.y = pitch.mirror_y(dest.y);
    }
    out
}

/// Replace player names using the alias table (raw sheet name -> display
/// name). Names without an alias pass through unchanged.
pub fn apply_aliases(events: &[Event], aliases: &HashMap<String, String>) -> Vec<Event> {
    events
        .iter()
        .map(|e| {
            let mut out = e.clone();
            if let Some(display) = aliases.get(&out.player) {
                out.player = display.clone();
            }
            out
        })
        .collect()
}

/// Full preparation pipeline: mirror the non-facing half, then sort
/// chronologically (with the pairing tie-break when requested). Returns a
/// new ordered table; the input is untouched.
pub fn prepare(raw_events: &[Event], config: &PrepareConfig) -> Vec<Event> {
    let mirrored = mirror_half(
        raw_events,
        config.half_time_cutoff,
        config.invert_first_half,
        &config.source_pitch,
    );
    if config.tie_break_by_type {
        sort_with_type_priority(&mirrored)
    } else {
        sort_chronological(&mirrored)
    }
}
