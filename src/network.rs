// Pass-network construction.
//
// Reconstructs passer/receiver combinations from the prepared event table:
// each "Pass Received" event is paired with the completed pass immediately
// before it, the pair count is accumulated symmetrically, and every player
// gets a mean pass-origin location for plotting.

use crate::events::model::{Coord, Event, EventType};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

// ---------------------------------------------------------------------------
// Errors and modes
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("event {index}: 'Pass Received' has no preceding event to pair with")]
    OrphanReception { index: usize },

    #[error("event {index}: 'Pass Received' follows '{found}', expected a completed pass")]
    BrokenPassPair { index: usize, found: String },
}

/// What to do when a reception's predecessor is not a completed pass.
///
/// `Strict` surfaces the broken pairing as an error. `SkipBroken` logs and
/// drops the pair, matching how historical charts were produced. Counts
/// may silently come out low, so it must be chosen deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    #[default]
    Strict,
    SkipBroken,
}

// ---------------------------------------------------------------------------
// Pass matrix
// ---------------------------------------------------------------------------

/// An unordered player pair: `PlayerPair::new("b", "a")` and
/// `PlayerPair::new("a", "b")` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerPair {
    first: String,
    second: String,
}

impl PlayerPair {
    pub fn new(a: &str, b: &str) -> PlayerPair {
        if a <= b {
            PlayerPair {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            PlayerPair {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }

    pub fn players(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

/// Symmetric completed-pass counts per player pair. Symmetry is structural:
/// both directions of a pair share one entry, so
/// `count(a, b) == count(b, a)` always holds.
#[derive(Debug, Clone, Default)]
pub struct PassMatrix {
    counts: HashMap<PlayerPair, u32>,
}

impl PassMatrix {
    fn record(&mut self, passer: &str, receiver: &str) {
        *self.counts.entry(PlayerPair::new(passer, receiver)).or_insert(0) += 1;
    }

    /// Completed passes between two players, in either direction.
    pub fn count(&self, a: &str, b: &str) -> u32 {
        self.counts
            .get(&PlayerPair::new(a, b))
            .copied()
            .unwrap_or(0)
    }

    /// All pairs with a nonzero count.
    pub fn pairs(&self) -> impl Iterator<Item = (&PlayerPair, u32)> {
        self.counts.iter().map(|(pair, &count)| (pair, count))
    }

    /// A player's combination count summed across all partners.
    pub fn player_total(&self, player: &str) -> u32 {
        self.counts
            .iter()
            .filter(|(pair, _)| pair.first == player || pair.second == player)
            .map(|(_, &count)| count)
            .sum()
    }

    /// The strongest single combination, used to scale line widths.
    pub fn max_pair_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Everything the network diagram needs: pair counts, per-player totals,
/// mean pass origins, and the scaling denominators.
#[derive(Debug, Clone)]
pub struct PassNetwork {
    pub matrix: PassMatrix,
    /// Mean origin of each player's own "Pass" events. Players without a
    /// single pass have no position and are absent from the map.
    pub mean_positions: HashMap<String, Coord>,
    /// Per-player combination totals (row sums of the matrix).
    pub player_totals: HashMap<String, u32>,
    /// Count of "Pass" events in the table, the marker-size denominator.
    pub total_pass_count: u32,
}

impl PassNetwork {
    pub fn max_pair_count(&self) -> u32 {
        self.matrix.max_pair_count()
    }
}

/// Build the pass network from a prepared event table.
///
/// Precondition: the table is ordered so every "Pass Received" event sits
/// immediately after its completed pass (see
/// [`prepare`](crate::events::prepare::prepare) with the type tie-break).
/// A reception whose predecessor is anything else is a broken pairing,
/// handled according to `mode`.
pub fn build(events: &[Event], mode: PairingMode) -> Result<PassNetwork, NetworkError> {
    let mut matrix = PassMatrix::default();

    for (index, event) in events.iter().enumerate() {
        if event.event_type != EventType::PassReceived {
            continue;
        }
        let Some(predecessor) = index.checked_sub(1).map(|i| &events[i]) else {
            match mode {
                PairingMode::Strict => return Err(NetworkError::OrphanReception { index }),
                PairingMode::SkipBroken => {
                    warn!("event {index}: reception opens the table, skipping pair");
                    continue;
                }
            }
        };
        if !predecessor.event_type.is_completed_pass() {
            match mode {
                PairingMode::Strict => {
                    return Err(NetworkError::BrokenPassPair {
                        index,
                        found: predecessor.event_type.label().to_string(),
                    })
                }
                PairingMode::SkipBroken => {
                    warn!(
                        "event {index}: reception follows '{}', skipping pair",
                        predecessor.event_type
                    );
                    continue;
                }
            }
        }
        matrix.record(&predecessor.player, &event.player);
    }

    let mean_positions = mean_pass_positions(events);
    let player_totals = player_totals(&matrix);
    let total_pass_count = events
        .iter()
        .filter(|e| e.event_type == EventType::Pass)
        .count() as u32;

    Ok(PassNetwork {
        matrix,
        mean_positions,
        player_totals,
        total_pass_count,
    })
}

/// Mean origin of each player's "Pass" events. Assists are deliberately
/// excluded: the plotted position is where a player distributes from, and
/// the historical charts used only plain passes.
fn mean_pass_positions(events: &[Event]) -> HashMap<String, Coord> {
    let mut sums: HashMap<String, (f64, f64, u32)> = HashMap::new();
    for event in events {
        if event.event_type != EventType::Pass {
            continue;
        }
        let entry = sums.entry(event.player.clone()).or_insert((0.0, 0.0, 0));
        entry.0 += event.origin.x;
        entry.1 += event.origin.y;
        entry.2 += 1;
    }
    sums.into_iter()
        .map(|(player, (sx, sy, n))| {
            let n = n as f64;
            (player, Coord::new(sx / n, sy / n))
        })
        .collect()
}

fn player_totals(matrix: &PassMatrix) -> HashMap<String, u32> {
    let mut totals: HashMap<String, u32> = HashMap::new();
    for (pair, count) in matrix.pairs() {
        let (a, b) = pair.players();
        *totals.entry(a.to_string()).or_insert(0) += count;
        *totals.entry(b.to_string()).or_insert(0) += count;
    }
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn pass(second: u32, player: &str, x: f64, y: f64) -> Event {
        Event {
            minute: 1,
            second,
            event_type: EventType::Pass,
            player: player.to_string(),
            team: "T".to_string(),
            origin: Coord::new(x, y),
            destination: Some(Coord::new(x + 10.0, y)),
        }
    }

    fn reception(second: u32, player: &str) -> Event {
        Event {
            minute: 1,
            second,
            event_type: EventType::PassReceived,
            player: player.to_string(),
            team: "T".to_string(),
            origin: Coord::new(50.0, 50.0),
            destination: None,
        }
    }

    fn shot(second: u32, player: &str) -> Event {
        Event {
            minute: 1,
            second,
            event_type: EventType::Shot,
            player: player.to_string(),
            team: "T".to_string(),
            origin: Coord::new(90.0, 50.0),
            destination: None,
        }
    }

    /// Two passes between A and B plus one from A to C.
    fn small_match() -> Vec<Event> {
        vec![
            pass(0, "A", 20.0, 30.0),
            reception(0, "B"),
            pass(10, "B", 40.0, 60.0),
            reception(10, "A"),
            pass(20, "A", 30.0, 50.0),
            reception(20, "C"),
        ]
    }

    #[test]
    fn pair_counts_match_scenario() {
        let network = build(&small_match(), PairingMode::Strict).unwrap();

        assert_eq!(network.matrix.count("A", "B"), 2);
        assert_eq!(network.matrix.count("A", "C"), 1);
        assert_eq!(network.matrix.count("B", "C"), 0);

        assert_eq!(network.player_totals["A"], 3);
        assert_eq!(network.player_totals["B"], 2);
        assert_eq!(network.player_totals["C"], 1);

        assert_eq!(network.total_pass_count, 3);
        assert_eq!(network.max_pair_count(), 2);
    }

    #[test]
    fn matrix_is_symmetric() {
        let network = build(&small_match(), PairingMode::Strict).unwrap();
        for (pair, _) in network.matrix.pairs() {
            let (a, b) = pair.players();
            assert_eq!(network.matrix.count(a, b), network.matrix.count(b, a));
        }
        assert_eq!(network.matrix.count("B", "A"), 2);
        assert_eq!(network.matrix.count("C", "A"), 1);
    }

    #[test]
    fn mean_positions_use_pass_origins_only() {
        let network = build(&small_match(), PairingMode::Strict).unwrap();

        // A passed from (20,30) and (30,50): mean (25,40).
        let a = network.mean_positions["A"];
        assert!(approx_eq(a.x, 25.0));
        assert!(approx_eq(a.y, 40.0));

        let b = network.mean_positions["B"];
        assert!(approx_eq(b.x, 40.0));
        assert!(approx_eq(b.y, 60.0));

        // C never passed: no position.
        assert!(!network.mean_positions.contains_key("C"));
    }

    #[test]
    fn assists_pair_but_do_not_count_as_passes() {
        let mut events = small_match();
        events.push(Event {
            event_type: EventType::Assist,
            ..pass(30, "C", 60.0, 40.0)
        });
        events.push(reception(30, "A"));

        let network = build(&events, PairingMode::Strict).unwrap();
        // The assist creates a combination...
        assert_eq!(network.matrix.count("C", "A"), 2);
        // ...but neither the pass-count denominator nor C's plotted
        // position includes it.
        assert_eq!(network.total_pass_count, 3);
        assert!(!network.mean_positions.contains_key("C"));
    }

    #[test]
    fn reception_after_shot_is_a_broken_pair() {
        let events = vec![
            pass(0, "A", 20.0, 30.0),
            reception(0, "B"),
            shot(10, "B"),
            reception(10, "C"),
        ];
        let err = build(&events, PairingMode::Strict).unwrap_err();
        match err {
            NetworkError::BrokenPassPair { index, found } => {
                assert_eq!(index, 3);
                assert_eq!(found, "Shot");
            }
            other => panic!("expected BrokenPassPair, got {other:?}"),
        }
    }

    #[test]
    fn reception_opening_the_table_is_orphaned() {
        let events = vec![reception(0, "A")];
        let err = build(&events, PairingMode::Strict).unwrap_err();
        assert!(matches!(err, NetworkError::OrphanReception { index: 0 }));
    }

    #[test]
    fn skip_broken_keeps_valid_pairs() {
        let events = vec![
            reception(0, "A"),
            pass(10, "A", 20.0, 30.0),
            reception(10, "B"),
            shot(20, "B"),
            reception(20, "C"),
        ];
        let network = build(&events, PairingMode::SkipBroken).unwrap();
        assert_eq!(network.matrix.count("A", "B"), 1);
        assert_eq!(network.matrix.count("B", "C"), 0);
        assert_eq!(network.max_pair_count(), 1);
    }

    #[test]
    fn empty_table_builds_empty_network() {
        let network = build(&[], PairingMode::Strict).unwrap();
        assert!(network.matrix.is_empty());
        assert!(network.mean_positions.is_empty());
        assert_eq!(network.total_pass_count, 0);
        assert_eq!(network.max_pair_count(), 0);
    }

    #[test]
    fn consecutive_receptions_break_the_second() {
        let events = vec![
            pass(0, "A", 20.0, 30.0),
            reception(0, "B"),
            reception(1, "C"),
        ];
        let err = build(&events, PairingMode::Strict).unwrap_err();
        match err {
            NetworkError::BrokenPassPair { index, found } => {
                assert_eq!(index, 2);
                assert_eq!(found, "Pass Received");
            }
            other => panic!("expected BrokenPassPair, got {other:?}"),
        }
    }
}
