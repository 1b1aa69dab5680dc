// Renderer-facing report: the numeric arrays the plotting layer consumes,
// serialized as JSON. Everything visual (colors, pitch drawing, labels)
// lives on the far side of this file's output.

use crate::events::model::Event;
use crate::network::PassNetwork;
use crate::pitch::spec::PitchSpec;
use crate::pitch::standardizer::transform_point;
use crate::pitch::zones::ZoneGrid;
use crate::xg::TeamXgSummary;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Report pieces
// ---------------------------------------------------------------------------

/// Parallel start/end coordinate arrays for line-style marks (pass arrows).
/// Events without a destination do not produce an arrow.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Arrows {
    pub xstart: Vec<f64>,
    pub ystart: Vec<f64>,
    pub xend: Vec<f64>,
    pub yend: Vec<f64>,
}

/// Parallel coordinate arrays for point-style marks (shots, goals).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Markers {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A zone grid's cells together with the edges that define them, so the
/// renderer can draw and label the zones without recomputing anything.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneCells {
    pub edges_x: Vec<f64>,
    pub edges_y: Vec<f64>,
    /// Indexed `[ix][iy]`.
    pub cells: Vec<Vec<f64>>,
}

/// One plotted player: mean pass origin (already standardized) and the
/// combination total that drives marker sizing.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerNode {
    pub player: String,
    pub x: f64,
    pub y: f64,
    pub total: u32,
}

/// One line of the network diagram.
#[derive(Debug, Clone, Serialize)]
pub struct PassLink {
    pub a: String,
    pub b: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    pub players: Vec<PlayerNode>,
    pub links: Vec<PassLink>,
    pub max_pair_count: u32,
    pub total_pass_count: u32,
}

/// The full bundle handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub passes: Arrows,
    pub failed_passes: Arrows,
    pub shots: Markers,
    pub goals: Markers,
    pub final_third_passes: Arrows,
    pub passes_into_box: Arrows,
    pub pass_zones: ZoneCells,
    pub network: NetworkReport,
    pub xg: BTreeMap<String, TeamXgSummary>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Standardize origin/destination pairs into arrow arrays. Events without
/// a destination are dropped, since an arrow needs both ends.
pub fn arrows(events: &[&Event], from: &PitchSpec, to: &PitchSpec) -> Arrows {
    let mut out = Arrows::default();
    for event in events {
        let Some(dest) = event.destination else {
            continue;
        };
        let (sx, sy) = transform_point(event.origin.x, event.origin.y, from, to);
        let (ex, ey) = transform_point(dest.x, dest.y, from, to);
        out.xstart.push(sx);
        out.ystart.push(sy);
        out.xend.push(ex);
        out.yend.push(ey);
    }
    out
}

/// Standardize event origins into marker arrays.
pub fn markers(events: &[&Event], from: &PitchSpec, to: &PitchSpec) -> Markers {
    let mut out = Markers::default();
    for event in events {
        let (x, y) = transform_point(event.origin.x, event.origin.y, from, to);
        out.x.push(x);
        out.y.push(y);
    }
    out
}

/// Package a computed grid with its edges.
pub fn zone_cells(grid: &ZoneGrid, cells: Vec<Vec<f64>>) -> ZoneCells {
    ZoneCells {
        edges_x: grid.edges_x().to_vec(),
        edges_y: grid.edges_y().to_vec(),
        cells,
    }
}

/// Flatten a pass network into plot-ready nodes and links, standardizing
/// player positions. Players without a mean position (no passes of their
/// own) are excluded, they have nowhere to be drawn. Output is sorted by
/// name so report files are reproducible.
pub fn network_report(network: &PassNetwork, from: &PitchSpec, to: &PitchSpec) -> NetworkReport {
    let mut players: Vec<PlayerNode> = network
        .mean_positions
        .iter()
        .map(|(player, coord)| {
            let (x, y) = transform_point(coord.x, coord.y, from, to);
            PlayerNode {
                player: player.clone(),
                x,
                y,
                total: network.player_totals.get(player).copied().unwrap_or(0),
            }
        })
        .collect();
    players.sort_by(|a, b| a.player.cmp(&b.player));

    let mut links: Vec<PassLink> = network
        .matrix
        .pairs()
        .map(|(pair, count)| {
            let (a, b) = pair.players();
            PassLink {
                a: a.to_string(),
                b: b.to_string(),
                count,
            }
        })
        .collect();
    links.sort_by(|l, r| (&l.a, &l.b).cmp(&(&r.a, &r.b)));

    NetworkReport {
        players,
        links,
        max_pair_count: network.max_pair_count(),
        total_pass_count: network.total_pass_count,
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json(report: &MatchReport, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::model::{Coord, EventType};
    use crate::network::{build, PairingMode};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn pass(player: &str, origin: Coord, destination: Option<Coord>) -> Event {
        Event {
            minute: 1,
            second: 0,
            event_type: EventType::Pass,
            player: player.to_string(),
            team: "T".to_string(),
            origin,
            destination,
        }
    }

    #[test]
    fn arrows_skip_events_without_destination() {
        let opta = PitchSpec::opta();
        let sb = PitchSpec::statsbomb();
        let a = pass("a", Coord::new(0.0, 0.0), Some(Coord::new(50.0, 50.0)));
        let b = pass("b", Coord::new(10.0, 10.0), None);
        let out = arrows(&[&a, &b], &opta, &sb);

        assert_eq!(out.xstart.len(), 1);
        assert!(approx_eq(out.xstart[0], 0.0));
        assert!(approx_eq(out.ystart[0], 80.0));
        assert!(approx_eq(out.xend[0], 60.0));
        assert!(approx_eq(out.yend[0], 40.0));
    }

    #[test]
    fn markers_standardize_origins() {
        let opta = PitchSpec::opta();
        let sb = PitchSpec::statsbomb();
        let a = pass("a", Coord::new(100.0, 100.0), None);
        let out = markers(&[&a], &opta, &sb);
        assert!(approx_eq(out.x[0], 120.0));
        assert!(approx_eq(out.y[0], 0.0));
    }

    #[test]
    fn network_report_is_sorted_and_standardized() {
        let events = vec![
            pass("zed", Coord::new(50.0, 50.0), Some(Coord::new(60.0, 50.0))),
            Event {
                event_type: EventType::PassReceived,
                ..pass("abe", Coord::new(60.0, 50.0), None)
            },
            pass("abe", Coord::new(20.0, 20.0), Some(Coord::new(30.0, 30.0))),
            Event {
                event_type: EventType::PassReceived,
                ..pass("zed", Coord::new(30.0, 30.0), None)
            },
        ];
        let network = build(&events, PairingMode::Strict).unwrap();
        let report = network_report(&network, &PitchSpec::opta(), &PitchSpec::statsbomb());

        assert_eq!(report.players.len(), 2);
        assert_eq!(report.players[0].player, "abe");
        assert_eq!(report.players[1].player, "zed");
        // zed's single pass origin (50,50) standardizes to (60,40).
        assert!(approx_eq(report.players[1].x, 60.0));
        assert!(approx_eq(report.players[1].y, 40.0));

        assert_eq!(report.links.len(), 1);
        assert_eq!(report.links[0].count, 2);
        assert_eq!(report.max_pair_count, 2);
        assert_eq!(report.total_pass_count, 2);
    }

    #[test]
    fn report_round_trips_through_json() {
        let grid = ZoneGrid::new(vec![0.0, 60.0, 120.0], vec![0.0, 80.0]).unwrap();
        let report = MatchReport {
            passes: Arrows::default(),
            failed_passes: Arrows::default(),
            shots: Markers::default(),
            goals: Markers::default(),
            final_third_passes: Arrows::default(),
            passes_into_box: Arrows::default(),
            pass_zones: zone_cells(&grid, vec![vec![1.0], vec![2.0]]),
            network: NetworkReport {
                players: vec![],
                links: vec![],
                max_pair_count: 0,
                total_pass_count: 0,
            },
            xg: BTreeMap::new(),
        };

        let json = serde_json::to_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pass_zones"]["cells"][1][0], 2.0);
        assert_eq!(value["pass_zones"]["edges_x"][1], 60.0);
    }
}
