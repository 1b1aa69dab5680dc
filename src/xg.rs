// Team expected-goals summary.
//
// Consumes precomputed per-shot xG rows (team, home, away, xG) and rolls
// them up into xG for / xG against per team, with per-match rates. The xG
// values themselves are provider data; nothing is modeled here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum XgError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// One shot's worth of xG, tagged with the match it came from. `home` and
/// `away` identify the fixture; `team` is the side that generated the shot.
#[derive(Debug, Clone, PartialEq)]
pub struct XgRecord {
    pub team: String,
    pub home: String,
    pub away: String,
    pub xg: f64,
}

/// Per-team rollup across all matches in the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamXgSummary {
    pub xg_for: f64,
    pub xg_against: f64,
    /// Matches in which the team generated at least one shot.
    pub matches: u32,
    pub xg_for_per_match: f64,
    pub xg_against_per_match: f64,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawXgRow {
    team: String,
    home: String,
    away: String,
    xG: f64,
}

fn load_xg_from_reader<R: Read>(rdr: R) -> Result<Vec<XgRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut records = Vec::new();
    for result in reader.deserialize::<RawXgRow>() {
        match result {
            Ok(raw) => {
                if !raw.xG.is_finite() {
                    warn!("skipping xG row for '{}': non-finite value", raw.team.trim());
                    continue;
                }
                records.push(XgRecord {
                    team: raw.team.trim().to_string(),
                    home: raw.home.trim().to_string(),
                    away: raw.away.trim().to_string(),
                    xg: raw.xG,
                });
            }
            Err(e) => {
                warn!("skipping malformed xG row: {e}");
            }
        }
    }
    Ok(records)
}

/// Load shot-level xG rows from CSV (`team,home,away,xG`).
pub fn load_xg_csv(path: &Path) -> Result<Vec<XgRecord>, XgError> {
    let file = std::fs::File::open(path).map_err(|e| XgError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_xg_from_reader(file).map_err(|e| XgError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Roll shot-level rows up to per-team totals and per-match rates.
///
/// Shots are first summed per (team, fixture); each fixture total then
/// counts toward the shooting team's `xg_for` and the opponent's
/// `xg_against`. The opponent is whichever of `home`/`away` is not the
/// shooting team. Per-match rates divide by the team's own match count;
/// a team that appears only as an opponent keeps rate 0 rather than
/// dividing by zero.
pub fn summarize(records: &[XgRecord]) -> BTreeMap<String, TeamXgSummary> {
    // Sum shots per (team, home, away) fixture key.
    let mut fixtures: HashMap<(String, String, String), f64> = HashMap::new();
    for record in records {
        *fixtures
            .entry((record.team.clone(), record.home.clone(), record.away.clone()))
            .or_insert(0.0) += record.xg;
    }

    let mut summaries: BTreeMap<String, TeamXgSummary> = BTreeMap::new();
    for ((team, home, away), total) in &fixtures {
        let opponent = if *home == *team { away } else { home };
        if opponent == team {
            warn!("fixture {home} vs {away}: cannot resolve opponent of '{team}', skipping");
            continue;
        }

        let entry = summaries.entry(team.clone()).or_default();
        entry.xg_for += total;
        entry.matches += 1;

        summaries.entry(opponent.clone()).or_default().xg_against += total;
    }

    for summary in summaries.values_mut() {
        if summary.matches > 0 {
            let n = summary.matches as f64;
            summary.xg_for_per_match = summary.xg_for / n;
            summary.xg_against_per_match = summary.xg_against / n;
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn record(team: &str, home: &str, away: &str, xg: f64) -> XgRecord {
        XgRecord {
            team: team.to_string(),
            home: home.to_string(),
            away: away.to_string(),
            xg,
        }
    }

    #[test]
    fn csv_rows_load() {
        let csv_data = "\
team,home,away,xG
Aucas,Aucas,Barcelona SC,0.32
Aucas,Aucas,Barcelona SC,0.11
Barcelona SC,Aucas,Barcelona SC,0.55";

        let records = load_xg_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].team, "Aucas");
        assert!(approx_eq(records[2].xg, 0.55));
    }

    #[test]
    fn malformed_and_non_finite_rows_are_skipped() {
        let csv_data = "\
team,home,away,xG
Aucas,Aucas,Emelec,0.4
Emelec,Aucas,Emelec,not_a_number
Emelec,Aucas,Emelec,NaN
Emelec,Aucas,Emelec,0.2";

        let records = load_xg_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn shots_accumulate_for_and_against() {
        let records = vec![
            // Match 1: A (home) vs B. A generates 0.5, B generates 0.8.
            record("A", "A", "B", 0.3),
            record("A", "A", "B", 0.2),
            record("B", "A", "B", 0.8),
            // Match 2: B (home) vs A. Only B shoots.
            record("B", "B", "A", 1.1),
        ];
        let summaries = summarize(&records);

        let a = &summaries["A"];
        assert!(approx_eq(a.xg_for, 0.5));
        assert!(approx_eq(a.xg_against, 1.9));
        assert_eq!(a.matches, 1);
        assert!(approx_eq(a.xg_for_per_match, 0.5));
        assert!(approx_eq(a.xg_against_per_match, 1.9));

        let b = &summaries["B"];
        assert!(approx_eq(b.xg_for, 1.9));
        assert!(approx_eq(b.xg_against, 0.5));
        assert_eq!(b.matches, 2);
        assert!(approx_eq(b.xg_for_per_match, 0.95));
        assert!(approx_eq(b.xg_against_per_match, 0.25));
    }

    #[test]
    fn opponent_resolves_from_either_side() {
        let records = vec![
            record("A", "A", "B", 0.4), // A at home
            record("A", "B", "A", 0.6), // A away
        ];
        let summaries = summarize(&records);
        assert!(approx_eq(summaries["B"].xg_against, 1.0));
        assert_eq!(summaries["B"].matches, 0);
        assert!(approx_eq(summaries["B"].xg_against_per_match, 0.0));
    }

    #[test]
    fn unresolvable_opponent_is_skipped() {
        let records = vec![record("A", "A", "A", 0.4)];
        let summaries = summarize(&records);
        assert!(summaries.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert!(summarize(&[]).is_empty());
    }
}
