// Configuration loading and parsing (config/analysis.toml).

use crate::pitch::spec::PitchSpec;
use crate::pitch::zones::ZoneGrid;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Raw file structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct AnalysisFile {
    #[serde(rename = "match")]
    match_section: MatchSection,
    pitch: PitchSection,
    data: DataSection,
    #[serde(default)]
    zones: ZonesSection,
    #[serde(default)]
    aliases: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MatchSection {
    half_time_cutoff: u32,
    #[serde(default)]
    invert_first_half: bool,
    #[serde(default)]
    team: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PitchSection {
    from: String,
    to: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    events: String,
    #[serde(default)]
    xg: Option<String>,
    #[serde(default = "default_output")]
    output: String,
}

fn default_output() -> String {
    "report.json".to_string()
}

/// Zone edges are given in the drawing (target) system. The defaults cut
/// the StatsBomb pitch into sixths along its length and at the
/// six-yard-box lines across it.
#[derive(Debug, Clone, Deserialize)]
struct ZonesSection {
    #[serde(default = "default_x_edges")]
    x_edges: Vec<f64>,
    #[serde(default = "default_y_edges")]
    y_edges: Vec<f64>,
    #[serde(default = "default_normalize")]
    normalize: bool,
}

impl Default for ZonesSection {
    fn default() -> Self {
        ZonesSection {
            x_edges: default_x_edges(),
            y_edges: default_y_edges(),
            normalize: default_normalize(),
        }
    }
}

fn default_x_edges() -> Vec<f64> {
    vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]
}

fn default_y_edges() -> Vec<f64> {
    vec![0.0, 30.0, 50.0, 80.0]
}

fn default_normalize() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Assembled public Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub half_time_cutoff: u32,
    pub invert_first_half: bool,
    /// Restrict the analysis to one team's events. `None` analyzes the
    /// whole sheet (single-team sheets need no filter).
    pub team: Option<String>,
    pub pitch_from: PitchSpec,
    pub pitch_to: PitchSpec,
    pub events_path: String,
    pub xg_path: Option<String>,
    pub output_path: String,
    pub zone_x_edges: Vec<f64>,
    pub zone_y_edges: Vec<f64>,
    pub normalize_zones: bool,
    /// Raw sheet name -> display name.
    pub aliases: HashMap<String, String>,
}

impl Config {
    /// The zone grid described by the config. Edges were validated at load
    /// time, so this only fails if the config was constructed by hand.
    pub fn zone_grid(&self) -> Result<ZoneGrid, ConfigError> {
        ZoneGrid::new(self.zone_x_edges.clone(), self.zone_y_edges.clone()).map_err(|e| {
            ConfigError::ValidationError {
                field: "zones".into(),
                message: e.to_string(),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse and validate an analysis config from TOML text.
fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: AnalysisFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    assemble(file)
}

fn assemble(file: AnalysisFile) -> Result<Config, ConfigError> {
    let pitch_from =
        PitchSpec::from_name(&file.pitch.from).map_err(|e| ConfigError::ValidationError {
            field: "pitch.from".into(),
            message: e.to_string(),
        })?;
    let pitch_to =
        PitchSpec::from_name(&file.pitch.to).map_err(|e| ConfigError::ValidationError {
            field: "pitch.to".into(),
            message: e.to_string(),
        })?;

    let config = Config {
        half_time_cutoff: file.match_section.half_time_cutoff,
        invert_first_half: file.match_section.invert_first_half,
        team: file.match_section.team,
        pitch_from,
        pitch_to,
        events_path: file.data.events,
        xg_path: file.data.xg,
        output_path: file.data.output,
        zone_x_edges: file.zones.x_edges,
        zone_y_edges: file.zones.y_edges,
        normalize_zones: file.zones.normalize,
        aliases: file.aliases,
    };

    validate(&config)?;
    Ok(config)
}

/// Load `config/analysis.toml` relative to the given base directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("analysis.toml");
    let text = std::fs::read_to_string(&path)
        .map_err(|_| ConfigError::FileNotFound { path: path.clone() })?;
    parse_config(&text, &path)
}

/// Load the analysis config from the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("config/analysis.toml"),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.half_time_cutoff == 0 {
        return Err(ConfigError::ValidationError {
            field: "match.half_time_cutoff".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.events_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.events".into(),
            message: "must not be empty".into(),
        });
    }

    if config.output_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.output".into(),
            message: "must not be empty".into(),
        });
    }

    // Surfaces bad edges at load time instead of mid-pipeline.
    config.zone_grid()?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
[match]
half_time_cutoff = 60
invert_first_half = false
team = "La Concordia"

[pitch]
from = "opta"
to = "statsbomb"

[data]
events = "data/events.csv"
xg = "data/xg.csv"
output = "out/report.json"

[zones]
x_edges = [0.0, 40.0, 80.0, 120.0]
y_edges = [0.0, 40.0, 80.0]
normalize = false

[aliases]
"54 Hurt" = "54 Hurtado"
"#;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("test/analysis.toml"))
    }

    #[test]
    fn full_config_parses() {
        let config = parse(FULL_CONFIG).unwrap();
        assert_eq!(config.half_time_cutoff, 60);
        assert!(!config.invert_first_half);
        assert_eq!(config.team.as_deref(), Some("La Concordia"));
        assert_eq!(config.pitch_from, PitchSpec::opta());
        assert_eq!(config.pitch_to, PitchSpec::statsbomb());
        assert_eq!(config.events_path, "data/events.csv");
        assert_eq!(config.xg_path.as_deref(), Some("data/xg.csv"));
        assert_eq!(config.output_path, "out/report.json");
        assert_eq!(config.zone_x_edges, vec![0.0, 40.0, 80.0, 120.0]);
        assert!(!config.normalize_zones);
        assert_eq!(config.aliases["54 Hurt"], "54 Hurtado");
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse(
            r#"
[match]
half_time_cutoff = 45

[pitch]
from = "opta"
to = "statsbomb"

[data]
events = "events.csv"
"#,
        )
        .unwrap();

        assert!(!config.invert_first_half);
        assert_eq!(config.team, None);
        assert_eq!(config.xg_path, None);
        assert_eq!(config.output_path, "report.json");
        assert_eq!(config.zone_x_edges.len(), 7);
        assert_eq!(config.zone_y_edges, vec![0.0, 30.0, 50.0, 80.0]);
        assert!(config.normalize_zones);
        assert!(config.aliases.is_empty());
        assert!(config.zone_grid().is_ok());
    }

    #[test]
    fn unknown_pitch_system_is_a_validation_error() {
        let err = parse(
            r#"
[match]
half_time_cutoff = 45

[pitch]
from = "tracab"
to = "statsbomb"

[data]
events = "events.csv"
"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "pitch.from")
        );
    }

    #[test]
    fn zero_cutoff_is_rejected() {
        let err = parse(
            r#"
[match]
half_time_cutoff = 0

[pitch]
from = "opta"
to = "statsbomb"

[data]
events = "events.csv"
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "match.half_time_cutoff"
        ));
    }

    #[test]
    fn bad_zone_edges_are_rejected() {
        let err = parse(
            r#"
[match]
half_time_cutoff = 45

[pitch]
from = "opta"
to = "statsbomb"

[data]
events = "events.csv"

[zones]
x_edges = [0.0, 50.0, 50.0]
y_edges = [0.0, 80.0]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "zones"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("not = [valid").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_config_from(Path::new("/nonexistent-dir-for-test")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
