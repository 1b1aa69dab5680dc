// Match analysis entry point.
//
// One-shot batch run, no flags:
// 1. Initialize tracing (stderr)
// 2. Load config/analysis.toml from the working directory
// 3. Load the event table
// 4. Prepare it (aliases, half mirroring, chronological + pairing order)
// 5. Build the event subsets and zone grid
// 6. Build the pass network
// 7. Summarize team xG when a table is configured
// 8. Write the renderer-facing report JSON

use matchframe::config;
use matchframe::events::prepare::{apply_aliases, prepare, PrepareConfig};
use matchframe::filters;
use matchframe::network::{self, PairingMode};
use matchframe::pitch::zones::bin_statistic;
use matchframe::report;
use matchframe::xg;

use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Tracing to stderr; stdout stays clean for shell composition.
    init_tracing()?;
    info!("match analysis starting");

    // 2. Config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "config loaded: events={}, half-time cutoff {}'",
        config.events_path, config.half_time_cutoff
    );

    // 3. Event table
    let raw_events = matchframe::events::load_events(Path::new(&config.events_path))
        .context("failed to load event table")?;
    info!("loaded {} events", raw_events.len());

    // 4. Preparation
    let renamed = apply_aliases(&raw_events, &config.aliases);
    let prepare_config = PrepareConfig {
        half_time_cutoff: config.half_time_cutoff,
        invert_first_half: config.invert_first_half,
        source_pitch: config.pitch_from,
        tie_break_by_type: true,
    };
    let mut prepared = prepare(&renamed, &prepare_config);
    if let Some(team) = &config.team {
        let before = prepared.len();
        prepared = filters::for_team(&prepared, team)
            .into_iter()
            .cloned()
            .collect();
        info!("kept {}/{} events for team {team}", prepared.len(), before);
    }

    // 5. Subsets and zone grid
    let from = &config.pitch_from;
    let to = &config.pitch_to;

    let pass_events = filters::passes(&prepared);
    let grid = config.zone_grid().context("invalid zone grid")?;
    let pass_markers = report::markers(&pass_events, from, to);
    let cells = bin_statistic(
        &pass_markers.x,
        &pass_markers.y,
        &grid,
        config.normalize_zones,
    );
    info!(
        "zone grid {}x{} over {} passes",
        grid.nx(),
        grid.ny(),
        pass_events.len()
    );

    // 6. Pass network
    let network = network::build(&prepared, PairingMode::Strict)
        .context("failed to build the pass network")?;
    info!(
        "pass network: {} players, {} total passes, strongest pair {}",
        network.mean_positions.len(),
        network.total_pass_count,
        network.max_pair_count()
    );

    // 7. Team xG (optional table)
    let xg_summaries = match &config.xg_path {
        Some(path) => {
            let records =
                xg::load_xg_csv(Path::new(path)).context("failed to load the xG table")?;
            let summaries = xg::summarize(&records);
            info!("xG summary for {} teams", summaries.len());
            summaries
        }
        None => BTreeMap::new(),
    };

    // 8. Report
    let match_report = report::MatchReport {
        passes: report::arrows(&pass_events, from, to),
        failed_passes: report::arrows(&filters::failed_passes(&prepared), from, to),
        shots: report::markers(&filters::shots(&prepared), from, to),
        goals: report::markers(&filters::goals(&prepared), from, to),
        final_third_passes: report::arrows(&filters::final_third_passes(&prepared, from), from, to),
        passes_into_box: report::arrows(&filters::passes_into_box(&prepared, from), from, to),
        pass_zones: report::zone_cells(&grid, cells),
        network: report::network_report(&network, from, to),
        xg: xg_summaries,
    };

    let output = Path::new(&config.output_path);
    report::write_json(&match_report, output).context("failed to write the report")?;
    info!("report written to {}", output.display());

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("matchframe=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
