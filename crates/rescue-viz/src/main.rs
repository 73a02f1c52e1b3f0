//! Rescue path visualizer
//!
//! Renders planner snapshot files from a data directory into SVG figures.
//! Without a subcommand an interactive menu asks for the mode.

mod menu;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use rescue_compare::{
    CompareError, CompareResult, ComparisonOrchestrator, Discovery, Mode, SkippedFile,
    SvgSurface, VisualizerConfig,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// What to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    Mode(Mode),
    File(PathBuf),
}

fn build_cli() -> Command {
    Command::new("rescue-viz")
        .version(rescue_compare::VERSION)
        .about("Rescue robot path visualizer")
        .arg(
            Arg::new("dir")
                .long("dir")
                .short('d')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory containing robot_data_*.txt files"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory figures are written to"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand(Command::new("grid").about("Evolution grid (all snapshots side-by-side)"))
        .subcommand(Command::new("fitness").about("Fitness progression chart"))
        .subcommand(Command::new("both").about("Evolution grid and fitness chart"))
        .subcommand(Command::new("workers").about("Worker comparison (paths)"))
        .subcommand(Command::new("baseline").about("A* baseline only"))
        .subcommand(Command::new("worker-stats").about("Worker fitness / survivor bar chart"))
        .subcommand(
            Command::new("file").about("Single file").arg(
                Arg::new("path")
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Data file to render"),
            ),
        )
        .subcommand(Command::new("menu").about("Interactive mode selection (default)"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Config file first, then command-line overrides
fn load_config(matches: &ArgMatches) -> Result<VisualizerConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => VisualizerConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => VisualizerConfig::new(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("dir") {
        config = config.with_data_dir(dir);
    }
    if let Some(out) = matches.get_one::<PathBuf>("out") {
        config = config.with_output_dir(out);
    }
    Ok(config)
}

fn request_for(subcommand: Option<(&str, &ArgMatches)>) -> Option<Request> {
    match subcommand? {
        ("grid", _) => Some(Request::Mode(Mode::EvolutionGrid)),
        ("fitness", _) => Some(Request::Mode(Mode::FitnessProgression)),
        ("both", _) => Some(Request::Mode(Mode::EvolutionAndProgression)),
        ("workers", _) => Some(Request::Mode(Mode::WorkerPaths)),
        ("baseline", _) => Some(Request::Mode(Mode::Baseline)),
        ("worker-stats", _) => Some(Request::Mode(Mode::WorkerAnalytics)),
        ("file", args) => args.get_one::<PathBuf>("path").cloned().map(Request::File),
        _ => None,
    }
}

fn print_skipped(skipped: &[SkippedFile]) {
    for file in skipped {
        println!("Skipped {}: {}", file.path.display(), file.error);
    }
}

fn run_mode(
    orchestrator: &mut ComparisonOrchestrator<SvgSurface>,
    mode: Mode,
) -> CompareResult<()> {
    match mode {
        Mode::EvolutionGrid => {
            let report = orchestrator.evolution_grid()?;
            println!("Drew {} snapshots", report.output);
            print_skipped(&report.skipped);
        }
        Mode::FitnessProgression => {
            let report = orchestrator.fitness_progression()?;
            for point in &report.output {
                println!("  {:<32} {:>12.2}", point.label, point.fitness);
            }
            print_skipped(&report.skipped);
        }
        Mode::EvolutionAndProgression => {
            let report = orchestrator.evolution_and_progression()?;
            println!(
                "Drew {} snapshots, {} progression points",
                report.output.panels,
                report.output.progression.len()
            );
            print_skipped(&report.skipped);
        }
        Mode::WorkerPaths => {
            let report = orchestrator.worker_paths()?;
            println!("Drew {} paths", report.output);
            print_skipped(&report.skipped);
        }
        Mode::Baseline => {
            let report = orchestrator.baseline_view()?;
            print_skipped(&report.skipped);
        }
        Mode::WorkerAnalytics => {
            let report = orchestrator.worker_analytics()?;
            print!("{}", report.output);
            print_skipped(&report.skipped);
        }
        Mode::SingleFile => tracing::warn!("Single file mode needs a file path"),
    }
    Ok(())
}

/// Mode failures are diagnostics only; the exit status stays zero
fn report_failure(err: &CompareError) {
    if err.is_empty_selection() {
        tracing::warn!("{err}");
    } else {
        tracing::error!("{err}");
    }
}

fn run(orchestrator: &mut ComparisonOrchestrator<SvgSurface>, request: Request) {
    let before = orchestrator.surface().written().len();
    let outcome = match request {
        Request::Mode(mode) => {
            tracing::info!("Mode: {mode}");
            run_mode(orchestrator, mode)
        }
        Request::File(path) => orchestrator.single_file(&path).map(|_| ()),
    };

    if let Err(err) = outcome {
        report_failure(&err);
    }
    for path in &orchestrator.surface().written()[before..] {
        println!("Saved {}", path.display());
    }
}

/// Scan the data directory and ask for a mode
///
/// Only the menu needs the listing up front; an unreadable directory is
/// reported and nothing runs.
fn menu_request<R: BufRead, W: Write>(
    config: &VisualizerConfig,
    input: &mut R,
    out: &mut W,
) -> Option<Request> {
    let discovery = match Discovery::scan(&config.data_dir) {
        Ok(discovery) => discovery,
        Err(err) => {
            report_failure(&err);
            return None;
        }
    };
    match menu::select(&discovery, input, out) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!("Menu input failed: {err}");
            None
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let matches = build_cli().get_matches();
    let config = load_config(&matches)?;

    let request = match request_for(matches.subcommand()) {
        Some(request) => Some(request),
        None => {
            let stdin = io::stdin();
            menu_request(&config, &mut stdin.lock(), &mut io::stdout())
        }
    };

    let surface = SvgSurface::new(&config.output_dir);
    let mut orchestrator = ComparisonOrchestrator::new(config, surface);
    if let Some(request) = request {
        run(&mut orchestrator, request);
    }
    Ok(())
}
