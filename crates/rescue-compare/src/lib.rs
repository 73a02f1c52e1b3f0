//! Rescue Compare
//!
//! Side-by-side comparison of rescue planner output files.
//!
//! # Core Operations
//!
//! - **Discover**: Find snapshot, worker and baseline files and order them
//! - **Compare**: Lay scenes out as 3D panels on one figure
//! - **Analyze**: Fitness progression and survivor coverage per worker
//! - **Render**: Hand figure descriptions to a [`PlotSurface`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rescue_compare::{ComparisonOrchestrator, SvgSurface, VisualizerConfig};
//!
//! let config = VisualizerConfig::new().with_data_dir("runs/latest");
//! let surface = SvgSurface::new(&config.output_dir);
//! let mut orchestrator = ComparisonOrchestrator::new(config, surface);
//! let report = orchestrator.evolution_grid()?;
//! println!("{} panels, {} skipped", report.output, report.skipped.len());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod analytics;
pub mod config;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod orchestrator;
pub mod panel;
pub mod role;
pub mod surface;
pub mod svg;

pub use analytics::{
    chart_positions, fitness_progression, priority_coverage, survivor_coverage, FitnessPoint,
    WorkerStats, WorkerSummary,
};
pub use config::{FigureSize, ViewAngles, VisualizerConfig};
pub use discovery::{DataFile, Discovery};
pub use error::{CompareError, CompareResult, RenderError};
pub use layout::{AxisLimits, GridLayout};
pub use orchestrator::{ComparisonOrchestrator, EvolutionSummary, Mode, ModeReport, SkippedFile};
pub use panel::{panel_title, PanelLabel, ScenePanel};
pub use role::{order_key, FileRole};
pub use surface::{PlotSurface, ProgressionFigure, SceneFigure, WorkerBarsFigure};
pub use svg::SvgSurface;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
