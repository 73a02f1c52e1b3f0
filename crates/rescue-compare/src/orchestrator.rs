//! Comparison orchestrator
//!
//! Each visualization mode:
//! 1. Scans the data directory (no caching between modes)
//! 2. Parses every file of the mode's role once
//! 3. Skips and logs files that fail to parse
//! 4. Hands a figure description to the [`PlotSurface`]
//!
//! A mode with no files for its role fails with
//! [`CompareError::NotFound`] and leaves every other mode usable.

use crate::analytics::{
    chart_positions, fitness_progression, FitnessPoint, WorkerStats, WorkerSummary,
};
use crate::config::VisualizerConfig;
use crate::discovery::{DataFile, Discovery};
use crate::error::{CompareError, CompareResult};
use crate::layout::GridLayout;
use crate::panel::{PanelLabel, ScenePanel};
use crate::role::FileRole;
use crate::surface::{PlotSurface, ProgressionFigure, SceneFigure, WorkerBarsFigure};
use rescue_scene::{ParseError, Scene, SceneParser};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// A file left out of the current view
#[derive(Debug)]
pub struct SkippedFile {
    /// File path
    pub path: PathBuf,
    /// Why it was skipped
    pub error: ParseError,
}

/// Result of one mode, with the files it had to skip
#[derive(Debug)]
pub struct ModeReport<T> {
    /// Mode-specific output
    pub output: T,
    /// Files that failed to parse
    pub skipped: Vec<SkippedFile>,
}

/// Output of the combined evolution + progression mode
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSummary {
    /// Panels drawn in the grid
    pub panels: usize,
    /// Fitness progression
    pub progression: Vec<FitnessPoint>,
}

/// Visualization modes offered by the command surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// All snapshots side by side
    EvolutionGrid,
    /// Snapshot fitness over time
    FitnessProgression,
    /// Grid and progression chart together
    EvolutionAndProgression,
    /// Worker final paths side by side
    WorkerPaths,
    /// Baseline path only
    Baseline,
    /// Worker fitness / survivor bars
    WorkerAnalytics,
    /// One arbitrary file
    SingleFile,
}

impl Mode {
    /// Modes in menu order
    pub const ALL: [Mode; 7] = [
        Self::EvolutionGrid,
        Self::FitnessProgression,
        Self::EvolutionAndProgression,
        Self::WorkerPaths,
        Self::Baseline,
        Self::WorkerAnalytics,
        Self::SingleFile,
    ];

    /// Menu text
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EvolutionGrid => "Evolution grid (all snapshots side-by-side)",
            Self::FitnessProgression => "Fitness progression chart",
            Self::EvolutionAndProgression => "Evolution grid and fitness chart",
            Self::WorkerPaths => "Worker comparison (paths)",
            Self::Baseline => "A* baseline only",
            Self::WorkerAnalytics => "Worker fitness / survivor bar chart",
            Self::SingleFile => "Single file",
        }
    }

    /// Role whose files the mode needs, if fixed
    #[must_use]
    pub fn role(self) -> Option<FileRole> {
        match self {
            Self::EvolutionGrid | Self::FitnessProgression | Self::EvolutionAndProgression => {
                Some(FileRole::Snapshot)
            }
            Self::WorkerPaths | Self::WorkerAnalytics => Some(FileRole::Worker),
            Self::Baseline => Some(FileRole::Baseline),
            Self::SingleFile => None,
        }
    }

    /// Mode for a 1-based menu choice
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        let index: usize = choice.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed scenes aligned with their files; `None` where parsing failed
struct Loaded<'a> {
    files: &'a [DataFile],
    scenes: Vec<Option<Scene>>,
    skipped: Vec<SkippedFile>,
}

impl Loaded<'_> {
    fn parsed(&self) -> usize {
        self.scenes.iter().filter(|s| s.is_some()).count()
    }

    fn require_any(&self, role: FileRole) -> CompareResult<()> {
        if self.parsed() == 0 {
            return Err(CompareError::NothingParsed {
                role,
                skipped: self.skipped.len(),
            });
        }
        Ok(())
    }
}

/// Worker id from the file name, else from the `WORKER_ID` field
fn worker_id(file: &DataFile, scene: &Scene) -> Option<u64> {
    file.order_key.or_else(|| scene.worker_id().map(u64::from))
}

fn worker_label(file: &DataFile, scene: &Scene) -> PanelLabel {
    match worker_id(file, scene) {
        Some(id) => PanelLabel::Worker(id),
        None => PanelLabel::File(file.name()),
    }
}

/// Selects, parses and lays out scenes for each visualization mode
#[derive(Debug)]
pub struct ComparisonOrchestrator<S> {
    config: VisualizerConfig,
    parser: SceneParser,
    surface: S,
}

impl<S: PlotSurface> ComparisonOrchestrator<S> {
    /// Create orchestrator drawing onto `surface`
    #[inline]
    #[must_use]
    pub fn new(config: VisualizerConfig, surface: S) -> Self {
        Self {
            config,
            parser: SceneParser::new(),
            surface,
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Plotting surface
    #[inline]
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consume and return the plotting surface
    #[inline]
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Scan the configured data directory
    ///
    /// # Errors
    /// - `CompareError::Io` if the directory cannot be listed
    pub fn discover(&self) -> CompareResult<Discovery> {
        Discovery::scan(&self.config.data_dir)
    }

    fn load<'a>(&self, files: &'a [DataFile]) -> Loaded<'a> {
        let mut scenes = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();
        for file in files {
            match self.parser.parse_file(&file.path) {
                Ok(scene) => scenes.push(Some(scene)),
                Err(error) => {
                    tracing::warn!("Skipping {}: {}", file.path.display(), error);
                    skipped.push(SkippedFile {
                        path: file.path.clone(),
                        error,
                    });
                    scenes.push(None);
                }
            }
        }
        Loaded {
            files,
            scenes,
            skipped,
        }
    }

    fn progression_points(loaded: &Loaded<'_>) -> Vec<FitnessPoint> {
        let points = loaded
            .files
            .iter()
            .zip(&loaded.scenes)
            .filter_map(|(file, scene)| {
                scene.as_ref().map(|scene| FitnessPoint {
                    order_key: file.order_key,
                    label: file.name(),
                    fitness: scene.fitness(),
                })
            })
            .collect();
        fitness_progression(points)
    }

    fn draw_evolution(&mut self, loaded: Loaded<'_>) -> CompareResult<usize> {
        let total = loaded.files.len();
        let panels: Vec<Option<ScenePanel>> = loaded
            .scenes
            .into_iter()
            .enumerate()
            .map(|(i, scene)| {
                scene.map(|scene| {
                    ScenePanel::new(PanelLabel::Snapshot { index: i + 1, total }, scene)
                })
            })
            .collect();

        let figure = SceneFigure {
            name: "evolution_grid".to_string(),
            title: "Genetic Algorithm Evolution - Path Optimization Progress".to_string(),
            size: self.config.grid_figure,
            view: self.config.view,
            layout: GridLayout::for_panels(total),
            panels,
        };
        self.surface.draw_scene_grid(&figure)?;
        let drawn = figure.drawn_panels();
        tracing::info!("Evolution grid: {} of {} snapshots drawn", drawn, total);
        Ok(drawn)
    }

    fn draw_progression(&mut self, points: &[FitnessPoint]) -> CompareResult<()> {
        let figure = ProgressionFigure {
            name: "fitness_progression".to_string(),
            title: "Genetic Algorithm Fitness Evolution".to_string(),
            size: self.config.chart_figure,
            x_desc: "Snapshot Number".to_string(),
            positions: chart_positions(points),
            points: points.to_vec(),
        };
        self.surface.draw_fitness_progression(&figure)?;
        Ok(())
    }

    /// All snapshots side by side
    ///
    /// Slots follow file order; a file that fails to parse leaves its slot
    /// blank. Returns the number of panels drawn.
    ///
    /// # Errors
    /// - `CompareError::NotFound` without snapshot files
    /// - `CompareError::NothingParsed` if none of them parse
    /// - `CompareError::Render` on surface failure
    pub fn evolution_grid(&mut self) -> CompareResult<ModeReport<usize>> {
        let discovery = self.discover()?;
        let mut loaded = self.load(discovery.files(FileRole::Snapshot)?);
        loaded.require_any(FileRole::Snapshot)?;

        let skipped = std::mem::take(&mut loaded.skipped);
        let output = self.draw_evolution(loaded)?;
        Ok(ModeReport { output, skipped })
    }

    /// Snapshot fitness sorted by filename key
    ///
    /// # Errors
    /// Same as [`ComparisonOrchestrator::evolution_grid`].
    pub fn fitness_progression(&mut self) -> CompareResult<ModeReport<Vec<FitnessPoint>>> {
        let discovery = self.discover()?;
        let loaded = self.load(discovery.files(FileRole::Snapshot)?);
        loaded.require_any(FileRole::Snapshot)?;

        let points = Self::progression_points(&loaded);
        self.draw_progression(&points)?;
        tracing::info!("Fitness progression: {} points", points.len());
        Ok(ModeReport {
            output: points,
            skipped: loaded.skipped,
        })
    }

    /// Evolution grid and progression chart from one parse pass
    ///
    /// # Errors
    /// Same as [`ComparisonOrchestrator::evolution_grid`].
    pub fn evolution_and_progression(&mut self) -> CompareResult<ModeReport<EvolutionSummary>> {
        let discovery = self.discover()?;
        let mut loaded = self.load(discovery.files(FileRole::Snapshot)?);
        loaded.require_any(FileRole::Snapshot)?;

        let progression = Self::progression_points(&loaded);
        let skipped = std::mem::take(&mut loaded.skipped);
        let panels = self.draw_evolution(loaded)?;
        self.draw_progression(&progression)?;
        Ok(ModeReport {
            output: EvolutionSummary {
                panels,
                progression,
            },
            skipped,
        })
    }

    /// Worker final paths side by side, plus the baseline when configured
    ///
    /// # Errors
    /// - `CompareError::NotFound` without worker files
    /// - `CompareError::NothingParsed` if no worker file parses
    /// - `CompareError::Render` on surface failure
    pub fn worker_paths(&mut self) -> CompareResult<ModeReport<usize>> {
        let discovery = self.discover()?;
        let loaded = self.load(discovery.files(FileRole::Worker)?);
        loaded.require_any(FileRole::Worker)?;

        let Loaded {
            files,
            scenes,
            mut skipped,
        } = loaded;
        let mut panels: Vec<Option<ScenePanel>> = files
            .iter()
            .zip(scenes)
            .map(|(file, scene)| {
                scene.map(|scene| ScenePanel::new(worker_label(file, &scene), scene))
            })
            .collect();

        if self.config.include_baseline_with_workers {
            let baseline = self.load(discovery.get(FileRole::Baseline));
            skipped.extend(baseline.skipped);
            panels.extend(
                baseline
                    .scenes
                    .into_iter()
                    .map(|scene| scene.map(|scene| ScenePanel::new(PanelLabel::Baseline, scene))),
            );
        }

        let figure = SceneFigure {
            name: "worker_paths".to_string(),
            title: "Worker Comparison - Final Paths".to_string(),
            size: self.config.grid_figure,
            view: self.config.view,
            layout: GridLayout::for_panels(panels.len()),
            panels,
        };
        self.surface.draw_scene_grid(&figure)?;
        let drawn = figure.drawn_panels();
        tracing::info!("Worker comparison: {} panels drawn", drawn);
        Ok(ModeReport {
            output: drawn,
            skipped,
        })
    }

    /// Baseline path alone
    ///
    /// # Errors
    /// - `CompareError::NotFound` without the baseline file
    /// - `CompareError::NothingParsed` if it does not parse
    /// - `CompareError::Render` on surface failure
    pub fn baseline_view(&mut self) -> CompareResult<ModeReport<usize>> {
        let discovery = self.discover()?;
        let loaded = self.load(discovery.files(FileRole::Baseline)?);
        loaded.require_any(FileRole::Baseline)?;

        let panels = loaded
            .scenes
            .into_iter()
            .map(|scene| scene.map(|scene| ScenePanel::new(PanelLabel::Baseline, scene)))
            .collect::<Vec<_>>();
        let figure = SceneFigure {
            name: "baseline".to_string(),
            title: "A* Baseline Path".to_string(),
            size: self.config.single_figure,
            view: self.config.view,
            layout: GridLayout::for_panels(panels.len()),
            panels,
        };
        self.surface.draw_scene_grid(&figure)?;
        Ok(ModeReport {
            output: figure.drawn_panels(),
            skipped: loaded.skipped,
        })
    }

    /// Per-worker fitness and survivor coverage, drawn as bars
    ///
    /// # Errors
    /// - `CompareError::NotFound` without worker files
    /// - `CompareError::NothingParsed` if no worker file parses
    /// - `CompareError::Render` on surface failure
    pub fn worker_analytics(&mut self) -> CompareResult<ModeReport<WorkerStats>> {
        let discovery = self.discover()?;
        let loaded = self.load(discovery.files(FileRole::Worker)?);
        loaded.require_any(FileRole::Worker)?;

        let workers: Vec<WorkerSummary> = loaded
            .files
            .iter()
            .zip(&loaded.scenes)
            .filter_map(|(file, scene)| {
                scene.as_ref().map(|scene| {
                    WorkerSummary::from_scene(worker_id(file, scene), &file.name(), scene)
                })
            })
            .collect();

        let figure = WorkerBarsFigure {
            name: "worker_analytics".to_string(),
            title: "Worker Comparison - Fitness and Survivors Reached".to_string(),
            size: self.config.chart_figure,
            workers,
        };
        self.surface.draw_worker_bars(&figure)?;
        let stats = WorkerStats::new(figure.workers);
        tracing::info!("Worker analytics: {} workers", stats.workers.len());
        Ok(ModeReport {
            output: stats,
            skipped: loaded.skipped,
        })
    }

    /// One arbitrary file
    ///
    /// The label follows the file name's role; snapshots are numbered
    /// against the other snapshots in the same directory.
    ///
    /// # Errors
    /// - `CompareError::Parse` if the file cannot be read or parsed
    /// - `CompareError::Render` on surface failure
    pub fn single_file(&mut self, path: impl AsRef<Path>) -> CompareResult<ModeReport<usize>> {
        let path = path.as_ref();
        let scene = self
            .parser
            .parse_file(path)
            .map_err(|source| CompareError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let label = match FileRole::classify(&file_name) {
            Some(FileRole::Baseline) => PanelLabel::Baseline,
            Some(FileRole::Worker) => worker_label(&DataFile::new(path, FileRole::Worker), &scene),
            Some(FileRole::Snapshot) => snapshot_label(path, &file_name),
            None => PanelLabel::File(file_name.clone()),
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());
        let figure = SceneFigure {
            name: format!("single_{stem}"),
            title: file_name,
            size: self.config.single_figure,
            view: self.config.view,
            layout: GridLayout::for_panels(1),
            panels: vec![Some(ScenePanel::new(label, scene))],
        };
        self.surface.draw_scene_grid(&figure)?;
        Ok(ModeReport {
            output: 1,
            skipped: Vec::new(),
        })
    }
}

/// `Snapshot i/n` among the snapshots next to `path`, else the bare name
fn snapshot_label(path: &Path, file_name: &str) -> PanelLabel {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let position = Discovery::scan(dir).ok().and_then(|discovery| {
        let files = discovery.get(FileRole::Snapshot);
        files
            .iter()
            .position(|f| f.name() == file_name)
            .map(|i| (i + 1, files.len()))
    });
    match position {
        Some((index, total)) => PanelLabel::Snapshot { index, total },
        None => PanelLabel::File(file_name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(Mode::from_choice("1"), Some(Mode::EvolutionGrid));
        assert_eq!(Mode::from_choice(" 7 \n"), Some(Mode::SingleFile));
        assert_eq!(Mode::from_choice("0"), None);
        assert_eq!(Mode::from_choice("8"), None);
        assert_eq!(Mode::from_choice("grid"), None);
    }

    #[test]
    fn mode_roles() {
        assert_eq!(Mode::FitnessProgression.role(), Some(FileRole::Snapshot));
        assert_eq!(Mode::WorkerAnalytics.role(), Some(FileRole::Worker));
        assert_eq!(Mode::Baseline.role(), Some(FileRole::Baseline));
        assert_eq!(Mode::SingleFile.role(), None);
    }

    #[test]
    fn worker_label_prefers_file_name() {
        let scene = SceneParser::new().parse_str("WORKER_ID: 9\n").unwrap();
        let named = DataFile::new("robot_data_worker_4.txt", FileRole::Worker);
        assert_eq!(worker_label(&named, &scene), PanelLabel::Worker(4));

        let unnamed = DataFile::new("robot_data_worker_x.txt", FileRole::Worker);
        assert_eq!(worker_label(&unnamed, &scene), PanelLabel::Worker(9));

        let bare = SceneParser::new().parse_str("").unwrap();
        assert_eq!(
            worker_label(&unnamed, &bare),
            PanelLabel::File("robot_data_worker_x.txt".to_string())
        );
    }
}
