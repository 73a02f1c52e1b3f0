//! Plotting surface boundary
//!
//! The orchestrator only builds figure descriptions. Turning them into
//! pixels (or SVG) is the job of a [`PlotSurface`] implementation.

use crate::analytics::{FitnessPoint, WorkerSummary};
use crate::config::{FigureSize, ViewAngles};
use crate::error::RenderError;
use crate::layout::GridLayout;
use crate::panel::ScenePanel;

/// Grid of 3D scene panels
#[derive(Debug, Clone)]
pub struct SceneFigure {
    /// Output name (no extension)
    pub name: String,
    /// Figure title
    pub title: String,
    /// Pixel size
    pub size: FigureSize,
    /// 3D camera
    pub view: ViewAngles,
    /// Panel grid
    pub layout: GridLayout,
    /// One entry per slot in row-major order; `None` leaves the slot blank
    pub panels: Vec<Option<ScenePanel>>,
}

impl SceneFigure {
    /// Number of slots that carry a panel
    #[must_use]
    pub fn drawn_panels(&self) -> usize {
        self.panels.iter().filter(|p| p.is_some()).count()
    }
}

/// Fitness-over-time line chart
#[derive(Debug, Clone)]
pub struct ProgressionFigure {
    /// Output name (no extension)
    pub name: String,
    /// Chart title
    pub title: String,
    /// Pixel size
    pub size: FigureSize,
    /// X axis description
    pub x_desc: String,
    /// Points, sorted by ordering key
    pub points: Vec<FitnessPoint>,
    /// X coordinate of each point
    pub positions: Vec<f64>,
}

/// Worker fitness / survivor bar charts
#[derive(Debug, Clone)]
pub struct WorkerBarsFigure {
    /// Output name (no extension)
    pub name: String,
    /// Figure title
    pub title: String,
    /// Pixel size
    pub size: FigureSize,
    /// One bar per worker
    pub workers: Vec<WorkerSummary>,
}

/// Opaque drawing backend
pub trait PlotSurface {
    /// Draw a grid of 3D scene panels
    ///
    /// # Errors
    /// Backend-specific drawing failures.
    fn draw_scene_grid(&mut self, figure: &SceneFigure) -> Result<(), RenderError>;

    /// Draw a fitness progression chart
    ///
    /// # Errors
    /// Backend-specific drawing failures.
    fn draw_fitness_progression(&mut self, figure: &ProgressionFigure) -> Result<(), RenderError>;

    /// Draw worker comparison bars
    ///
    /// # Errors
    /// Backend-specific drawing failures.
    fn draw_worker_bars(&mut self, figure: &WorkerBarsFigure) -> Result<(), RenderError>;
}

impl<S: PlotSurface + ?Sized> PlotSurface for &mut S {
    fn draw_scene_grid(&mut self, figure: &SceneFigure) -> Result<(), RenderError> {
        (**self).draw_scene_grid(figure)
    }

    fn draw_fitness_progression(&mut self, figure: &ProgressionFigure) -> Result<(), RenderError> {
        (**self).draw_fitness_progression(figure)
    }

    fn draw_worker_bars(&mut self, figure: &WorkerBarsFigure) -> Result<(), RenderError> {
        (**self).draw_worker_bars(figure)
    }
}
