//! Testing utilities for the rescue visualizer workspace
//!
//! Scene file builders, directory fixtures and a recording plot surface.

#![allow(missing_docs)]

use rescue_compare::{
    PlotSurface, ProgressionFigure, RenderError, SceneFigure, WorkerBarsFigure,
};
use rescue_scene::{Point3, Scene, SceneParser};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Builder for snapshot file text
#[derive(Debug, Clone, Default)]
pub struct SceneText {
    grid: Option<(u32, u32, u32)>,
    generation: Option<i64>,
    fitness: Option<f64>,
    worker_id: Option<u32>,
    survivors: Vec<(Point3, Option<i32>)>,
    obstacles: Vec<Point3>,
    path: Vec<Point3>,
}

impl SceneText {
    pub fn new() -> Self {
        Self::default().grid(10, 10, 10)
    }

    pub fn grid(mut self, x: u32, y: u32, z: u32) -> Self {
        self.grid = Some((x, y, z));
        self
    }

    pub fn generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn fitness(mut self, fitness: f64) -> Self {
        self.fitness = Some(fitness);
        self
    }

    pub fn worker_id(mut self, id: u32) -> Self {
        self.worker_id = Some(id);
        self
    }

    pub fn survivor(mut self, x: i32, y: i32, z: i32) -> Self {
        self.survivors.push((Point3::new(x, y, z), None));
        self
    }

    pub fn survivor_with_priority(mut self, x: i32, y: i32, z: i32, priority: i32) -> Self {
        self.survivors.push((Point3::new(x, y, z), Some(priority)));
        self
    }

    pub fn obstacle(mut self, x: i32, y: i32, z: i32) -> Self {
        self.obstacles.push(Point3::new(x, y, z));
        self
    }

    pub fn step(mut self, x: i32, y: i32, z: i32) -> Self {
        self.path.push(Point3::new(x, y, z));
        self
    }

    pub fn build(&self) -> String {
        let mut text = String::new();
        if let Some((x, y, z)) = self.grid {
            writeln!(text, "GRID: {x} {y} {z}").unwrap();
        }
        if let Some(generation) = self.generation {
            writeln!(text, "GEN: {generation}").unwrap();
        }
        if let Some(fitness) = self.fitness {
            writeln!(text, "FITNESS: {fitness:.2}").unwrap();
        }
        if let Some(id) = self.worker_id {
            writeln!(text, "WORKER_ID: {id}").unwrap();
        }
        writeln!(text, "SURVIVORS: {}", self.survivors.len()).unwrap();
        for (p, priority) in &self.survivors {
            match priority {
                Some(priority) => writeln!(text, "{} {} {} {priority}", p.x, p.y, p.z).unwrap(),
                None => writeln!(text, "{} {} {}", p.x, p.y, p.z).unwrap(),
            }
        }
        writeln!(text, "OBSTACLES: {}", self.obstacles.len()).unwrap();
        for p in &self.obstacles {
            writeln!(text, "{} {} {}", p.x, p.y, p.z).unwrap();
        }
        writeln!(text, "PATH: {}", self.path.len()).unwrap();
        for p in &self.path {
            writeln!(text, "{} {} {}", p.x, p.y, p.z).unwrap();
        }
        text
    }

    pub fn scene(&self) -> Scene {
        SceneParser::new().parse_str(&self.build()).unwrap()
    }
}

/// Minimal valid snapshot with the given fitness
pub fn snapshot(fitness: f64) -> SceneText {
    SceneText::new().fitness(fitness).step(0, 0, 0).step(1, 1, 1)
}

pub fn write_scene(dir: &Path, name: &str, text: &SceneText) -> PathBuf {
    write_raw(dir, name, &text.build())
}

pub fn write_raw(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Truncated file: declares more path steps than it has
pub const TRUNCATED: &str = "GRID: 5 5 5\nFITNESS: 1.00\nPATH: 4\n0 0 0\n";

/// Figure captured by [`RecordingSurface`]
#[derive(Debug, Clone)]
pub enum Recorded {
    SceneGrid(SceneFigure),
    Progression(ProgressionFigure),
    WorkerBars(WorkerBarsFigure),
}

/// Plot surface that keeps every figure it is asked to draw
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub figures: Vec<Recorded>,
    pub fail: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose every draw fails
    pub fn failing() -> Self {
        Self {
            figures: Vec::new(),
            fail: true,
        }
    }

    pub fn scene_grids(&self) -> Vec<&SceneFigure> {
        self.figures
            .iter()
            .filter_map(|f| match f {
                Recorded::SceneGrid(figure) => Some(figure),
                _ => None,
            })
            .collect()
    }

    pub fn progressions(&self) -> Vec<&ProgressionFigure> {
        self.figures
            .iter()
            .filter_map(|f| match f {
                Recorded::Progression(figure) => Some(figure),
                _ => None,
            })
            .collect()
    }

    pub fn worker_bars(&self) -> Vec<&WorkerBarsFigure> {
        self.figures
            .iter()
            .filter_map(|f| match f {
                Recorded::WorkerBars(figure) => Some(figure),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, figure: Recorded) -> Result<(), RenderError> {
        if self.fail {
            return Err(RenderError::backend("recording surface set to fail"));
        }
        self.figures.push(figure);
        Ok(())
    }
}

impl PlotSurface for RecordingSurface {
    fn draw_scene_grid(&mut self, figure: &SceneFigure) -> Result<(), RenderError> {
        self.record(Recorded::SceneGrid(figure.clone()))
    }

    fn draw_fitness_progression(&mut self, figure: &ProgressionFigure) -> Result<(), RenderError> {
        self.record(Recorded::Progression(figure.clone()))
    }

    fn draw_worker_bars(&mut self, figure: &WorkerBarsFigure) -> Result<(), RenderError> {
        self.record(Recorded::WorkerBars(figure.clone()))
    }
}
