//! Derived statistics over parsed scenes
//!
//! Nothing here validates the planner's output; the numbers only summarise
//! what the files already contain.

use rescue_scene::Scene;
use std::fmt::{self, Display, Formatter};

/// One point of the fitness-over-time curve
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessPoint {
    /// Filename ordering key
    pub order_key: Option<u64>,
    /// File name, for annotations
    pub label: String,
    /// Fitness read from the file
    pub fitness: f64,
}

/// Sort points by ordering key ascending (stable for equal keys)
#[must_use]
pub fn fitness_progression(mut points: Vec<FitnessPoint>) -> Vec<FitnessPoint> {
    points.sort_by_key(|p| p.order_key);
    points
}

/// X coordinates for a progression chart
///
/// The ordering key when every point has one, otherwise 1-based positions.
#[must_use]
pub fn chart_positions(points: &[FitnessPoint]) -> Vec<f64> {
    let keys: Option<Vec<u64>> = points.iter().map(|p| p.order_key).collect();
    match keys {
        Some(keys) => keys.into_iter().map(|k| k as f64).collect(),
        None => (1..=points.len()).map(|i| i as f64).collect(),
    }
}

/// Path-step by survivor coincidences
///
/// Every path step contributes one count per survivor sitting on the same
/// cell, so revisiting a survivor's cell counts again.
#[must_use]
pub fn survivor_coverage(scene: &Scene) -> usize {
    scene
        .path()
        .iter()
        .map(|step| {
            scene
                .survivors()
                .iter()
                .filter(|s| s.position == *step)
                .count()
        })
        .sum()
}

/// Sum of survivor priorities over the same coincidences as [`survivor_coverage`]
#[must_use]
pub fn priority_coverage(scene: &Scene) -> i64 {
    scene
        .path()
        .iter()
        .flat_map(|step| {
            scene
                .survivors()
                .iter()
                .filter(move |s| s.position == *step)
        })
        .map(|s| i64::from(s.priority))
        .sum()
}

/// Per-worker figures for the bar-chart comparison
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerSummary {
    /// Worker id
    pub worker_id: Option<u64>,
    /// Axis label
    pub label: String,
    /// Fitness
    pub fitness: f64,
    /// Path steps
    pub path_len: usize,
    /// Survivor coincidences along the path
    pub survivors_reached: usize,
    /// Priority sum over those coincidences
    pub priority_reached: i64,
}

impl WorkerSummary {
    /// Summarise one worker scene
    ///
    /// Labelled `W<id>`, or `file_name` when the worker has no id.
    #[must_use]
    pub fn from_scene(worker_id: Option<u64>, file_name: &str, scene: &Scene) -> Self {
        let label = worker_id.map_or_else(|| file_name.to_string(), |id| format!("W{id}"));
        Self {
            worker_id,
            label,
            fitness: scene.fitness(),
            path_len: scene.path_len(),
            survivors_reached: survivor_coverage(scene),
            priority_reached: priority_coverage(scene),
        }
    }
}

/// Aggregate over all worker summaries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerStats {
    /// Summaries in worker order
    pub workers: Vec<WorkerSummary>,
}

impl WorkerStats {
    /// Wrap summaries
    #[inline]
    #[must_use]
    pub fn new(workers: Vec<WorkerSummary>) -> Self {
        Self { workers }
    }

    /// Worker with the highest fitness (first one on ties)
    #[must_use]
    pub fn best_by_fitness(&self) -> Option<&WorkerSummary> {
        self.workers.iter().reduce(|best, w| if w.fitness > best.fitness { w } else { best })
    }

    /// Worker with the most survivor coincidences (first one on ties)
    #[must_use]
    pub fn best_by_coverage(&self) -> Option<&WorkerSummary> {
        self.workers
            .iter()
            .reduce(|best, w| if w.survivors_reached > best.survivors_reached { w } else { best })
    }

    /// Mean fitness
    #[must_use]
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.workers.is_empty() {
            return None;
        }
        let total: f64 = self.workers.iter().map(|w| w.fitness).sum();
        Some(total / self.workers.len() as f64)
    }
}

impl Display for WorkerStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>12} {:>8} {:>10} {:>10}",
            "worker", "fitness", "steps", "survivors", "priority"
        )?;
        for w in &self.workers {
            writeln!(
                f,
                "{:<8} {:>12.2} {:>8} {:>10} {:>10}",
                w.label, w.fitness, w.path_len, w.survivors_reached, w.priority_reached
            )?;
        }
        if let (Some(best), Some(mean)) = (self.best_by_fitness(), self.mean_fitness()) {
            writeln!(f, "best fitness: {} ({:.2}), mean {:.2}", best.label, best.fitness, mean)?;
        }
        if let Some(best) = self.best_by_coverage() {
            writeln!(
                f,
                "most survivors reached: {} ({})",
                best.label, best.survivors_reached
            )?;
        }
        Ok(())
    }
}
