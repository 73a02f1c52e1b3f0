//! Panel labels and titles

use crate::layout::AxisLimits;
use rescue_scene::Scene;
use std::fmt::{self, Display, Formatter};

/// What a panel shows, for its title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelLabel {
    /// Snapshot `index` of `total` (1-based)
    Snapshot {
        /// Position among the snapshots
        index: usize,
        /// Number of snapshots
        total: usize,
    },
    /// Worker with id
    Worker(u64),
    /// Baseline solution
    Baseline,
    /// Any other file, by name
    File(String),
}

impl Display for PanelLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot { index, total } => write!(f, "Snapshot {index}/{total}"),
            Self::Worker(id) => write!(f, "Worker {id}"),
            Self::Baseline => f.write_str("A* Baseline"),
            Self::File(name) => f.write_str(name),
        }
    }
}

/// Two-line panel title: label and generation, then fitness and path length
#[must_use]
pub fn panel_title(label: &PanelLabel, scene: &Scene) -> String {
    let mut title = label.to_string();
    if let Some(generation) = scene.generation() {
        title.push_str(&format!(" | Gen {generation}"));
    }
    title.push_str(&format!(
        "\nFitness: {:.2} | Path: {} steps",
        scene.fitness(),
        scene.path_len()
    ));
    title
}

/// One 3D panel ready for a plotting surface
#[derive(Debug, Clone)]
pub struct ScenePanel {
    /// Panel label
    pub label: PanelLabel,
    /// Full title text
    pub title: String,
    /// Axis ranges
    pub limits: AxisLimits,
    /// Scene to draw
    pub scene: Scene,
}

impl ScenePanel {
    /// Build panel; title and limits derive from the scene
    #[must_use]
    pub fn new(label: PanelLabel, scene: Scene) -> Self {
        Self {
            title: panel_title(&label, &scene),
            limits: AxisLimits::for_scene(&scene),
            label,
            scene,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_scene::SceneParser;

    #[test]
    fn label_display() {
        assert_eq!(
            PanelLabel::Snapshot { index: 2, total: 5 }.to_string(),
            "Snapshot 2/5"
        );
        assert_eq!(PanelLabel::Worker(3).to_string(), "Worker 3");
        assert_eq!(PanelLabel::Baseline.to_string(), "A* Baseline");
    }

    #[test]
    fn title_with_generation() {
        let scene = SceneParser::new()
            .parse_str("GEN: 40\nFITNESS: 12.346\nPATH: 2\n0 0 0\n1 0 0\n")
            .unwrap();
        let title = panel_title(&PanelLabel::Snapshot { index: 1, total: 3 }, &scene);
        assert_eq!(title, "Snapshot 1/3 | Gen 40\nFitness: 12.35 | Path: 2 steps");
    }

    #[test]
    fn title_without_generation() {
        let scene = SceneParser::new().parse_str("FITNESS: 7\n").unwrap();
        let title = panel_title(&PanelLabel::Baseline, &scene);
        assert_eq!(title, "A* Baseline\nFitness: 7.00 | Path: 0 steps");
    }
}
