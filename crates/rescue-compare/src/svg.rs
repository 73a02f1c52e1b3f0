//! SVG plotting surface built on `plotters`
//!
//! One `.svg` file per figure, written into the output directory.

use crate::config::ViewAngles;
use crate::error::RenderError;
use crate::panel::ScenePanel;
use crate::surface::{PlotSurface, ProgressionFigure, SceneFigure, WorkerBarsFigure};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rescue_scene::Point3;
use std::error::Error;
use std::path::{Path, PathBuf};

type DrawResult<T> = Result<T, Box<dyn Error>>;

const SURVIVOR: RGBColor = RGBColor(0, 150, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const FONT: &str = "sans-serif";

/// Plotting surface writing SVG files
#[derive(Debug, Clone)]
pub struct SvgSurface {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgSurface {
    /// Create surface writing into `output_dir` (created on first use)
    #[inline]
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far
    #[inline]
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target(&self, name: &str) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| RenderError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        Ok(self.output_dir.join(format!("{name}.svg")))
    }

    fn finish(&mut self, path: PathBuf) {
        tracing::info!("Wrote {}", path.display());
        self.written.push(path);
    }
}

impl PlotSurface for SvgSurface {
    fn draw_scene_grid(&mut self, figure: &SceneFigure) -> Result<(), RenderError> {
        let path = self.target(&figure.name)?;
        render_scene_grid(&path, figure).map_err(RenderError::backend)?;
        self.finish(path);
        Ok(())
    }

    fn draw_fitness_progression(&mut self, figure: &ProgressionFigure) -> Result<(), RenderError> {
        let path = self.target(&figure.name)?;
        render_progression(&path, figure).map_err(RenderError::backend)?;
        self.finish(path);
        Ok(())
    }

    fn draw_worker_bars(&mut self, figure: &WorkerBarsFigure) -> Result<(), RenderError> {
        let path = self.target(&figure.name)?;
        render_worker_bars(&path, figure).map_err(RenderError::backend)?;
        self.finish(path);
        Ok(())
    }
}

// plotters' vertical axis is its y; scene z goes there
fn project(p: Point3) -> (f64, f64, f64) {
    (f64::from(p.x), f64::from(p.z), f64::from(p.y))
}

/// Value range padded so flat data still has height
fn padded(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else if !span.is_finite() {
        (lo, hi)
    } else {
        (lo - span * pad, hi + span * pad)
    }
}

/// Padded range over the finite values; `0..1` when there are none
///
/// plotters never finishes laying out an axis with a NaN or infinite end.
fn finite_range(values: impl IntoIterator<Item = f64>, pad: f64) -> (f64, f64) {
    let bounds = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        });
    match bounds {
        Some((lo, hi)) => padded(lo, hi, pad),
        None => padded(0.0, 1.0, pad),
    }
}

fn render_scene_grid(path: &Path, figure: &SceneFigure) -> DrawResult<()> {
    let root = SVGBackend::new(path, figure.size.into()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, (FONT, 22))?;

    if figure.layout.slots() > 0 {
        let areas = body.split_evenly((figure.layout.rows, figure.layout.cols));
        for (area, panel) in areas.iter().zip(&figure.panels) {
            if let Some(panel) = panel {
                draw_scene_panel(area, panel, figure.view)?;
            }
        }
    }

    root.present()?;
    Ok(())
}

fn draw_scene_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &ScenePanel,
    view: ViewAngles,
) -> DrawResult<()> {
    let limits = &panel.limits;
    let caption = panel.title.lines().collect::<Vec<_>>().join("  |  ");
    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, 14))
        .margin(8)
        .build_cartesian_3d(limits.x.clone(), limits.z.clone(), limits.y.clone())?;
    chart.with_projection(|mut pb| {
        pb.pitch = view.pitch;
        pb.yaw = view.yaw;
        pb.scale = view.scale;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()?;

    let scene = &panel.scene;

    // z-order: obstacles, survivors, path, start/end
    if !scene.obstacles().is_empty() {
        chart
            .draw_series(
                scene
                    .obstacles()
                    .iter()
                    .map(|p| Circle::new(project(*p), 4, RED.mix(0.35).filled())),
            )?
            .label("Obstacles")
            .legend(|(x, y)| Circle::new((x, y), 4, RED.mix(0.35).filled()));
    }

    if !scene.survivors().is_empty() {
        chart
            .draw_series(
                scene
                    .survivors()
                    .iter()
                    .map(|s| TriangleMarker::new(project(s.position), 8, SURVIVOR.filled())),
            )?
            .label("Survivors")
            .legend(|(x, y)| TriangleMarker::new((x, y), 6, SURVIVOR.filled()));
        chart.draw_series(scene.survivors().iter().map(|s| {
            Text::new(
                format!("P{}", s.priority),
                project(s.position),
                TextStyle::from((FONT, 11).into_font()).pos(Pos::new(HPos::Left, VPos::Bottom)),
            )
        }))?;
    }

    if let (Some(start), Some(end)) = (scene.start(), scene.end()) {
        chart
            .draw_series(LineSeries::new(
                scene.path().iter().map(|p| project(*p)),
                BLUE.mix(0.7).stroke_width(2),
            ))?
            .label("Robot Path")
            .legend(|(x, y)| {
                PathElement::new(vec![(x - 8, y), (x + 8, y)], BLUE.stroke_width(2))
            });
        chart
            .draw_series(std::iter::once(Circle::new(project(start), 6, CYAN.filled())))?
            .label("Start")
            .legend(|(x, y)| Circle::new((x, y), 5, CYAN.filled()));
        chart
            .draw_series(std::iter::once(Cross::new(project(end), 7, PURPLE.stroke_width(3))))?
            .label("End")
            .legend(|(x, y)| Cross::new((x, y), 5, PURPLE.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.5))
        .label_font((FONT, 10))
        .draw()?;
    Ok(())
}

fn render_progression(path: &Path, figure: &ProgressionFigure) -> DrawResult<()> {
    let root = SVGBackend::new(path, figure.size.into()).into_drawing_area();
    root.fill(&WHITE)?;

    let series: Vec<(f64, f64)> = figure
        .positions
        .iter()
        .copied()
        .zip(figure.points.iter().map(|p| p.fitness))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if series.len() < figure.points.len() {
        tracing::warn!(
            "{}: {} points with non-finite fitness left out",
            figure.name,
            figure.points.len() - series.len()
        );
    }
    let (x_lo, x_hi) = finite_range(series.iter().map(|(x, _)| *x), 0.05);
    let (y_lo, y_hi) = finite_range(series.iter().map(|(_, y)| *y), 0.15);

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
    chart
        .configure_mesh()
        .x_desc(figure.x_desc.as_str())
        .y_desc("Best Fitness")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(LineSeries::new(series.iter().copied(), BLUE.stroke_width(2)))?;
    chart.draw_series(
        series
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 5, BLUE.filled())),
    )?;
    chart.draw_series(series.iter().map(|&(x, y)| {
        Text::new(
            format!("{y:.2}"),
            (x, y),
            TextStyle::from((FONT, 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_bars(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    caption: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
) -> DrawResult<()> {
    // bars start at zero, so zero is always on the axis
    let finite = || values.iter().copied().filter(|v| v.is_finite());
    let lo = finite().fold(0.0_f64, f64::min);
    let (y_lo, y_hi) = finite_range(finite().chain([0.0]), 0.15);
    let y_lo = if lo >= 0.0 { 0.0 } else { y_lo };
    let count = i32::try_from(values.len())?;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d((0..count).into_segmented(), y_lo..y_hi)?;

    let label_of = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(values.len())
        .x_label_formatter(&label_of)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let bars = values.iter().zip(0..count).filter(|(v, _)| v.is_finite());
    chart.draw_series(bars.map(|(&v, i)| {
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
            color.mix(0.75).filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;
    // non-finite values get a label at zero and no bar
    chart.draw_series(values.iter().zip(0..count).map(|(&v, i)| {
        let height = if v.is_finite() { v } else { 0.0 };
        Text::new(
            format!("{v:.2}"),
            (SegmentValue::CenterOf(i), height),
            TextStyle::from((FONT, 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;
    Ok(())
}

fn render_worker_bars(path: &Path, figure: &WorkerBarsFigure) -> DrawResult<()> {
    let root = SVGBackend::new(path, figure.size.into()).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, (FONT, 22))?;
    let areas = body.split_evenly((1, 2));

    let labels: Vec<String> = figure.workers.iter().map(|w| w.label.clone()).collect();
    let fitness: Vec<f64> = figure.workers.iter().map(|w| w.fitness).collect();
    let reached: Vec<f64> = figure
        .workers
        .iter()
        .map(|w| w.survivors_reached as f64)
        .collect();

    draw_bars(&areas[0], "Fitness", &labels, &fitness, BLUE)?;
    draw_bars(&areas[1], "Survivors Reached", &labels, &reached, SURVIVOR)?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{FitnessPoint, WorkerSummary};
    use crate::config::FigureSize;
    use crate::layout::GridLayout;
    use crate::panel::PanelLabel;
    use rescue_scene::{Scene, SceneParser};

    fn scene(text: &str) -> Scene {
        SceneParser::new().parse_str(text).unwrap()
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    fn point(key: u64, fitness: f64) -> FitnessPoint {
        FitnessPoint {
            order_key: Some(key),
            label: format!("robot_data_{key}.txt"),
            fitness,
        }
    }

    fn progression(points: Vec<FitnessPoint>) -> ProgressionFigure {
        ProgressionFigure {
            name: "fitness_progression".to_string(),
            title: "Genetic Algorithm Fitness Evolution".to_string(),
            size: FigureSize::new(800, 500),
            x_desc: "Snapshot Number".to_string(),
            positions: points.iter().filter_map(|p| p.order_key).map(|k| k as f64).collect(),
            points,
        }
    }

    fn worker(id: u64, fitness: f64, survivors_reached: usize) -> WorkerSummary {
        WorkerSummary {
            worker_id: Some(id),
            label: format!("W{id}"),
            fitness,
            path_len: 3,
            survivors_reached,
            priority_reached: 0,
        }
    }

    #[test]
    fn z_is_plotted_vertically() {
        assert_eq!(project(Point3::new(1, 2, 3)), (1.0, 3.0, 2.0));
    }

    #[test]
    fn flat_ranges_get_height() {
        assert_eq!(padded(5.0, 5.0, 0.1), (4.0, 6.0));
        let (lo, hi) = padded(0.0, 10.0, 0.1);
        assert!((lo + 1.0).abs() < 1e-9);
        assert!((hi - 11.0).abs() < 1e-9);
    }

    #[test]
    fn target_names_svg_files() {
        let dir = tempfile::tempdir().unwrap();
        let surface = SvgSurface::new(dir.path().join("figs"));
        let path = surface.target("evolution_grid").unwrap();
        assert_eq!(path, dir.path().join("figs").join("evolution_grid.svg"));
        assert!(dir.path().join("figs").is_dir());
        assert!(surface.written().is_empty());
    }

    #[test]
    fn finite_range_ignores_non_finite() {
        assert_eq!(finite_range([f64::NAN, f64::INFINITY, 2.0, 4.0], 0.0), (2.0, 4.0));
        assert_eq!(finite_range([f64::NAN, f64::NEG_INFINITY], 0.0), (0.0, 1.0));
        assert_eq!(finite_range(std::iter::empty(), 0.0), (0.0, 1.0));
    }

    #[test]
    fn scene_grid_draws_every_layer() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = SvgSurface::new(dir.path());
        let panel = ScenePanel::new(
            PanelLabel::Worker(4),
            scene(
                "GRID: 5 5 5\nGEN: 7\nFITNESS: 12.5\nSURVIVORS: 1\n2 2 2 3\n\
                 OBSTACLES: 1\n1 1 1\nPATH: 3\n0 0 0\n2 2 2\n4 4 4\n",
            ),
        );
        let figure = SceneFigure {
            name: "worker_paths".to_string(),
            title: "Worker Comparison - Final Paths".to_string(),
            size: FigureSize::new(900, 500),
            view: ViewAngles::default(),
            layout: GridLayout::for_panels(2),
            panels: vec![Some(panel), None],
        };

        surface.draw_scene_grid(&figure).unwrap();
        let path = dir.path().join("worker_paths.svg");
        assert_eq!(surface.written(), &[path.clone()]);

        let svg = read(&path);
        for text in [
            "Worker Comparison - Final Paths",
            "Worker 4 | Gen 7",
            "Fitness: 12.50 | Path: 3 steps",
            "P3",
            "Obstacles",
            "Survivors",
            "Robot Path",
            "Start",
        ] {
            assert!(svg.contains(text), "missing {text}");
        }
    }

    #[test]
    fn progression_chart_labels_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = SvgSurface::new(dir.path());
        surface
            .draw_fitness_progression(&progression(vec![point(2, 4.0), point(10, 9.5)]))
            .unwrap();

        let svg = read(&dir.path().join("fitness_progression.svg"));
        assert!(svg.contains("Genetic Algorithm Fitness Evolution"));
        assert!(svg.contains("Snapshot Number"));
        assert!(svg.contains("4.00"));
        assert!(svg.contains("9.50"));
    }

    #[test]
    fn progression_chart_skips_non_finite_fitness() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = SvgSurface::new(dir.path());
        let figure = progression(vec![
            point(1, 4.0),
            point(2, f64::NAN),
            point(3, f64::INFINITY),
            point(4, 9.5),
        ]);
        surface.draw_fitness_progression(&figure).unwrap();

        let svg = read(&dir.path().join("fitness_progression.svg"));
        assert!(svg.contains("9.50"));
        assert!(!svg.contains("NaN"));

        let only_nan = progression(vec![point(1, f64::NAN)]);
        surface.draw_fitness_progression(&only_nan).unwrap();
        assert_eq!(surface.written().len(), 2);
    }

    #[test]
    fn worker_bars_draw_both_panels() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = SvgSurface::new(dir.path());
        let figure = WorkerBarsFigure {
            name: "worker_analytics".to_string(),
            title: "Worker Comparison - Fitness and Survivors Reached".to_string(),
            size: FigureSize::new(900, 500),
            workers: vec![worker(1, 7.25, 2), worker(2, f64::INFINITY, 0)],
        };
        surface.draw_worker_bars(&figure).unwrap();

        let svg = read(&dir.path().join("worker_analytics.svg"));
        for text in ["Fitness", "Survivors Reached", "W1", "W2", "7.25", "inf"] {
            assert!(svg.contains(text), "missing {text}");
        }
    }
}
