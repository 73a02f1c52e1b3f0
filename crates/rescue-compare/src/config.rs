//! Visualizer configuration
//!
//! Every field has a default, so a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! data_dir = "runs/latest"
//! output_dir = "figures"
//!
//! [view]
//! pitch = 0.4
//! ```

use crate::error::{CompareError, CompareResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Figure size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl FigureSize {
    /// Create size
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<FigureSize> for (u32, u32) {
    fn from(size: FigureSize) -> Self {
        (size.width, size.height)
    }
}

/// 3D camera angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewAngles {
    /// Elevation above the ground plane
    pub pitch: f64,
    /// Rotation around the vertical axis
    pub yaw: f64,
    /// Zoom factor
    pub scale: f64,
}

impl Default for ViewAngles {
    fn default() -> Self {
        // 20 degrees elevation, 45 degrees azimuth
        Self {
            pitch: 0.35,
            yaw: 0.785,
            scale: 0.85,
        }
    }
}

/// Visualizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Directory scanned for data files
    pub data_dir: PathBuf,
    /// Directory figures are written to
    pub output_dir: PathBuf,
    /// Evolution grid and worker path figures
    pub grid_figure: FigureSize,
    /// Single-scene figures
    pub single_figure: FigureSize,
    /// 2D charts
    pub chart_figure: FigureSize,
    /// 3D camera
    pub view: ViewAngles,
    /// Append the baseline panel to the worker path comparison
    pub include_baseline_with_workers: bool,
}

impl VisualizerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// With 3D view angles
    #[inline]
    #[must_use]
    pub fn with_view(mut self, view: ViewAngles) -> Self {
        self.view = view;
        self
    }

    /// With or without the baseline in worker comparisons
    #[inline]
    #[must_use]
    pub fn with_baseline_in_worker_view(mut self, include: bool) -> Self {
        self.include_baseline_with_workers = include;
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// - `CompareError::Config` on invalid TOML or unknown value types
    pub fn from_toml_str(text: &str) -> CompareResult<Self> {
        toml::from_str(text).map_err(|e| CompareError::Config(e.to_string()))
    }

    /// Load TOML file
    ///
    /// # Errors
    /// - `CompareError::Io` if the file cannot be read
    /// - `CompareError::Config` if it is not valid configuration
    pub fn load(path: impl AsRef<Path>) -> CompareResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CompareError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("figures"),
            grid_figure: FigureSize::new(1800, 1000),
            single_figure: FigureSize::new(1200, 900),
            chart_figure: FigureSize::new(1000, 600),
            view: ViewAngles::default(),
            include_baseline_with_workers: true,
        }
    }
}
