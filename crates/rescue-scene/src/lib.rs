//! Rescue Scene
//!
//! Structured view of one planner snapshot file: grid bounds, optional
//! generation, fitness, survivors with priorities, obstacles and the path.
//!
//! # Core Operations
//!
//! - **Parse**: Read a snapshot file into an immutable [`Scene`]
//! - **Inspect**: Read-only accessors for rendering and analytics
//!
//! # Format
//!
//! ```text
//! GRID: 10 10 5
//! GEN: 40
//! FITNESS: 812.50
//! SURVIVORS: 2
//! 1 2 3
//! 4 5 1 3
//! OBSTACLES: 1
//! 2 2 2
//! PATH: 2
//! 0 0 0
//! 1 2 3
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use rescue_scene::SceneParser;
//!
//! let scene = SceneParser::new().parse_file("robot_data_3.txt")?;
//! println!("{} steps, fitness {:.2}", scene.path_len(), scene.fitness());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod parser;
pub mod scene;

pub use error::{ParseError, ParseResult};
pub use parser::{parse, SceneParser};
pub use scene::{GridBounds, Point3, Scene, Survivor};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
