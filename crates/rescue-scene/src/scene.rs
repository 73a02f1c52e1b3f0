//! Scene data model
//!
//! A [`Scene`] is built once by the parser and only read afterwards.

use std::fmt::{self, Display, Formatter};

/// Grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point3 {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
    /// Z coordinate
    pub z: i32,
}

impl Point3 {
    /// Create new point
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an `[x, y, z]` array
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<(i32, i32, i32)> for Point3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Display for Point3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Upper bound of the traversable volume; the lower bound is 0 on every axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridBounds {
    /// Extent along X
    pub x: u32,
    /// Extent along Y
    pub y: u32,
    /// Extent along Z
    pub z: u32,
}

impl GridBounds {
    /// Create new bounds
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// `(0, 0, 0)` means the file carried no `GRID:` line
    #[inline]
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Whether a point lies inside `[0, bound]` on every axis
    #[must_use]
    pub fn contains(&self, point: Point3) -> bool {
        let within = |v: i32, bound: u32| v >= 0 && i64::from(v) <= i64::from(bound);
        within(point.x, self.x) && within(point.y, self.y) && within(point.z, self.z)
    }
}

/// Survivor location with its rescue priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Survivor {
    /// Cell the survivor occupies
    pub position: Point3,
    /// Rescue priority (1 when the record omits it)
    pub priority: i32,
}

impl Survivor {
    /// Priority assumed when a record carries only coordinates
    pub const DEFAULT_PRIORITY: i32 = 1;

    /// Create survivor with explicit priority
    #[inline]
    #[must_use]
    pub const fn new(position: Point3, priority: i32) -> Self {
        Self { position, priority }
    }
}

/// One parsed snapshot
///
/// Constructed by [`SceneParser`](crate::SceneParser) from exactly one
/// source text and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub(crate) grid_bounds: GridBounds,
    pub(crate) generation: Option<u32>,
    pub(crate) fitness: f64,
    pub(crate) worker_id: Option<u32>,
    pub(crate) survivors: Vec<Survivor>,
    pub(crate) obstacles: Vec<Point3>,
    pub(crate) path: Vec<Point3>,
}

impl Scene {
    /// Grid bounds; `(0, 0, 0)` when the file had no `GRID:` line
    #[inline]
    #[must_use]
    pub fn grid_bounds(&self) -> GridBounds {
        self.grid_bounds
    }

    /// Generation index, `None` when the file predates the `GEN:` tag
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Option<u32> {
        self.generation
    }

    /// Fitness score (0.0 when absent)
    #[inline]
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Worker id recorded inside the file (`WORKER_ID:`)
    #[inline]
    #[must_use]
    pub fn worker_id(&self) -> Option<u32> {
        self.worker_id
    }

    /// Survivors in file order
    #[inline]
    #[must_use]
    pub fn survivors(&self) -> &[Survivor] {
        &self.survivors
    }

    /// Obstacles in file order
    #[inline]
    #[must_use]
    pub fn obstacles(&self) -> &[Point3] {
        &self.obstacles
    }

    /// Path from start to end; may be empty
    #[inline]
    #[must_use]
    pub fn path(&self) -> &[Point3] {
        &self.path
    }

    /// Number of path steps
    #[inline]
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// First path waypoint
    #[inline]
    #[must_use]
    pub fn start(&self) -> Option<Point3> {
        self.path.first().copied()
    }

    /// Last path waypoint
    #[inline]
    #[must_use]
    pub fn end(&self) -> Option<Point3> {
        self.path.last().copied()
    }

    /// Every coordinate the scene mentions: survivors, obstacles, path
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.survivors
            .iter()
            .map(|s| s.position)
            .chain(self.obstacles.iter().copied())
            .chain(self.path.iter().copied())
    }

    /// Whether every coordinate lies within the grid bounds
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.points().all(|p| self.grid_bounds.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bounds() {
        assert!(GridBounds::default().is_unknown());
        assert!(!GridBounds::new(0, 0, 1).is_unknown());
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = GridBounds::new(5, 5, 5);
        assert!(bounds.contains(Point3::new(0, 0, 0)));
        assert!(bounds.contains(Point3::new(5, 5, 5)));
        assert!(!bounds.contains(Point3::new(6, 0, 0)));
        assert!(!bounds.contains(Point3::new(0, -1, 0)));
    }

    #[test]
    fn start_and_end_of_empty_path() {
        let scene = Scene::default();
        assert_eq!(scene.start(), None);
        assert_eq!(scene.end(), None);
        assert_eq!(scene.path_len(), 0);
    }

    #[test]
    fn points_chain_all_collections() {
        let scene = Scene {
            survivors: vec![Survivor::new(Point3::new(1, 1, 1), 2)],
            obstacles: vec![Point3::new(2, 2, 2)],
            path: vec![Point3::new(0, 0, 0), Point3::new(9, 9, 9)],
            grid_bounds: GridBounds::new(5, 5, 5),
            ..Scene::default()
        };
        assert_eq!(scene.points().count(), 4);
        assert!(!scene.is_within_bounds());
    }

    #[test]
    fn point_display() {
        assert_eq!(Point3::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
