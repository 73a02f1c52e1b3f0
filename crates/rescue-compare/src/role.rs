//! File roles and filename-derived ordering keys
//!
//! The planner names its output files by convention:
//! - `robot_data_<N>.txt`: global evolution snapshots
//! - `robot_data_worker_<N>.txt`: one final path per worker
//! - `robot_data_astar.txt`: the single baseline solution
//!
//! [`order_key`] is the only place that knows how to pull the number out of
//! a name. Everything that sorts files goes through it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display, Formatter};

/// Common prefix of every data file
pub const DATA_PREFIX: &str = "robot_data_";

/// Prefix of worker files
pub const WORKER_PREFIX: &str = "robot_data_worker_";

/// Exact baseline file name
pub const BASELINE_FILE: &str = "robot_data_astar.txt";

/// Extension of every data file
pub const DATA_EXTENSION: &str = ".txt";

static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.[^.]+$").expect("trailing number pattern is valid"));

/// Kind of data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileRole {
    /// Global evolution snapshot, numbered
    Snapshot,
    /// Independent worker's final path, numbered
    Worker,
    /// Reference solution, unnumbered
    Baseline,
}

impl FileRole {
    /// All roles in discovery order
    pub const ALL: [FileRole; 3] = [Self::Snapshot, Self::Worker, Self::Baseline];

    /// Lowercase role name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::Worker => "worker",
            Self::Baseline => "baseline",
        }
    }

    /// Human-readable name pattern, for diagnostics
    #[inline]
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Snapshot => "robot_data_<N>.txt",
            Self::Worker => "robot_data_worker_<N>.txt",
            Self::Baseline => BASELINE_FILE,
        }
    }

    /// Whether a bare file name belongs to this role
    #[must_use]
    pub fn matches(self, file_name: &str) -> bool {
        match self {
            Self::Baseline => file_name == BASELINE_FILE,
            Self::Worker => {
                file_name.starts_with(WORKER_PREFIX) && file_name.ends_with(DATA_EXTENSION)
            }
            Self::Snapshot => {
                file_name.starts_with(DATA_PREFIX)
                    && file_name.ends_with(DATA_EXTENSION)
                    && !file_name.contains("worker")
                    && file_name != BASELINE_FILE
            }
        }
    }

    /// Role of a bare file name, if it follows any naming convention
    #[must_use]
    pub fn classify(file_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.matches(file_name))
    }

    /// Whether files of this role carry an ordering number
    #[inline]
    #[must_use]
    pub fn is_numbered(self) -> bool {
        !matches!(self, Self::Baseline)
    }
}

impl Display for FileRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering key embedded in a file name
///
/// Returns the number just before the extension for numbered roles.
/// `None` means "no key" and sorts before every numbered file, since
/// `None < Some(_)`.
#[must_use]
pub fn order_key(file_name: &str, role: FileRole) -> Option<u64> {
    if !role.is_numbered() || !role.matches(file_name) {
        return None;
    }
    TRAILING_NUMBER
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_names() {
        assert!(FileRole::Snapshot.matches("robot_data_3.txt"));
        assert!(FileRole::Snapshot.matches("robot_data_final.txt"));
        assert!(!FileRole::Snapshot.matches("robot_data_worker_1.txt"));
        assert!(!FileRole::Snapshot.matches(BASELINE_FILE));
        assert!(!FileRole::Snapshot.matches("robot_data_3.csv"));
        assert!(!FileRole::Snapshot.matches("other_3.txt"));
    }

    #[test]
    fn worker_and_baseline_names() {
        assert!(FileRole::Worker.matches("robot_data_worker_12.txt"));
        assert!(!FileRole::Worker.matches("robot_data_12.txt"));
        assert!(FileRole::Baseline.matches("robot_data_astar.txt"));
        assert!(!FileRole::Baseline.matches("robot_data_astar_2.txt"));
    }

    #[test]
    fn classify_names() {
        assert_eq!(FileRole::classify("robot_data_4.txt"), Some(FileRole::Snapshot));
        assert_eq!(
            FileRole::classify("robot_data_worker_4.txt"),
            Some(FileRole::Worker)
        );
        assert_eq!(FileRole::classify(BASELINE_FILE), Some(FileRole::Baseline));
        assert_eq!(FileRole::classify("notes.txt"), None);
    }

    #[test]
    fn keys_are_numeric() {
        assert_eq!(order_key("robot_data_10.txt", FileRole::Snapshot), Some(10));
        assert_eq!(order_key("robot_data_2.txt", FileRole::Snapshot), Some(2));
        assert_eq!(order_key("robot_data_worker_7.txt", FileRole::Worker), Some(7));
        assert_eq!(order_key("robot_data_007.txt", FileRole::Snapshot), Some(7));
    }

    #[test]
    fn missing_key_sorts_first() {
        let missing = order_key("robot_data_final.txt", FileRole::Snapshot);
        assert_eq!(missing, None);
        assert!(missing < order_key("robot_data_0.txt", FileRole::Snapshot));
    }

    #[test]
    fn baseline_and_foreign_names_have_no_key() {
        assert_eq!(order_key(BASELINE_FILE, FileRole::Baseline), None);
        assert_eq!(order_key("robot_data_worker_3.txt", FileRole::Snapshot), None);
        assert_eq!(order_key("robot_data_99999999999999999999999.txt", FileRole::Snapshot), None);
    }

    #[test]
    fn role_display() {
        assert_eq!(FileRole::Snapshot.to_string(), "snapshot");
        assert_eq!(FileRole::Baseline.pattern(), "robot_data_astar.txt");
    }
}
