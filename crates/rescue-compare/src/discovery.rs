//! Data file discovery
//!
//! One directory listing is split into the three roles. Numbered roles are
//! sorted by [`order_key`], then by file name so equal keys stay stable.

use crate::error::{CompareError, CompareResult};
use crate::role::{order_key, FileRole};
use std::path::{Path, PathBuf};

/// A discovered data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    /// Full path
    pub path: PathBuf,
    /// Role derived from the name
    pub role: FileRole,
    /// Number embedded in the name, if any
    pub order_key: Option<u64>,
}

impl DataFile {
    /// Build from a path whose file name is already known to match `role`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, role: FileRole) -> Self {
        let path = path.into();
        let order_key = order_key(&file_name(&path), role);
        Self {
            path,
            role,
            order_key,
        }
    }

    /// Bare file name
    #[must_use]
    pub fn name(&self) -> String {
        file_name(&self.path)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sort data files by ordering key, then name
pub fn sort_files(files: &mut [DataFile]) {
    files.sort_by(|a, b| {
        a.order_key
            .cmp(&b.order_key)
            .then_with(|| a.name().cmp(&b.name()))
    });
}

/// Files of every role found in one directory
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    snapshots: Vec<DataFile>,
    workers: Vec<DataFile>,
    baseline: Vec<DataFile>,
}

impl Discovery {
    /// List `dir` and classify its files
    ///
    /// # Errors
    /// - `CompareError::Io` if the directory cannot be listed
    pub fn scan(dir: impl AsRef<Path>) -> CompareResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| CompareError::io_error(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CompareError::io_error(dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file {
                paths.push(entry.path());
            }
        }

        let discovery = Self::from_paths(paths);
        tracing::info!(
            "Discovered {} snapshot, {} worker, {} baseline files in {}",
            discovery.snapshots.len(),
            discovery.workers.len(),
            discovery.baseline.len(),
            dir.display()
        );
        Ok(discovery)
    }

    /// Classify an explicit list of paths; names matching no role are ignored
    #[must_use]
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut discovery = Self::default();
        for path in paths {
            let Some(role) = FileRole::classify(&file_name(&path)) else {
                continue;
            };
            let file = DataFile::new(path, role);
            match role {
                FileRole::Snapshot => discovery.snapshots.push(file),
                FileRole::Worker => discovery.workers.push(file),
                FileRole::Baseline => discovery.baseline.push(file),
            }
        }
        sort_files(&mut discovery.snapshots);
        sort_files(&mut discovery.workers);
        discovery
    }

    /// Files of one role, ordered; may be empty
    #[inline]
    #[must_use]
    pub fn get(&self, role: FileRole) -> &[DataFile] {
        match role {
            FileRole::Snapshot => &self.snapshots,
            FileRole::Worker => &self.workers,
            FileRole::Baseline => &self.baseline,
        }
    }

    /// Files of one role, ordered
    ///
    /// # Errors
    /// - `CompareError::NotFound` if the role has no files
    pub fn files(&self, role: FileRole) -> CompareResult<&[DataFile]> {
        let files = self.get(role);
        if files.is_empty() {
            return Err(CompareError::NotFound { role });
        }
        Ok(files)
    }

    /// Number of files per role
    #[must_use]
    pub fn count(&self, role: FileRole) -> usize {
        self.get(role).len()
    }

    /// Whether no role has any file
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FileRole::ALL.iter().all(|role| self.get(*role).is_empty())
    }
}
