//! Batch orchestration across root paths.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pattern::Pattern;
use crate::walk::{walk, WalkReport};

/// Root processed when no path is given.
pub const DEFAULT_ROOT: &str = "./";

/// Traversal switches shared by every level of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameConfig {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Rename directory entries as well as files.
    pub rename_directories: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            rename_directories: true,
        }
    }
}

/// Outcome of processing one root path.
#[derive(Debug)]
pub struct PathReport {
    pub path: PathBuf,
    pub result: Result<WalkReport>,
}

impl PathReport {
    pub fn renamed(&self) -> usize {
        self.result.as_ref().map(WalkReport::renamed).unwrap_or(0)
    }
}

/// Process each root independently, in order, handing every report to `sink`
/// as soon as its walk finishes.
pub fn run_with<F>(paths: &[PathBuf], pattern: &Pattern, config: &RenameConfig, mut sink: F)
where
    F: FnMut(PathReport),
{
    let default_roots = [PathBuf::from(DEFAULT_ROOT)];
    let roots = if paths.is_empty() {
        &default_roots[..]
    } else {
        paths
    };

    for root in roots {
        sink(process_root(root, pattern, config));
    }
}

/// Process every root and collect the reports.
pub fn run(paths: &[PathBuf], pattern: &Pattern, config: &RenameConfig) -> Vec<PathReport> {
    let mut reports = Vec::new();
    run_with(paths, pattern, config, |report| reports.push(report));
    reports
}

fn process_root(root: &Path, pattern: &Pattern, config: &RenameConfig) -> PathReport {
    log_status!("batch", "Processing {}", root.display());
    let result = walk(root, pattern, config);
    if let Err(err) = &result {
        log_status!("batch", "{}", err);
    }
    PathReport {
        path: root.to_path_buf(),
        result,
    }
}
