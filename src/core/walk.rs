//! Depth-first tree walker.
//!
//! Each directory is listed once into a sorted snapshot before any entry in
//! it is renamed. Subdirectories are descended into before they are renamed
//! themselves, so the child paths built from the snapshot are never stale.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::batch::RenameConfig;
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use crate::rename::{rename_entry, FileRename, RenameOutcome};

/// Aggregate result for one walked subtree.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Entries examined (files, directories and other entries).
    pub visited: usize,
    /// Renames applied, in the order they happened.
    pub renames: Vec<FileRename>,
    /// Per-entry failures that were skipped over.
    pub failures: Vec<Error>,
}

impl WalkReport {
    pub fn renamed(&self) -> usize {
        self.renames.len()
    }

    fn record(&mut self, outcome: RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed(rename) => self.renames.push(rename),
            RenameOutcome::Failed(failure) => self.failures.push(failure.to_error()),
            RenameOutcome::SkippedNoMatch | RenameOutcome::SkippedNoChange => {}
        }
    }

    fn absorb(&mut self, other: WalkReport) {
        self.visited += other.visited;
        self.renames.extend(other.renames);
        self.failures.extend(other.failures);
    }
}

struct DirEntrySnapshot {
    name: OsString,
    is_dir: bool,
}

/// Walk `path`, renaming every matching entry beneath it.
///
/// A path that is not a directory is handed straight to the renamer. Only a
/// failure to stat or list `path` itself is returned as an error; failures
/// deeper in the tree are collected in the report.
pub fn walk(path: &Path, pattern: &Pattern, config: &RenameConfig) -> Result<WalkReport> {
    let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;

    if !metadata.is_dir() {
        let mut report = WalkReport {
            visited: 1,
            ..WalkReport::default()
        };
        report.record(rename_entry(path, pattern));
        return Ok(report);
    }

    walk_dir(path, pattern, config)
}

fn walk_dir(dir: &Path, pattern: &Pattern, config: &RenameConfig) -> Result<WalkReport> {
    let entries = read_entries(dir)?;
    log_status!("walk", "{} ({} entries)", dir.display(), entries.len());

    let mut report = WalkReport::default();

    for entry in entries {
        let entry_path = dir.join(&entry.name);
        report.visited += 1;

        if !entry.is_dir {
            report.record(rename_entry(&entry_path, pattern));
            continue;
        }

        if config.recursive {
            match walk_dir(&entry_path, pattern, config) {
                Ok(sub) => report.absorb(sub),
                Err(err) => {
                    log_status!("walk", "{}", err);
                    report.failures.push(err);
                    continue;
                }
            }
        }

        if config.rename_directories {
            report.record(rename_entry(&entry_path, pattern));
        }
    }

    Ok(report)
}

/// Snapshot the immediate entries of `dir`, sorted by name.
///
/// `read_dir` never yields `.` or `..`. Symlinks report their own file type,
/// so a link to a directory is renamed like a file and never followed.
fn read_entries(dir: &Path) -> Result<Vec<DirEntrySnapshot>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| read_error(dir, e))?
        .map(|entry| -> io::Result<DirEntrySnapshot> {
            let entry = entry?;
            Ok(DirEntrySnapshot {
                is_dir: entry.file_type()?.is_dir(),
                name: entry.file_name(),
            })
        })
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| read_error(dir, e))?;

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn read_error(path: &Path, err: io::Error) -> Error {
    let display = path.display().to_string();
    if err.kind() == io::ErrorKind::NotFound {
        Error::path_not_found(display)
    } else {
        Error::path_read_failed(display, &err)
    }
}
