//! Single-entry renamer.
//!
//! The only place that mutates the filesystem. Each call touches at most one
//! entry: the one named by `path`.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, RenameFailedDetails};
use crate::pattern::Pattern;

/// An applied rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A rename that was planned but could not be applied.
#[derive(Debug)]
pub struct RenameFailure {
    /// Full path of the entry that was left untouched.
    pub path: PathBuf,
    pub from: String,
    pub to: String,
    pub error: io::Error,
}

impl RenameFailure {
    pub fn to_error(&self) -> Error {
        Error::rename_failed(RenameFailedDetails {
            path: self.path.display().to_string(),
            from: self.from.clone(),
            to: self.to.clone(),
            error: self.error.to_string(),
        })
    }
}

#[derive(Debug)]
pub enum RenameOutcome {
    Renamed(FileRename),
    SkippedNoMatch,
    SkippedNoChange,
    Failed(RenameFailure),
}

/// Apply `pattern` to the base name of `path` and rename the entry in place.
pub fn rename_entry(path: &Path, pattern: &Pattern) -> RenameOutcome {
    let Some(name) = path.file_name() else {
        return RenameOutcome::SkippedNoMatch;
    };

    let Some(new_name) = pattern.substitute_name(name) else {
        return RenameOutcome::SkippedNoMatch;
    };

    if new_name.as_os_str() == name {
        return RenameOutcome::SkippedNoChange;
    }

    let from = name.to_string_lossy();
    let to = new_name.to_string_lossy();

    let failed = |error: io::Error| {
        log_status!("rename", "Failed: [{} -> {}]: {}", from, to, error);
        RenameOutcome::Failed(RenameFailure {
            path: path.to_path_buf(),
            from: from.to_string(),
            to: to.to_string(),
            error,
        })
    };

    if let Err(problem) = check_target_name(&new_name) {
        return failed(io::Error::new(io::ErrorKind::InvalidInput, problem));
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let target = parent.join(&new_name);

    // std::fs::rename replaces an existing file on Unix; refuse instead.
    if target.symlink_metadata().is_ok() {
        return failed(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("target already exists: {}", target.display()),
        ));
    }

    match std::fs::rename(path, &target) {
        Ok(()) => {
            log_status!("rename", "{} -> {}", path.display(), target.display());
            RenameOutcome::Renamed(FileRename {
                from: path.to_path_buf(),
                to: target,
            })
        }
        Err(e) => failed(e),
    }
}

/// A substituted name must stay a single component inside the same directory.
fn check_target_name(name: &OsStr) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("substitution produced an empty name".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!(
            "substitution produced reserved name '{}'",
            name.to_string_lossy()
        ));
    }
    // Lossy decoding only introduces U+FFFD, never a separator.
    let lossy = name.to_string_lossy();
    if lossy.chars().any(std::path::is_separator) {
        return Err(format!(
            "substitution produced a path separator in '{}'",
            lossy
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(source: &str, replacement: &str) -> Pattern {
        Pattern::compile(source, replacement).unwrap()
    }

    #[test]
    fn renames_matching_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("foo1.txt");
        fs::write(&file, "content").unwrap();

        let outcome = rename_entry(&file, &pattern(r"foo(\d)", "bar$1"));

        match outcome {
            RenameOutcome::Renamed(rename) => {
                assert_eq!(rename.from, file);
                assert_eq!(rename.to, dir.path().join("bar1.txt"));
            }
            other => panic!("expected Renamed, got {:?}", other),
        }
        assert!(!file.exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("bar1.txt")).unwrap(),
            "content"
        );
    }

    #[test]
    fn non_matching_name_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("readme.md");
        fs::write(&file, "").unwrap();

        let outcome = rename_entry(&file, &pattern("xyz", "abc"));

        assert!(matches!(outcome, RenameOutcome::SkippedNoMatch));
        assert!(file.exists());
    }

    #[test]
    fn identity_substitution_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("foo.txt");
        fs::write(&file, "").unwrap();

        let outcome = rename_entry(&file, &pattern("^(.*)$", "$1"));

        assert!(matches!(outcome, RenameOutcome::SkippedNoChange));
        assert!(file.exists());
    }

    #[test]
    fn renames_directory_entry() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("old_dir");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.txt"), "").unwrap();

        let outcome = rename_entry(&sub, &pattern("old", "new"));

        assert!(matches!(outcome, RenameOutcome::Renamed(_)));
        assert!(dir.path().join("new_dir").join("inner.txt").exists());
    }

    #[test]
    fn existing_target_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        let target = dir.path().join("b.txt");
        fs::write(&source, "source").unwrap();
        fs::write(&target, "target").unwrap();

        let outcome = rename_entry(&source, &pattern("^a", "b"));

        match outcome {
            RenameOutcome::Failed(failure) => {
                assert_eq!(failure.from, "a.txt");
                assert_eq!(failure.to, "b.txt");
                assert_eq!(failure.error.kind(), io::ErrorKind::AlreadyExists);
                assert_eq!(failure.to_error().code.as_str(), "rename.failed");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(&source).unwrap(), "source");
        assert_eq!(fs::read_to_string(&target).unwrap(), "target");
    }

    #[test]
    fn separator_in_substitution_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a_b.txt");
        fs::write(&file, "").unwrap();

        let outcome = rename_entry(&file, &pattern("_", "/"));

        match outcome {
            RenameOutcome::Failed(failure) => {
                assert_eq!(failure.error.kind(), io::ErrorKind::InvalidInput);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(file.exists());
    }

    #[test]
    fn empty_substitution_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("gone");
        fs::write(&file, "").unwrap();

        let outcome = rename_entry(&file, &pattern(".*", ""));

        assert!(matches!(outcome, RenameOutcome::Failed(_)));
        assert!(file.exists());
    }

    #[test]
    fn missing_source_reports_os_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ghost.txt");

        let outcome = rename_entry(&file, &pattern("ghost", "spirit"));

        match outcome {
            RenameOutcome::Failed(failure) => {
                assert_eq!(failure.error.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn renames_name_that_is_not_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join(OsStr::from_bytes(b"foo\xff.txt"));
        fs::write(&file, "raw").unwrap();

        let outcome = rename_entry(&file, &pattern("foo", "bar"));

        let target = dir.path().join(OsStr::from_bytes(b"bar\xff.txt"));
        match outcome {
            RenameOutcome::Renamed(rename) => assert_eq!(rename.to, target),
            other => panic!("expected Renamed, got {:?}", other),
        }
        assert!(!file.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "raw");
    }

    #[test]
    fn check_target_name_rejects_reserved_names() {
        assert!(check_target_name(OsStr::new("..")).is_err());
        assert!(check_target_name(OsStr::new(".")).is_err());
        assert!(check_target_name(OsStr::new("")).is_err());
        assert!(check_target_name(OsStr::new("fine.txt")).is_ok());
    }
}
