use clap::{ArgAction, Args};
use serde::Serialize;
use std::path::PathBuf;

use brename::core::batch;
use brename::utils::validation;
use brename::{PathReport, Pattern, RenameConfig};

use crate::commands::CmdResult;
use crate::output::response::CliError;

pub const USAGE_HINT: &str = "Usage: brename -s <regexp> -r <replacement> [-R[=BOOL]] [-D[=BOOL]] [path...]";

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Regular expression matched against each entry name
    #[arg(short = 's', value_name = "REGEXP", default_value = "", allow_hyphen_values = true)]
    pub source: String,

    /// Replacement template ($1, ${name} refer to capture groups)
    #[arg(short = 'r', value_name = "REPLACEMENT", default_value = "", allow_hyphen_values = true)]
    pub replacement: String,

    /// Recursively rename (-R=false to disable)
    #[arg(
        short = 'R',
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub recursive: bool,

    /// Rename directories (-D=false to disable)
    #[arg(
        short = 'D',
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub rename_directories: bool,

    /// Paths to process (default: ./)
    pub paths: Vec<PathBuf>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum BatchOutput {
    #[serde(rename = "batch.rename")]
    Rename {
        pattern: String,
        replacement: String,
        recursive: bool,
        rename_directories: bool,
        total_renamed: usize,
        paths: Vec<PathSummary>,
    },
}

#[derive(Serialize)]
pub struct PathSummary {
    pub path: String,
    pub renamed: usize,
    pub renames: Vec<RenameSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CliError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Serialize)]
pub struct RenameSummary {
    pub from: String,
    pub to: String,
}

impl From<&PathReport> for PathSummary {
    fn from(report: &PathReport) -> Self {
        let path = report.path.display().to_string();
        match &report.result {
            Ok(walk) => PathSummary {
                path,
                renamed: walk.renamed(),
                renames: walk
                    .renames
                    .iter()
                    .map(|r| RenameSummary {
                        from: r.from.display().to_string(),
                        to: r.to.display().to_string(),
                    })
                    .collect(),
                failures: walk.failures.iter().map(CliError::from_error).collect(),
                error: None,
            },
            Err(err) => PathSummary {
                path,
                renamed: 0,
                renames: Vec::new(),
                failures: Vec::new(),
                error: Some(CliError::from_error(err)),
            },
        }
    }
}

/// Validate arguments, compile the pattern and process every root.
///
/// `on_report` sees each root's report as soon as its walk finishes.
pub fn run(args: BatchArgs, on_report: &mut dyn FnMut(&PathReport)) -> CmdResult<BatchOutput> {
    let source = validation::require_arg_with_hint(&args.source, "-s", USAGE_HINT)?;
    let pattern = Pattern::compile(source, &args.replacement)?;
    let config = RenameConfig {
        recursive: args.recursive,
        rename_directories: args.rename_directories,
    };

    let mut paths = Vec::new();
    batch::run_with(&args.paths, &pattern, &config, |report| {
        on_report(&report);
        paths.push(PathSummary::from(&report));
    });

    let total_renamed = paths.iter().map(|p| p.renamed).sum();

    Ok((
        BatchOutput::Rename {
            pattern: pattern.source().to_string(),
            replacement: pattern.replacement().to_string(),
            recursive: config.recursive,
            rename_directories: config.rename_directories,
            total_renamed,
            paths,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: BatchArgs,
    }

    fn parse(argv: &[&str]) -> BatchArgs {
        TestCli::try_parse_from(std::iter::once("brename").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn flags_default_to_recursive_with_directories() {
        let args = parse(&["-s", "a", "-r", "b"]);
        assert!(args.recursive);
        assert!(args.rename_directories);
        assert!(args.paths.is_empty());
    }

    #[test]
    fn bool_flags_accept_explicit_values() {
        let args = parse(&["-s", "a", "-R=false", "-D=false", "dir1", "dir2"]);
        assert!(!args.recursive);
        assert!(!args.rename_directories);
        assert_eq!(args.paths, vec![PathBuf::from("dir1"), PathBuf::from("dir2")]);
    }

    #[test]
    fn bare_bool_flag_means_true() {
        let args = parse(&["-s", "a", "-R", "dir"]);
        assert!(args.recursive);
        assert_eq!(args.paths, vec![PathBuf::from("dir")]);
    }

    #[test]
    fn empty_source_is_a_configuration_error() {
        let args = parse(&["-r", "b"]);
        let mut seen = 0;
        let err = run(args, &mut |_| seen += 1).err().unwrap();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
        assert_eq!(seen, 0);
    }

    #[test]
    fn bad_regex_processes_no_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo(.txt"), "").unwrap();
        let root = dir.path().to_str().unwrap();

        let args = parse(&["-s", "foo(", "-r", "bar", root]);
        let mut seen = 0;
        let err = run(args, &mut |_| seen += 1).err().unwrap();

        assert_eq!(err.message, "Bad regular expression!");
        assert_eq!(seen, 0);
        assert!(dir.path().join("foo(.txt").exists());
    }

    #[test]
    fn output_summarises_each_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo1.txt"), "").unwrap();
        fs::write(dir.path().join("foo2.txt"), "").unwrap();
        let root = dir.path().to_str().unwrap().to_string();
        let missing = dir.path().join("missing").to_str().unwrap().to_string();

        let args = parse(&["-s", r"foo(\d)", "-r", "bar$1", &missing, &root]);
        let (output, exit_code) = run(args, &mut |_| {}).ok().unwrap();
        let json = serde_json::to_value(output).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(json["command"], "batch.rename");
        assert_eq!(json["total_renamed"], 2);
        assert_eq!(json["paths"][0]["error"]["code"], "path.not_found");
        assert_eq!(json["paths"][1]["renamed"], 2);
        assert_eq!(json["paths"][1]["renames"].as_array().unwrap().len(), 2);
    }
}
