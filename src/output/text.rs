//! Plain-text rendering of batch results.

use std::io::{self, Write};

use brename::{Error, PathReport, Result};

/// One line describing an error, with the underlying OS/regex error if known.
pub fn describe_error(err: &Error) -> String {
    match err.details.get("error").and_then(|e| e.as_str()) {
        Some(cause) => format!("{}: {}", err.message, cause),
        None => err.message.clone(),
    }
}

/// Write the report for one root: header, count or root error, blank line.
/// Per-entry failures go to `errors`.
pub fn write_path_report<W: Write, E: Write>(
    out: &mut W,
    errors: &mut E,
    report: &PathReport,
) -> io::Result<()> {
    writeln!(out, "{}:", report.path.display())?;
    match &report.result {
        Ok(walk) => {
            for failure in &walk.failures {
                writeln!(errors, "{}", describe_error(failure))?;
            }
            writeln!(out, "{} file(s) renamed", walk.renamed())?;
        }
        Err(err) => writeln!(out, "{}", describe_error(err))?,
    }
    writeln!(out)
}

pub fn write_error<E: Write>(errors: &mut E, err: &Error) -> io::Result<()> {
    writeln!(errors, "{}", describe_error(err))?;
    for hint in &err.hints {
        writeln!(errors, "  hint: {}", hint.message)?;
    }
    Ok(())
}

pub fn print_path_report(report: &PathReport) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let result = write_path_report(&mut stdout.lock(), &mut stderr.lock(), report);
    map_write_result(result, "write report")
}

pub fn print_error(err: &Error) -> Result<()> {
    let stderr = io::stderr();
    let result = write_error(&mut stderr.lock(), err);
    map_write_result(result, "write stderr")
}

fn map_write_result(result: io::Result<()>, context: &str) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()), // Exit gracefully on SIGPIPE
        Err(e) => Err(Error::internal_io(e.to_string(), Some(context.to_string()))),
    }
}
