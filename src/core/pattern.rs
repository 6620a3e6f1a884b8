//! Compiled match-and-substitute pattern applied to entry names.

use std::ffi::{OsStr, OsString};

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled regular expression paired with its replacement template.
///
/// The template uses the `regex` crate's expansion syntax: `$1`, `${1}`,
/// `$name` and `${name}` refer to capture groups, `$$` is a literal `$`.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    /// Same source compiled for raw file names, which need not be UTF-8.
    #[cfg(unix)]
    bytes: regex::bytes::Regex,
    replacement: String,
}

impl Pattern {
    pub fn compile(source: &str, replacement: &str) -> Result<Self> {
        let invalid = |e: regex::Error| {
            Error::pattern_invalid(source, &e)
                .with_hint("Check the -s value; the syntax is documented at https://docs.rs/regex")
        };

        let regex = Regex::new(source).map_err(invalid)?;
        #[cfg(unix)]
        let bytes = regex::bytes::Regex::new(source).map_err(invalid)?;

        Ok(Self {
            regex,
            #[cfg(unix)]
            bytes,
            replacement: replacement.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Substitute every non-overlapping match in `name`.
    ///
    /// Returns `None` when the name does not match at all.
    pub fn substitute(&self, name: &str) -> Option<String> {
        if !self.is_match(name) {
            return None;
        }
        Some(
            self.regex
                .replace_all(name, self.replacement.as_str())
                .into_owned(),
        )
    }

    /// Substitute every match in a file name as the OS stores it.
    ///
    /// On unix the raw bytes are matched, so names that are not valid UTF-8
    /// can still be renamed. Returns `None` when the name does not match.
    #[cfg(unix)]
    pub fn substitute_name(&self, name: &OsStr) -> Option<OsString> {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let raw = name.as_bytes();
        if !self.bytes.is_match(raw) {
            return None;
        }
        let replaced = self
            .bytes
            .replace_all(raw, self.replacement.as_bytes())
            .into_owned();
        Some(OsString::from_vec(replaced))
    }

    /// Substitute every match in a file name as the OS stores it.
    ///
    /// Names that are not valid UTF-8 never match here.
    #[cfg(not(unix))]
    pub fn substitute_name(&self, name: &OsStr) -> Option<OsString> {
        name.to_str()
            .and_then(|n| self.substitute(n))
            .map(OsString::from)
    }
}
