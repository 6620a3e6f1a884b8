use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationMissingArgument,

    PatternInvalid,

    PathNotFound,
    PathReadFailed,

    RenameFailed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationMissingArgument => "validation.missing_argument",

            ErrorCode::PatternInvalid => "pattern.invalid",

            ErrorCode::PathNotFound => "path.not_found",
            ErrorCode::PathReadFailed => "path.read_failed",

            ErrorCode::RenameFailed => "rename.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInvalidDetails {
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFailedDetails {
    pub path: String,
    pub from: String,
    pub to: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn pattern_invalid(pattern: impl Into<String>, err: &regex::Error) -> Self {
        Self::new(
            ErrorCode::PatternInvalid,
            "Bad regular expression!",
            to_details(PatternInvalidDetails {
                pattern: pattern.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn path_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::PathNotFound,
            format!("Not Exist: {}", path),
            to_details(PathDetails { path, error: None }),
        )
    }

    pub fn path_read_failed(path: impl Into<String>, err: &std::io::Error) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::PathReadFailed,
            format!("ReadDir Error: {}", path),
            to_details(PathDetails {
                path,
                error: Some(err.to_string()),
            }),
        )
    }

    pub fn rename_failed(details: RenameFailedDetails) -> Self {
        let message = format!("Rename file error: [{} -> {}]", details.from, details.to);
        Self::new(ErrorCode::RenameFailed, message, to_details(details))
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_not_found_names_the_path() {
        let err = Error::path_not_found("missing/dir");
        assert_eq!(err.code.as_str(), "path.not_found");
        assert_eq!(err.to_string(), "Not Exist: missing/dir");
        assert_eq!(err.details["path"], "missing/dir");
    }

    #[test]
    fn pattern_invalid_keeps_regex_diagnostic() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err = Error::pattern_invalid("(unclosed", &regex_err);
        assert_eq!(err.message, "Bad regular expression!");
        assert_eq!(err.details["pattern"], "(unclosed");
        assert!(!err.details["error"].as_str().unwrap().is_empty());
    }

    #[test]
    fn rename_failed_message_shows_both_names() {
        let err = Error::rename_failed(RenameFailedDetails {
            path: "dir/a.txt".to_string(),
            from: "a.txt".to_string(),
            to: "b.txt".to_string(),
            error: "permission denied".to_string(),
        });
        assert_eq!(err.code, ErrorCode::RenameFailed);
        assert_eq!(err.to_string(), "Rename file error: [a.txt -> b.txt]");
        assert_eq!(err.details["error"], "permission denied");
    }

    #[test]
    fn with_hint_appends() {
        let err = Error::validation_missing_argument(vec!["-s".to_string()])
            .with_hint("Pass a pattern with -s <regex>");
        assert_eq!(err.hints.len(), 1);
        assert_eq!(err.details["args"][0], "-s");
    }
}
