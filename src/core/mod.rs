// Public API - consumed by the CLI binary and integration tests
pub mod batch;
pub mod error;
pub mod pattern;
pub mod rename;
pub mod walk;

pub use batch::{PathReport, RenameConfig};
pub use error::{Error, ErrorCode, Result};
pub use pattern::Pattern;
pub use rename::{rename_entry, FileRename, RenameFailure, RenameOutcome};
pub use walk::{walk, WalkReport};
