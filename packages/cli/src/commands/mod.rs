pub mod convert;
pub mod init;
pub mod outline;
pub mod validate;

pub use convert::{convert, ConvertArgs};
pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use courier_message::ConnectionDetails;
use std::path::{Path, PathBuf};

/// Read stored connection details from a JSON file
pub(crate) fn read_details(path: &Path) -> Result<ConnectionDetails> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    serde_json::from_str(&source)
        .with_context(|| format!("{} is not valid connection details", path.display()))
}

/// Resolve `path` against the working directory
pub(crate) fn resolve(cwd: &str, path: &Path) -> PathBuf {
    PathBuf::from(cwd).join(path)
}
