//! IO utilities.

use std::path::Path;

use crate::error::{with_err_context, ErrorContext, Result};

/// Creates (or truncates) the file at `path`, attaching the path to any
/// failure.
pub fn create_file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    let file = with_err_context(std::fs::File::create(path), || {
        ErrorContext::CreateFile(path.to_path_buf())
    })?;
    Ok(file)
}
