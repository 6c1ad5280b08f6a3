//! I/O utilities for Flint
//!
//! Helpers for reading line-oriented sources. Lines are returned with the
//! trailing newline stripped; encoding is not interpreted beyond line
//! splitting.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

use crate::error::{CommonError, Result};

/// Read a file into a vector of lines, newline stripped.
///
/// A missing or unopenable path maps to `CommonError::NotFoundError`; read
/// failures after opening map to `CommonError::IoError`.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = open_readable(path)?;

    let reader = BufReader::new(file);
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(|e| {
            CommonError::io_error_with_source(format!("failed to read {}", path.display()), e)
        })?;
    trace!(path = %path.display(), lines = lines.len(), "read text source");
    Ok(lines)
}

/// Open a file for reading, mapping failure to `NotFoundError`.
///
/// Used by callers that only need to validate readability up front.
pub fn open_readable<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::open(path)
        .map_err(|e| CommonError::not_found_with_source(path.display().to_string(), e))
}

/// Check if a path exists.
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_lines_strips_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "alpha").unwrap();
        writeln!(file, "beta").unwrap();
        write!(file, "gamma").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_read_lines_missing_path() {
        let err = read_lines("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, CommonError::NotFoundError { .. }));
    }

    #[test]
    fn test_path_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(path_exists(dir.path()));
        assert!(!path_exists(dir.path().join("missing")));
    }
}
