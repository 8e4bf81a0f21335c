// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An entry whose metadata could not be read while listing its directory.
    #[error("skipping {name} in {dir}: {source}")]
    MalformedEntry {
        dir: String,
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no entry at row {0}")]
    NoSuchEntry(usize),
}

impl BrowseError {
    pub fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => BrowseError::PathNotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => BrowseError::PermissionDenied(path.to_string()),
            _ => BrowseError::Io { path: path.to_string(), source: err },
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_onto_taxonomy() {
        let err = BrowseError::from_io("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, BrowseError::PathNotFound(ref p) if p == "/x"));

        let err = BrowseError::from_io("/y", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, BrowseError::PermissionDenied(_)));

        let err = BrowseError::from_io("/z", io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "I/O error on /z: boom");
    }
}
