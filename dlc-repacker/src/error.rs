//! Error types for the repacker

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repack operations
pub type Result<T> = std::result::Result<T, RepackError>;

/// Main error type for repack operations
///
/// Every variant names the file it concerns so a failed run identifies the
/// offending archive before the process terminates.
#[derive(Error, Debug)]
pub enum RepackError {
    /// I/O error on a specific file or folder
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or folder the operation touched
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The archive library rejected a file
    #[error("failed to process archive {path}: {source}")]
    Archive {
        /// The archive concerned
        path: PathBuf,
        /// The underlying archive error
        #[source]
        source: scs_hashfs::Error,
    },

    /// An archive holds no manifest entry
    #[error("no manifest entry found in {path}")]
    ManifestMissing {
        /// The archive concerned
        path: PathBuf,
    },

    /// A manifest carries no recognizable version field
    #[error("no version field found in manifest of {path}")]
    VersionMissing {
        /// The archive concerned
        path: PathBuf,
    },

    /// The requested game folder does not exist
    #[error("folder does not exist: {path}")]
    FolderMissing {
        /// The folder requested
        path: PathBuf,
    },
}

impl RepackError {
    /// Attach file context to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RepackError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach file context to an archive error
    pub fn archive(path: impl Into<PathBuf>, source: scs_hashfs::Error) -> Self {
        RepackError::Archive {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_name_the_offending_file() {
        let err = RepackError::ManifestMissing {
            path: PathBuf::from("dlc_toys.scs"),
        };
        assert_eq!(err.to_string(), "no manifest entry found in dlc_toys.scs");

        let err = RepackError::io(
            "dlc_rims.scs",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("dlc_rims.scs"));
    }
}
