//! Error types for fluentfs.

use std::path::{Path, PathBuf};

use crate::FileKind;

/// Error type shared by every fallible fluentfs operation.
///
/// All variants carry the context (path, pattern, label) needed to report the
/// failure. Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use fluentfs::{FileKind, FsError};
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound {
///     path: PathBuf::from("/missing"),
///     kind: FileKind::Directory,
/// };
/// assert_eq!(err.to_string(), "there is no directory at /missing");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Entity errors
    /// No entity of the requested kind exists at the path.
    #[error("there is no {kind} at {}", path.display())]
    NotFound {
        /// The resolved path that was checked.
        path: PathBuf,
        /// The kind of entity that was expected.
        kind: FileKind,
    },

    /// Nothing that looks like a file, directory or symbolic link exists at the path.
    #[error("no file-like object present at path {}", path.display())]
    NothingAt {
        /// The path that was classified.
        path: PathBuf,
    },

    /// A symbolic link (or a chain of them) ends at a path where nothing exists.
    #[error("broken symbolic link: {} points to missing {}", link.display(), target.display())]
    BrokenLink {
        /// The link whose chain is broken.
        link: PathBuf,
        /// The path the chain ended at.
        target: PathBuf,
    },

    /// A chain of symbolic links revisits a link it already followed.
    #[error("symbolic link cycle detected starting at {}", link.display())]
    LinkCycle {
        /// The link the resolution started from.
        link: PathBuf,
    },

    // Argument errors
    /// An argument had the wrong shape (table columns, rows, column ids).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A glob or regular expression could not be compiled.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// The encoding label is not known.
    #[error("unknown encoding: {label}")]
    UnknownEncoding {
        /// The label that was requested.
        label: String,
    },

    // Data errors
    /// File content is not valid in the requested encoding.
    #[error("cannot decode file at {} using {encoding} encoding", path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// Name of the encoding that was used.
        encoding: &'static str,
    },

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error with context.
    #[error("{operation} failed for {}: {source}", path.display())]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error with the operation and path it happened on.
    pub(crate) fn io(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        FsError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_kind() {
        let err = FsError::NotFound {
            path: PathBuf::from("/missing.txt"),
            kind: FileKind::File,
        };
        assert_eq!(err.to_string(), "there is no regular file at /missing.txt");
    }

    #[test]
    fn broken_link_display() {
        let err = FsError::BrokenLink {
            link: PathBuf::from("/a"),
            target: PathBuf::from("/b"),
        };
        assert_eq!(
            err.to_string(),
            "broken symbolic link: /a points to missing /b"
        );
    }

    #[test]
    fn decode_display() {
        let err = FsError::Decode {
            path: PathBuf::from("/bin.dat"),
            encoding: "UTF-8",
        };
        assert_eq!(
            err.to_string(),
            "cannot decode file at /bin.dat using UTF-8 encoding"
        );
    }

    #[test]
    fn io_helper_keeps_context() {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = FsError::io("read", Path::new("/x"), source);
        assert_eq!(err.to_string(), "read failed for /x: boom");
    }
}
