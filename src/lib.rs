//! # fluentfs
//!
//! Fluent, lazily evaluated queries over files, directories and symbolic links.
//!
//! Filesystem questions such as "how many lines do the `.txt` files below this
//! directory have, ignoring one subtree" become a single expression chain
//! instead of a hand-written loop.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fluentfs::{Directory, Fluent};
//!
//! let dir = Directory::new("~/notes")?;
//! let lines: usize = dir
//!     .files()
//!     .filter_not_base_path("~/notes/archive")?
//!     .filter_extension("txt")
//!     .text_files()
//!     .map_line_count()
//!     .sum::<Result<usize, _>>()?;
//! println!("{lines} lines");
//! # Ok::<(), fluentfs::FsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Directory`], [`RegularFile`], [`SymbolicLink`], [`TextFile`] | Typed handles on filesystem objects |
//! | [`Entry`] | Any of the above, classified without following links |
//! | [`Fluent`] | Filter/map/reduce/sort/top-n combinators |
//! | [`FunctionalIterator`] | Generic lazy sequence |
//! | [`FileIterator`], [`TextFileIterator`] | Lazy sequences of files with query filters |
//! | [`TreeWalk`] | Ordered depth-first directory walk |
//! | [`Table`] | Column-aligned report table |
//! | [`FileSize`] | Byte count with unit rendering |
//! | [`FsError`] | Error type with context |
//!
//! ---
//!
//! ## Laziness
//!
//! Every sequence is single-use and pulls from its source only when a
//! terminal operation (`to_list`, `sum`, `reduce`, `for_each`, ...) runs.
//! Entities hold no open file handles: each content access opens, reads and
//! closes the file.
//!
//! ---
//!
//! ## Path Resolution
//!
//! Constructors resolve their path once: `~` and `$VAR` are expanded
//! (controlled by [`Expansion`]), relative paths are joined to the working
//! directory and `.`/`..` are removed lexically. Entities found by walking a
//! directory skip expansion, so a file literally called `~` stays itself.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for [`FileKind`], [`Expansion`], [`FileSize`], [`FileSizeUnit`]; [`Table::to_json`] |
//! | `cli` | Builds the `fluentfs-stats` binary (pulls in `clap` and `tracing-subscriber`) |
//!
//! ---
//!
//! ## Logging
//!
//! The library emits `tracing` events (at `debug` and `trace` level) for
//! entries skipped during walks, symbolic-link resolution steps and
//! undecodable content read as empty. It never installs a subscriber.

// Private modules
mod error;
mod file_iterator;
mod filelike;
mod functional;
mod matches;
mod paths;
mod size;
mod table;
mod text;
mod types;
mod walk;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use size::{FileSize, FileSizeUnit};
pub use types::{Expansion, FileKind, WalkKind};

// Public re-exports - entities
pub use filelike::{Directory, Entry, FileLike, RegularFile, SymbolicLink, TextFile};

// Public re-exports - lazy sequences
pub use file_iterator::{FileIterator, TextFileIterator};
pub use functional::{Fluent, FunctionalIterator, Source};
pub use walk::TreeWalk;

// Public re-exports - reporting
pub use table::{ColumnId, Table};

// Public re-exports - path utilities
pub use paths::{
    base_name, current_path, dir_exists, expand_path, expand_paths, file_exists, file_like_exists,
    file_like_kind, path_is_absolute, path_is_relative, relative_path, symlink_exists,
};

// Public re-exports - matching
pub use matches::{
    PathList, Patterns, RegexList, compile_regex, matches_base_path, matches_compiled_regex,
    matches_glob, matches_regex,
};

// Public re-exports - text helpers
pub use text::{TextEncoding, chomp, encoding_for_label, is_blank};
