//! Error taxonomy for a project analysis run.
//!
//! Failures are scoped as narrowly as possible: a file that fails to parse
//! becomes an empty type stub, a call that fails to resolve becomes an
//! unresolved edge (see [`crate::callgraph::Resolution`] - that case is a
//! value, not an error). Only project-level conditions surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end (or describe the end of) a single project's analysis.
///
/// None of these abort a batch: the batch driver reports the failed project
/// and moves on to the next one.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The Java grammar could not be loaded into the tree-sitter parser.
    #[error("failed to load the Java grammar: {0}")]
    Grammar(String),

    /// A configuration file could not be read or parsed.
    #[error("failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A source file could not be read from disk.
    ///
    /// Parse errors inside a readable file are *not* reported through this
    /// variant; they degrade to an empty `TypeEntry` stub.
    #[error("failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project contained no parseable Java files at all.
    #[error("no Java files found under {root}")]
    EmptyProject { root: PathBuf },

    /// A detector panicked on a well-typed model.
    ///
    /// This is a programming error in the detector, fatal to the current
    /// project's analysis only.
    #[error("detector '{pattern}' failed: {reason}")]
    DetectorFault { pattern: String, reason: String },

    /// A report could not be written to its destination.
    #[error("failed to write report to {path}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AnalysisError>;
