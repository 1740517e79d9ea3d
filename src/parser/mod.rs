//! Source fact extraction.
//!
//! The parser turns one Java file into raw facts: the [`TypeEntry`] skeleton
//! for every type declared in the file, plus the call expressions found in
//! method bodies. Call expressions are *syntactic* at this stage - the call
//! graph builder resolves them against the full model later.

mod java;

pub use java::JavaParser;

use crate::model::TypeEntry;
use std::path::PathBuf;

/// One method-call expression, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Simple name of the type whose method contains the call.
    pub caller_class: String,
    /// Name of the containing method.
    pub caller_method: String,
    /// Receiver expression text, if the call has one (`foo.bar()` -> `foo`).
    pub receiver: Option<String>,
    /// Name of the invoked method.
    pub method_name: String,
}

/// Everything extracted from a single file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub types: Vec<TypeEntry>,
    pub calls: Vec<CallSite>,
    /// True when the file failed to parse and `types` holds a stub entry.
    pub failed: bool,
}
