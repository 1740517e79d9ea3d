//! patternscout - GoF design pattern identification for Java projects
//!
//! This library recognizes instances of nine classic object-oriented design
//! patterns (Singleton, Factory Method, Abstract Factory, Adapter,
//! Decorator, Visitor, Facade, Observer, Memento) from the structure of a
//! Java codebase.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .java files in the project
//! 2. **Fact Extraction** - Parse source files using tree-sitter
//! 3. **Call Graph Assembly** - Resolve call expressions into caller/callee
//!    records (hard barrier: completes before any detector runs)
//! 4. **Pattern Detection** - Run the nine registered detectors over the
//!    read-only model
//! 5. **Reporting** - Output results as terminal text, JSON, or CSV

pub mod analysis;
pub mod callgraph;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod model;
pub mod parser;
pub mod patterns;
pub mod report;

pub use analysis::{assemble_model, detect_patterns, Finding, ProjectAnalyzer, ProjectReport};
pub use callgraph::{CallGraphBuilder, CallGraphStats, Resolution, Resolver, ScopeResolver};
pub use config::Config;
pub use discovery::FileFinder;
pub use errors::AnalysisError;
pub use model::{CodeModel, TypeEntry};
pub use parser::{CallSite, JavaParser, ParsedFile};
pub use patterns::{registry, PatternDetector, PatternEvidence};
pub use report::{CsvReportWriter, ReportFormat, Reporter};
