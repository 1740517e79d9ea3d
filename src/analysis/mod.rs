//! Detection orchestration.
//!
//! The pipeline for one project: discover files, extract facts (in parallel,
//! merged in input order), assemble the call graph as a hard barrier, then
//! run every registered detector over the read-only model. Detectors run
//! concurrently but their results are collected in registry order, so a
//! report is reproducible run to run.

use crate::callgraph::{CallGraphBuilder, CallGraphStats};
use crate::config::Config;
use crate::discovery::FileFinder;
use crate::errors::{AnalysisError, Result};
use crate::model::{CodeModel, TypeEntry};
use crate::parser::{JavaParser, ParsedFile};
use crate::patterns::{registry, PatternEvidence};
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, info, warn};

/// One pattern that fired, with its evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub pattern: &'static str,
    pub evidence: PatternEvidence,
}

/// Result of analyzing one project.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    /// Directory name of the analyzed project.
    pub project: String,
    pub files: usize,
    /// Files that degraded to an empty stub entry.
    pub failed_files: usize,
    pub types: usize,
    pub call_graph: CallGraphStats,
    /// Non-empty detector results, in registry order.
    pub findings: Vec<Finding>,
}

/// Run every registered detector against an enriched model.
///
/// Detectors run concurrently; each writes its own evidence slot and empty
/// evidence is skipped. A panicking detector is a programming error - it is
/// converted into [`AnalysisError::DetectorFault`], which ends this
/// project's analysis without touching any other project in the batch.
pub fn detect_patterns(model: &CodeModel) -> Result<Vec<Finding>> {
    let detectors = registry();
    let outcomes: Vec<_> = detectors
        .par_iter()
        .map(|detector| {
            let outcome = catch_unwind(AssertUnwindSafe(|| detector.detect(model)));
            (detector.name(), outcome)
        })
        .collect();

    let mut findings = Vec::new();
    for (pattern, outcome) in outcomes {
        match outcome {
            Ok(evidence) => {
                if !evidence.is_empty() {
                    debug!("{} matched {} instance(s)", pattern, evidence.instances());
                    findings.push(Finding { pattern, evidence });
                }
            }
            Err(payload) => {
                return Err(AnalysisError::DetectorFault {
                    pattern: pattern.to_string(),
                    reason: panic_reason(payload.as_ref()),
                });
            }
        }
    }
    Ok(findings)
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Merge parsed files into a model and enrich it with the call graph.
///
/// Types are inserted in file order, so the last-write-wins collision rule
/// is deterministic. The returned model is final: nothing mutates it after
/// this function.
pub fn assemble_model(files: &[ParsedFile]) -> (CodeModel, CallGraphStats) {
    let mut model = CodeModel::new();
    for file in files {
        for entry in &file.types {
            model.insert(entry.clone());
        }
    }

    let mut builder = CallGraphBuilder::new(model);
    for file in files {
        builder.add_calls(&file.calls);
    }
    let stats = builder.stats();
    (builder.build(), stats)
}

/// Full single-project analysis: discover, parse, assemble, detect.
pub struct ProjectAnalyzer {
    config: Config,
    parallel: bool,
}

impl ProjectAnalyzer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn analyze(&self, root: &Path) -> Result<ProjectReport> {
        let finder = FileFinder::new(&self.config);
        let files = finder.find_files(root)?;
        if files.is_empty() {
            return Err(AnalysisError::EmptyProject {
                root: root.to_path_buf(),
            });
        }

        // Grammar problems surface once, up front, not per file.
        JavaParser::new()?;

        let parsed: Vec<ParsedFile> = if self.parallel {
            files.par_iter().map(|path| parse_one(path)).collect()
        } else {
            files.iter().map(|path| parse_one(path)).collect()
        };
        let failed_files = parsed.iter().filter(|p| p.failed).count();

        let (model, call_graph) = assemble_model(&parsed);
        let findings = detect_patterns(&model)?;

        let project = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        info!(
            "{}: {} files ({} failed), {} types, {} pattern(s)",
            project,
            files.len(),
            failed_files,
            model.len(),
            findings.len()
        );

        Ok(ProjectReport {
            project,
            files: files.len(),
            failed_files,
            types: model.len(),
            call_graph,
            findings,
        })
    }
}

/// Parse one file; any failure degrades to a stub entry.
fn parse_one(path: &Path) -> ParsedFile {
    let attempt = JavaParser::new().and_then(|mut parser| parser.parse_file(path));
    match attempt {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("stubbing {}: {}", path.display(), error);
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            ParsedFile {
                path: path.to_path_buf(),
                types: vec![TypeEntry::stub(stem)],
                calls: Vec::new(),
                failed: true,
            }
        }
    }
}
