//! JSON machine-readable output.
//!
//! The persisted shape is `patternName -> { roleKey -> payload }` under a
//! `patterns` key; patterns that produced empty evidence never appear.

use crate::analysis::ProjectReport;
use crate::errors::{AnalysisError, Result};
use serde_json::{json, Value};
use std::path::PathBuf;

pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &ProjectReport) -> Result<()> {
        let value = Self::to_value(report);
        let text = serde_json::to_string_pretty(&value).unwrap_or_default();

        match &self.output_path {
            Some(path) => {
                std::fs::write(path, text).map_err(|source| AnalysisError::ReportWrite {
                    path: path.clone(),
                    source,
                })?;
            }
            None => println!("{text}"),
        }
        Ok(())
    }

    pub fn to_value(report: &ProjectReport) -> Value {
        let mut patterns = serde_json::Map::new();
        for finding in &report.findings {
            patterns.insert(
                finding.pattern.to_string(),
                serde_json::to_value(&finding.evidence).unwrap_or(Value::Null),
            );
        }

        json!({
            "project": report.project,
            "files": report.files,
            "failed_files": report.failed_files,
            "types": report.types,
            "call_graph": {
                "methods": report.call_graph.methods,
                "resolved_edges": report.call_graph.resolved_edges,
                "unresolved_calls": report.call_graph.unresolved_calls,
            },
            "patterns": Value::Object(patterns),
        })
    }
}
