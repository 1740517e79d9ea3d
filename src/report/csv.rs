//! Per-batch CSV report.
//!
//! One row per (project, pattern, role key). The writer is an explicit
//! scoped object: the batch driver creates it once, feeds it every project
//! report, and releases it with [`CsvReportWriter::finish`] at batch end.
//! There is no global handle anywhere.

use crate::analysis::ProjectReport;
use crate::errors::{AnalysisError, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct CsvReportWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    rows: usize,
}

impl CsvReportWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| AnalysisError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            rows: 0,
        };
        writer.write_line("project,pattern,role,detail")?;
        Ok(writer)
    }

    /// Append one project's findings.
    pub fn write_report(&mut self, report: &ProjectReport) -> Result<()> {
        for finding in &report.findings {
            match serde_json::to_value(&finding.evidence).unwrap_or(Value::Null) {
                Value::Object(map) => {
                    for (role, payload) in map {
                        let detail = serde_json::to_string(&payload).unwrap_or_default();
                        self.write_row(&report.project, finding.pattern, &role, &detail)?;
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        let role = item.as_str().map(String::from).unwrap_or_default();
                        self.write_row(&report.project, finding.pattern, &role, "")?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and close the report; consumes the writer.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .map_err(|source| AnalysisError::ReportWrite {
                path: self.path.clone(),
                source,
            })?;
        Ok(self.path)
    }

    fn write_row(&mut self, project: &str, pattern: &str, role: &str, detail: &str) -> Result<()> {
        let line = format!(
            "{},{},{},{}",
            escape(project),
            escape(pattern),
            escape(role),
            escape(detail)
        );
        self.rows += 1;
        self.write_line(&line)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|source| AnalysisError::ReportWrite {
            path: self.path.clone(),
            source,
        })
    }
}

/// Minimal CSV quoting: wrap fields containing separators or quotes.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
