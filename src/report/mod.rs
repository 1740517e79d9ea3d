mod csv;
mod json;
mod summary;
mod terminal;

pub use csv::CsvReportWriter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use terminal::TerminalReporter;

use crate::analysis::ProjectReport;
use crate::errors::Result;
use std::path::PathBuf;

/// Output format for reports.
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    /// Default terminal output.
    #[default]
    Terminal,
    /// One-line-per-project statistics.
    Summary,
    /// JSON machine-readable format.
    Json,
}

/// Reporter for a single project's detection results.
///
/// The per-batch CSV report is intentionally not dispatched from here: its
/// writer is a scoped object owned by the batch driver (created once,
/// finished at batch end), not a per-project formatter.
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    pub fn report(&self, report: &ProjectReport) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new().report(report);
                Ok(())
            }
            ReportFormat::Summary => {
                SummaryReporter::new().report(std::slice::from_ref(report));
                Ok(())
            }
            ReportFormat::Json => {
                JsonReporter::new(self.output_path.clone()).report(report)
            }
        }
    }
}
