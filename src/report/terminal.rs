//! Default terminal output.

use crate::analysis::ProjectReport;
use colored::Colorize;

pub struct TerminalReporter {
    show_participants: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            show_participants: true,
        }
    }

    #[allow(dead_code)]
    pub fn with_participants(mut self, show: bool) -> Self {
        self.show_participants = show;
        self
    }

    pub fn report(&self, report: &ProjectReport) {
        println!();
        println!(
            "{} {}",
            "🔍".normal(),
            format!("Design patterns in {}", report.project).bold()
        );
        println!(
            "{}",
            format!(
                "   {} files ({} failed), {} types, {} call edges",
                report.files,
                report.failed_files,
                report.types,
                report.call_graph.resolved_edges
            )
            .dimmed()
        );
        println!();

        if report.findings.is_empty() {
            println!("{}", "No design patterns identified.".yellow());
            return;
        }

        for finding in &report.findings {
            let count = finding.evidence.instances();
            println!(
                "  {} {}",
                format!("{:<18}", finding.pattern).green().bold(),
                format!("{} instance(s)", count).normal()
            );
            if self.show_participants {
                for key in finding.evidence.keys() {
                    println!("    {} {}", "-".dimmed(), key.cyan());
                }
            }
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
