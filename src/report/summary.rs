//! Batch summary output: aggregate statistics over all analyzed projects.

use crate::analysis::ProjectReport;
use colored::Colorize;
use std::collections::BTreeMap;

pub struct SummaryReporter;

impl SummaryReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, reports: &[ProjectReport]) {
        let total_files: usize = reports.iter().map(|r| r.files).sum();
        let total_failed: usize = reports.iter().map(|r| r.failed_files).sum();
        let total_types: usize = reports.iter().map(|r| r.types).sum();

        // pattern -> (projects it fired in, total instances)
        let mut per_pattern: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for report in reports {
            for finding in &report.findings {
                let slot = per_pattern.entry(finding.pattern).or_default();
                slot.0 += 1;
                slot.1 += finding.evidence.instances();
            }
        }

        println!();
        println!("{}", "Summary".bold());
        println!(
            "  {} project(s), {} files ({} failed), {} types",
            reports.len(),
            total_files,
            total_failed,
            total_types
        );

        if per_pattern.is_empty() {
            println!("  {}", "no design patterns identified".yellow());
            return;
        }

        println!();
        for (pattern, (projects, instances)) in per_pattern {
            println!(
                "  {} {}",
                format!("{:<18}", pattern).green(),
                format!("{} instance(s) across {} project(s)", instances, projects).dimmed()
            );
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}
