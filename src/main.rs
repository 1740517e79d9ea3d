use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

use patternscout::analysis::{ProjectAnalyzer, ProjectReport};
use patternscout::config::Config;
use patternscout::report::{CsvReportWriter, ReportFormat, Reporter, SummaryReporter};

/// patternscout - GoF design pattern identification for Java projects
#[derive(Parser, Debug)]
#[command(name = "patternscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Treat each child directory of PATH as its own project (batch mode)
    #[arg(long)]
    projects_root: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to analyze (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Path substrings to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a per-batch CSV report to FILE
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Enable parallel processing (enabled by default)
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Summary,
    Json,
}

impl From<&OutputFormat> for ReportFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Summary => ReportFormat::Summary,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);
    info!("patternscout v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    if cli.projects_root {
        run_batch(&config, &cli)
    } else {
        run_single(&config, &cli)
    }
}

fn run_single(config: &Config, cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let analyzer = ProjectAnalyzer::new(config.clone()).with_parallel(cli.parallel);
    let report = analyzer.analyze(&cli.path).into_diagnostic()?;

    let reporter = Reporter::new((&cli.format).into(), cli.output.clone());
    reporter.report(&report).into_diagnostic()?;

    if let Some(csv_path) = csv_path(config, cli) {
        let mut writer = CsvReportWriter::create(&csv_path).into_diagnostic()?;
        writer.write_report(&report).into_diagnostic()?;
        let written = writer.finish().into_diagnostic()?;
        if !cli.quiet {
            println!("{}", format!("CSV report: {}", written.display()).dimmed());
        }
    }

    print_timing(cli.quiet, report.files, start);
    Ok(())
}

fn run_batch(config: &Config, cli: &Cli) -> Result<()> {
    let start = Instant::now();
    let projects = child_projects(&cli.path);

    if projects.is_empty() {
        println!("{}", "No project directories found.".yellow());
        return Ok(());
    }

    let progress = batch_progress(projects.len(), cli.quiet);

    // Projects share no state; a failed one never stops the rest.
    let outcomes: Vec<(PathBuf, miette::Result<ProjectReport>)> = projects
        .par_iter()
        .map(|project| {
            let analyzer = ProjectAnalyzer::new(config.clone()).with_parallel(false);
            let outcome = analyzer.analyze(project).into_diagnostic();
            progress.inc(1);
            (project.clone(), outcome)
        })
        .collect();
    progress.finish_and_clear();

    let mut csv_writer = match csv_path(config, cli) {
        Some(path) => Some(CsvReportWriter::create(&path).into_diagnostic()?),
        None => None,
    };

    let reporter = Reporter::new((&cli.format).into(), cli.output.clone());
    let mut reports = Vec::new();
    for (project, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                reporter.report(&report).into_diagnostic()?;
                if let Some(writer) = csv_writer.as_mut() {
                    writer.write_report(&report).into_diagnostic()?;
                }
                reports.push(report);
            }
            Err(e) => {
                error!("{}: {}", project.display(), e);
            }
        }
    }

    if let Some(writer) = csv_writer {
        let written = writer.finish().into_diagnostic()?;
        if !cli.quiet {
            println!("{}", format!("CSV report: {}", written.display()).dimmed());
        }
    }

    SummaryReporter::new().report(&reports);
    let total_files: usize = reports.iter().map(|r| r.files).sum();
    print_timing(cli.quiet, total_files, start);
    Ok(())
}

/// Immediate child directories of the batch root, sorted.
fn child_projects(root: &Path) -> Vec<PathBuf> {
    let mut projects: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    projects.sort();
    projects
}

fn batch_progress(total: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} projects")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn csv_path(config: &Config, cli: &Cli) -> Option<PathBuf> {
    cli.csv.clone().or_else(|| config.csv_report.clone())
}

fn print_timing(quiet: bool, files: usize, start: Instant) {
    if !quiet {
        println!(
            "{}",
            format!(
                "⏱  Analyzed {} files in {:.2}s",
                files,
                start.elapsed().as_secs_f64()
            )
            .dimmed()
        );
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path).into_diagnostic()?
    } else {
        Config::from_default_locations(&cli.path).into_diagnostic()?
    };

    // Override with CLI arguments
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}
