// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-audit CLI - one-shot accessibility auditor for HTML documents

use a11y_audit::annotate::annotate;
use a11y_audit::config::{self, Config};
use a11y_audit::report::{generate_report, OutputFormat};
use a11y_audit::rules::RULE_SET;
use a11y_audit::scanner::{self, AuditedDocument, DocumentReport, ScanReport};
use a11y_audit::{Auditor, RuleId};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Accessibility auditor for rendered HTML
#[derive(Parser)]
#[command(name = "a11y-audit")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress findings of these rules (comma-separated rule ids)
    #[arg(long, global = true, value_delimiter = ',')]
    disable: Vec<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Only log findings, not progress or summaries
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit every HTML document under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Audit a single document ("-" reads standard input)
    Analyze {
        /// File to audit
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Write the document with error elements outlined to this file
        #[arg(long)]
        annotate: Option<PathBuf>,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Generate a SARIF report for a directory
    Report {
        /// Directory to scan
        dir: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the rule set
    Rules,

    /// Write the default configuration file
    InitConfig {
        /// Destination (defaults to the user configuration directory)
        path: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "a11y_audit=debug"
    } else if quiet {
        "a11y_audit=warn"
    } else {
        "a11y_audit=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::InitConfig { path } => {
            let path = path.unwrap_or(config_path);
            config::write_default_config(&path)?;
            println!("Created configuration file: {}", path.display());
        }

        Commands::Check { dir, format, output, strict } => {
            let (config, auditor) = load_auditor(&config_path, &cli.disable)?;
            let scan = scanner::scan_directory(&dir, &auditor, &config.scan)?;
            let report = generate_report(&scan, format.into());
            write_output(&report, output.as_deref())?;

            if fails(&scan, strict) {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, format, annotate: annotate_path, strict } => {
            let (config, auditor) = load_auditor(&config_path, &cli.disable)?;
            let (label, audited) = audit_input(&file, &auditor)?;

            if let Some(out) = annotate_path {
                let html = annotate(&audited.document, &audited.report.marked, &config.marker);
                std::fs::write(&out, html)?;
                eprintln!("Annotated document written to {}", out.display());
            }

            let mut scan = ScanReport::new();
            scan.push(DocumentReport {
                path: PathBuf::from(label),
                report: audited.report,
            });
            println!("{}", generate_report(&scan, format.into()));

            if fails(&scan, strict) {
                std::process::exit(1);
            }
        }

        Commands::Report { dir, output } => {
            let (config, auditor) = load_auditor(&config_path, &cli.disable)?;
            let scan = scanner::scan_directory(&dir, &auditor, &config.scan)?;
            let report = generate_report(&scan, OutputFormat::Sarif);
            write_output(&report, output.as_deref())?;
        }

        Commands::Rules => {
            let (_, auditor) = load_auditor(&config_path, &cli.disable)?;
            print_rules(&auditor);
        }
    }

    Ok(())
}

fn print_rules(auditor: &Auditor) {
    for rule in RULE_SET.iter() {
        println!("{} - {}", rule.name(), rule.description());
        for id in rule.produces() {
            let state = if auditor.is_enabled(*id) { "" } else { " (disabled)" };
            println!(
                "  {:<20} {:<8} {}{}",
                id.as_str(),
                id.severity().to_string(),
                id.name(),
                state
            );
        }
    }
}

/// Load the configuration and apply `--disable` on top of it
fn load_auditor(config_path: &Path, disable: &[String]) -> anyhow::Result<(Config, Auditor)> {
    let config = config::load_config(config_path)?;
    let mut auditor = Auditor::from_config(&config.rules);
    for id in disable {
        auditor = auditor.disable(id.parse::<RuleId>()?);
    }
    Ok((config, auditor))
}

/// Audit a file, or standard input for "-"
fn audit_input(file: &Path, auditor: &Auditor) -> anyhow::Result<(String, AuditedDocument)> {
    if file == Path::new("-") {
        let label = "<stdin>".to_string();
        let audited = scanner::audit_reader(&label, std::io::stdin().lock(), auditor)?;
        Ok((label, audited))
    } else {
        let label = file.display().to_string();
        let audited = scanner::audit_reader(&label, File::open(file)?, auditor)?;
        Ok((label, audited))
    }
}

fn fails(scan: &ScanReport, strict: bool) -> bool {
    scan.has_errors() || (strict && scan.has_warnings())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
