//! gostlint CLI - GOST thesis auditing tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use gostlint::render::{excerpt, to_json, to_text};
use gostlint::{
    AuditOptions, AuditReport, Auditor, Category, FormatRules, HeaderScope, JsonFormat, Severity,
    TextOptions,
};

#[derive(Parser)]
#[command(name = "gostlint")]
#[command(version)]
#[command(about = "Audit GOST-formatted thesis documents", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input document JSON files
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit documents and list findings
    Check {
        /// Input document JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output the full report as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// List errors only
        #[arg(long)]
        errors_only: bool,

        #[command(flatten)]
        audit: AuditArgs,
    },

    /// Show the document outline
    Outline {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        audit: AuditArgs,
    },

    /// Show bibliography entries in canonical form
    Citations {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        audit: AuditArgs,
    },

    /// Show document statistics
    Info {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct AuditArgs {
    /// Where main-part headers are searched for
    #[arg(long, value_enum, default_value = "introduction", env = "GOSTLINT_SCOPE")]
    scope: Scope,

    /// Accept isolated headers anywhere
    #[arg(long)]
    isolated_headers: bool,

    /// Skip formatting checks
    #[arg(long)]
    no_format: bool,

    /// Formatting rules JSON file
    #[arg(long, value_name = "FILE", env = "GOSTLINT_RULES")]
    rules: Option<PathBuf>,
}

#[derive(Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
enum Scope {
    /// Introduction part only (default)
    #[default]
    Introduction,
    /// Everything after the first part title
    Document,
}

impl From<Scope> for HeaderScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Introduction => HeaderScope::Introduction,
            Scope::Document => HeaderScope::Document,
        }
    }
}

impl AuditArgs {
    fn auditor(&self) -> Result<Auditor, Box<dyn std::error::Error>> {
        let mut options = AuditOptions::new()
            .with_header_scope(self.scope.into())
            .with_isolated_headers(self.isolated_headers)
            .with_formatting(!self.no_format);

        if let Some(ref path) = self.rules {
            let json = fs::read_to_string(path)?;
            options = options.with_format_rules(FormatRules::from_json(&json)?);
        }

        Ok(Auditor::with_options(options))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Check {
            inputs,
            json,
            compact,
            output,
            errors_only,
            audit,
        }) => cmd_check(&inputs, json, compact, output.as_deref(), errors_only, &audit),
        Some(Commands::Outline { input, audit }) => cmd_outline(&input, &audit),
        Some(Commands::Citations { input, audit }) => cmd_citations(&input, &audit),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(true)
        }
        None => {
            // Default behavior: check if inputs are provided
            if cli.inputs.is_empty() {
                println!("{}", "Usage: gostlint <FILE>...".yellow());
                println!("       gostlint --help for more information");
                Ok(true)
            } else {
                cmd_check(&cli.inputs, false, false, None, false, &AuditArgs::default())
            }
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Audit every input; returns false if any document has errors.
fn cmd_check(
    inputs: &[PathBuf],
    json: bool,
    compact: bool,
    output: Option<&Path>,
    errors_only: bool,
    audit: &AuditArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let auditor = audit.auditor()?;

    let pb = if inputs.len() > 1 && !json {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        if let Some(ref pb) = pb {
            pb.set_message(input.display().to_string());
        }
        reports.push(auditor.audit_file(input)?);
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let clean = reports.iter().all(|r| !r.has_errors());

    if json {
        let rendered = match reports.as_slice() {
            [report] => to_json(
                report,
                if compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                },
            )?,
            _ if compact => serde_json::to_string(&reports)?,
            _ => serde_json::to_string_pretty(&reports)?,
        };
        write_output(output, &rendered)?;
        return Ok(clean);
    }

    if let Some(path) = output {
        let options = if errors_only {
            TextOptions::new().errors_only()
        } else {
            TextOptions::new()
        };
        let mut text = String::new();
        for report in &reports {
            text.push_str(&format!("{}\n", report.source().unwrap_or("<document>")));
            text.push_str(&to_text(report, &options)?);
            text.push_str("\n\n");
        }
        fs::write(path, text.trim_end())?;
        println!("{} {}", "Saved to".green(), path.display());
        return Ok(clean);
    }

    for report in &reports {
        print_findings(report, errors_only);
    }

    if reports.len() > 1 {
        let failed = reports.iter().filter(|r| r.has_errors()).count();
        println!(
            "{} {} documents checked, {} with errors",
            "Done!".green().bold(),
            reports.len(),
            failed
        );
    }

    Ok(clean)
}

fn print_findings(report: &AuditReport, errors_only: bool) {
    println!(
        "{}",
        report.source().unwrap_or("<document>").cyan().bold()
    );

    let paragraphs = &report.document.paragraphs;
    for located in report.all_findings() {
        let severity = located.finding.severity;
        if errors_only && severity != Severity::Error {
            continue;
        }
        let label = match severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        match located.paragraph.and_then(|i| paragraphs.get(i)) {
            Some(p) => println!(
                "  {} {}: {}  {}",
                format!("{:>5}", p.index + 1).dimmed(),
                label,
                located.finding,
                format!("\"{}\"", excerpt(p, 60)).dimmed()
            ),
            None => println!("  {} {}: {}", "    -".dimmed(), label, located.finding),
        }
    }

    let summary = format!(
        "{} errors, {} warnings",
        report.stats.error_count, report.stats.warning_count
    );
    if report.has_errors() {
        println!("{}\n", summary.red());
    } else if report.stats.warning_count > 0 {
        println!("{}\n", summary.yellow());
    } else {
        println!("{}\n", "No findings".green());
    }
}

fn cmd_outline(input: &Path, audit: &AuditArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let report = audit.auditor()?.structure_only().audit_file(input)?;
    let options = TextOptions::new()
        .with_outline(true)
        .with_findings(false);
    println!("{}", to_text(&report, &options)?);
    Ok(true)
}

fn cmd_citations(input: &Path, audit: &AuditArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let report = audit.auditor()?.without_formatting().audit_file(input)?;
    let paragraphs = &report.document.paragraphs;

    println!("{}", "Bibliography".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut clean = true;
    for p in paragraphs {
        let Some(ref citation) = p.meta.citation else {
            continue;
        };
        let deviates = p
            .meta
            .findings
            .iter()
            .any(|f| f.category() == Category::Citation);
        clean &= !deviates;
        let mark = if !citation.record.is_recognized() {
            "?".red().bold()
        } else if deviates {
            "~".yellow().bold()
        } else {
            "✓".green()
        };
        println!("{} {}", mark, citation.canonical);
        if deviates {
            println!("  {} {}", "was:".dimmed(), excerpt(p, 0).dimmed());
        }
    }

    Ok(clean)
}

fn cmd_info(input: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let report = Auditor::new().audit_file(input)?;
    let stats = &report.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = report.document.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = report.document.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Sections".bold(), report.document.sections.len());
    println!(
        "{}: {}",
        "Structure".bold(),
        if report.parts.is_recognized() {
            "recognized"
        } else {
            "not recognized"
        }
    );

    println!();
    println!("{}", "Audit Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headers".bold(), stats.header_count);
    println!("{}: {}", "Outline nodes".bold(), stats.node_count);
    println!("{}: {}", "Declarations".bold(), stats.declaration_count);
    println!("{}: {}", "References".bold(), stats.reference_count);
    println!(
        "{}: {} ({} recognized)",
        "Citations".bold(),
        stats.citation_count,
        stats.recognized_citations
    );
    println!("{}: {}", "Errors".bold(), stats.error_count);
    println!("{}: {}", "Warnings".bold(), stats.warning_count);

    Ok(true)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "gostlint".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("GOST thesis auditing tool");
    println!();
    println!("License: MIT");
}
