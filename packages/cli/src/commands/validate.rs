use crate::commands::{read_details, resolve};
use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use courier_builder::{BuilderOptions, BuilderSession};
use courier_message::{Problem, Severity};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Connection details JSON file, or a directory of them
    pub input: PathBuf,

    /// Resolved preview messages to check placeholders against
    #[arg(short, long)]
    pub resolved: Option<PathBuf>,

    /// Output format (text, json); defaults to the config file's
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Problems found in one file
#[derive(Debug, Default)]
struct Report {
    problems: Vec<Problem>,
    blocking: usize,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let format = args.format.unwrap_or(config.format);
    let input = resolve(cwd, &args.input);

    let resolved = match &args.resolved {
        Some(path) if input.is_dir() => {
            return Err(anyhow::anyhow!(
                "--resolved {} only applies to a single file",
                path.display()
            ));
        }
        Some(path) => Some(read_resolved(&resolve(cwd, path))?),
        None => None,
    };

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_details_files(&input)
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    };

    let mut reports = BTreeMap::new();
    for file in files {
        let report = check_file(&file, resolved.as_deref(), &config.builder)?;
        reports.insert(file, report);
    }

    match format {
        OutputFormat::Json => print_json(&input, &reports)?,
        OutputFormat::Text => print_text(&reports),
    }

    // Exit with error code if anything would block a save
    if reports.values().any(|report| report.blocking > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Validate one file the way a builder session would before saving
fn check_file(path: &Path, resolved: Option<&[Value]>, options: &BuilderOptions) -> Result<Report> {
    let details = read_details(path)?;
    let mut session = BuilderSession::from_details(&details, options.clone());

    if let Some(messages) = resolved {
        session.receive_resolved_preview(messages);
    }

    let problems: Vec<Problem> = session.validate().into_iter().cloned().collect();
    let blocking = problems
        .iter()
        .filter(|problem| problem.is_error() || options.warnings_block_save)
        .count();

    debug!(file = %path.display(), problems = problems.len(), blocking, "validated");

    Ok(Report { problems, blocking })
}

/// A single resolved message or an array of them
fn read_resolved(path: &Path) -> Result<Vec<Value>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    match serde_json::from_str(&source)? {
        Value::Array(messages) => Ok(messages),
        message => Ok(vec![message]),
    }
}

fn find_details_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().map(|e| e == "json").unwrap_or(false)
                && path.file_name().map(|n| n != DEFAULT_CONFIG_NAME).unwrap_or(false)
        })
        .collect()
}

fn print_json(input: &Path, reports: &BTreeMap<PathBuf, Report>) -> Result<()> {
    let json = if input.is_file() {
        let problems: Vec<&Problem> = reports.values().flat_map(|r| &r.problems).collect();
        serde_json::to_string_pretty(&problems)?
    } else {
        let by_file: BTreeMap<String, &Vec<Problem>> = reports
            .iter()
            .map(|(path, report)| (path.display().to_string(), &report.problems))
            .collect();
        serde_json::to_string_pretty(&by_file)?
    };

    println!("{}", json);
    Ok(())
}

fn print_text(reports: &BTreeMap<PathBuf, Report>) {
    let mut errors = 0;
    let mut warnings = 0;

    for (path, report) in reports {
        if report.problems.is_empty() {
            println!("{} {}", "✓".green(), path.display());
            continue;
        }

        println!("{}", path.display());

        for problem in &report.problems {
            let level = match problem.severity {
                Severity::Error => {
                    errors += 1;
                    "error".red().bold()
                }
                Severity::Warning => {
                    warnings += 1;
                    "warning".yellow().bold()
                }
            };

            println!("  {} {} {}", level, problem.path.dimmed(), problem.message);
        }

        println!();
    }

    println!("   Files checked: {}", reports.len());
    if errors > 0 {
        println!("   {} {}", "Errors:".red(), errors);
    }
    if warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }
    if errors == 0 && warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }
}
