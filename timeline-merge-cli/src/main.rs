//! Timeline Merge CLI Application
//!
//! This is the command-line interface for the witness timeline merger.
//! It uses the timeline-merge library and adds:
//! - Input loading (JSON witness files, TOML configuration)
//! - Parallel processing of independent cases
//! - Report generation (text/JSON)

use anyhow::{bail, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use timeline_merge::{Case, CaseConfig};

mod config;
mod report;

use config::{AppConfig, CaseInput, OutputFormat};
use report::CaseReport;

/// Timeline Merge - Reconcile witness accounts into consistent timelines
#[derive(Parser, Debug)]
#[command(name = "timeline-merge-cli")]
#[command(about = "Merge overlapping witness event sequences", long_about = None)]
#[command(version)]
struct Args {
    /// JSON file with an array of witness event lists (can be repeated)
    #[arg(short, long, value_name = "FILE")]
    input: Vec<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show every state each sequence went through
    #[arg(long)]
    trace: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Timeline Merge CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using merge library v{}", timeline_merge::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let cases = collect_cases(&args, &app_config)?;

    let format = args.format.unwrap_or(app_config.output.format);
    let trace = args.trace || app_config.output.trace;

    let reports = run_cases(&cases, &app_config.sanitize, trace);

    let rendered = match format {
        OutputFormat::Text => report::render_text(&reports)?,
        OutputFormat::Json => report::render_json(&reports)?,
    };
    print!("{}", rendered);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

/// Gather the cases named by the config file and `--input`
///
/// The built-in example runs only when neither was given. A config that
/// ends up naming no cases is an error.
fn collect_cases(args: &Args, app_config: &AppConfig) -> Result<Vec<CaseInput>> {
    if args.config.is_none() && args.input.is_empty() {
        log::info!("No input given, running the built-in example");
        return Ok(vec![builtin_example()]);
    }

    let mut cases = match &args.config {
        Some(path) => app_config.resolve_cases(path.parent().unwrap_or(Path::new(".")))?,
        None => Vec::new(),
    };
    for path in &args.input {
        cases.push(CaseInput {
            name: path.display().to_string(),
            witnesses: config::load_witnesses(path)?,
        });
    }

    if cases.is_empty() {
        bail!("configuration names no cases");
    }
    Ok(cases)
}

/// Merge and analyze every case, one rayon task per case
///
/// Reports come back in input order.
fn run_cases(cases: &[CaseInput], sanitize: &CaseConfig, trace: bool) -> Vec<CaseReport> {
    cases
        .par_iter()
        .map(|input| {
            let mut case = Case::with_config(&input.witnesses, sanitize.clone());
            let summary = case.merge_all();
            let report = CaseReport::from_case(input.name.clone(), &case, summary, trace);
            log::info!(
                "Case {}: {} witnesses -> {}",
                input.name,
                report.analysis.num_sequences,
                report.analysis.status
            );
            report
        })
        .collect()
}

fn builtin_example() -> CaseInput {
    CaseInput {
        name: "example".to_string(),
        witnesses: vec![
            vec!["fight".to_string(), "gunshot".to_string(), "fleeing".to_string()],
            vec!["gunshot".to_string(), "falling".to_string(), "fleeing".to_string()],
        ],
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_merge::MergeStatus;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from([
            "timeline-merge-cli",
            "--input",
            "a.json",
            "-i",
            "b.json",
            "--format",
            "json",
            "-vv",
        ]);
        assert_eq!(args.input.len(), 2);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.verbose, 2);
        assert!(!args.trace);
    }

    #[test]
    fn test_no_arguments_runs_builtin_example() {
        let args = Args::parse_from(["timeline-merge-cli"]);
        let cases = collect_cases(&args, &AppConfig::default()).unwrap();
        assert_eq!(cases, vec![builtin_example()]);
    }

    #[test]
    fn test_config_without_cases_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let args = Args::parse_from(["timeline-merge-cli", "--config", path.to_str().unwrap()]);
        let app_config = config::load_config(&path).unwrap();

        let err = collect_cases(&args, &app_config).unwrap_err();
        assert!(err.to_string().contains("names no cases"), "unexpected error: {}", err);
    }

    #[test]
    fn test_input_files_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[output]\ntrace = true\n").unwrap();
        let input_path = dir.path().join("witnesses.json");
        std::fs::write(&input_path, r#"[["fight", "fleeing"], ["fight", "gunshot"]]"#).unwrap();

        let args = Args::parse_from([
            "timeline-merge-cli",
            "--config",
            config_path.to_str().unwrap(),
            "--input",
            input_path.to_str().unwrap(),
        ]);
        let app_config = config::load_config(&config_path).unwrap();

        let cases = collect_cases(&args, &app_config).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, input_path.display().to_string());
        assert_eq!(cases[0].witnesses[1], vec!["fight", "gunshot"]);
    }

    #[test]
    fn test_builtin_example_merges() {
        let reports = run_cases(&[builtin_example()], &CaseConfig::default(), false);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].analysis.status, MergeStatus::MergeComplete);
        assert_eq!(
            reports[0].analysis.merged,
            vec![vec!["fight", "gunshot", "falling", "fleeing"]]
        );
    }

    #[test]
    fn test_run_cases_keeps_order_and_sanitizes() {
        let cases = vec![
            CaseInput {
                name: "first".to_string(),
                witnesses: vec![vec!["Bribe".to_string()], vec!["Coverup".to_string()]],
            },
            CaseInput {
                name: "second".to_string(),
                witnesses: vec![
                    vec!["Fight ".to_string(), "fleeing".to_string()],
                    vec!["fight".to_string(), "gunshot".to_string(), "Fleeing".to_string()],
                ],
            },
        ];
        let sanitize = CaseConfig::new().with_trim(true).with_case_fold(true);

        let reports = run_cases(&cases, &sanitize, false);

        assert_eq!(reports[0].name, "first");
        assert_eq!(reports[0].analysis.status, MergeStatus::NoMergePossible);
        assert_eq!(reports[1].name, "second");
        assert_eq!(reports[1].analysis.status, MergeStatus::MergeComplete);
        assert_eq!(reports[1].analysis.merged, vec![vec!["fight", "gunshot", "fleeing"]]);
    }
}
