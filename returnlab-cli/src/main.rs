//! ReturnLab CLI: run the return study and print or export its reports.
//!
//! Commands:
//! - `report` (default): run every market and print text, markdown or JSON
//! - `export`: write per-market CSV/Markdown and `study.json` to a directory
//! - `config show`: print the effective study configuration as TOML

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use returnlab_runner::export::{export_json, study_markdown, study_text, write_study};
use returnlab_runner::{init_logging, run_study, LogFormat, StudyConfig, StudyReport};

#[derive(Parser)]
#[command(
    name = "returnlab",
    about = "ReturnLab CLI: historical stock market returns adjusted for dividends and inflation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (RUST_LOG takes precedence).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format: pretty or json.
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the study and print a report (the default command).
    Report {
        #[command(flatten)]
        study: StudyArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Run the study and write per-market CSV and Markdown plus study.json.
    Export {
        #[command(flatten)]
        study: StudyArgs,

        /// Directory to write into. Created if missing.
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,
    },
    /// Configuration commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show {
        /// Path to a TOML config file. Defaults to the built-in study.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct StudyArgs {
    /// Path to a TOML config file. Defaults to the built-in three-market study.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the input files; overrides the config's data_dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Run markets in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Exit with an error if any market failed.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Markdown,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let command = cli.command.unwrap_or(Commands::Report {
        study: StudyArgs::default(),
        format: ReportFormat::Text,
    });

    match command {
        Commands::Report { study, format } => cmd_report(&study, format),
        Commands::Export { study, out_dir } => cmd_export(&study, out_dir),
        Commands::Config {
            action: ConfigAction::Show { config },
        } => cmd_config_show(config),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<StudyConfig> {
    match path {
        Some(p) => StudyConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(StudyConfig::builtin()),
    }
}

fn run(args: &StudyArgs) -> Result<(StudyConfig, StudyReport)> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if args.parallel {
        config.parallel = true;
    }

    let report = run_study(&config);
    tracing::info!(
        markets = report.markets.len(),
        failed = report.failed_count(),
        data_dir = %config.data_dir.display(),
        "study finished"
    );
    Ok((config, report))
}

fn check_strict(args: &StudyArgs, report: &StudyReport) -> Result<()> {
    let failed = report.failed_count();
    if args.strict && failed > 0 {
        let ids: Vec<&str> = report.failures().map(|f| f.id.as_str()).collect();
        bail!("{failed} market(s) failed: {}", ids.join(", "));
    }
    Ok(())
}

fn cmd_report(args: &StudyArgs, format: ReportFormat) -> Result<()> {
    let (config, report) = run(args)?;
    let decimals = config.display.decimals as usize;

    let out = match format {
        ReportFormat::Text => study_text(&report, decimals),
        ReportFormat::Markdown => study_markdown(&report, decimals),
        ReportFormat::Json => export_json(&report)?,
    };
    println!("{out}");

    check_strict(args, &report)
}

fn cmd_export(args: &StudyArgs, out_dir: PathBuf) -> Result<()> {
    let (config, report) = run(args)?;
    let written = write_study(&report, &out_dir, config.display.decimals as usize)?;

    println!("Wrote {} files to {}", written.len(), out_dir.display());
    for path in &written {
        println!("  {}", path.display());
    }
    if report.failed_count() > 0 {
        eprintln!(
            "warning: {} of {} markets failed; see their .md files",
            report.failed_count(),
            report.markets.len()
        );
    }

    check_strict(args, &report)
}

fn cmd_config_show(path: Option<PathBuf>) -> Result<()> {
    let config = load_config(path.as_ref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}
