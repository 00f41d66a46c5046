//! SpikeWatch CLI: scan instruments for price spikes and export reports.
//!
//! Commands:
//! - `scan`: load each instrument, detect spikes, export CSV/SVG/manifest
//! - `init-config`: write the default scan configuration as TOML

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use spikewatch_runner::{
    format_pct, run_scan, ChartRenderer, LogProgress, ScanConfig, ScanSummary, SourceConfig,
    SvgChartRenderer,
};

#[derive(Parser)]
#[command(
    name = "spikewatch",
    about = "SpikeWatch: price spike and anomaly detection over daily OHLCV series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan instruments and export anomaly tables, charts and a manifest.
    Scan {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Instrument to scan (repeatable). Replaces the configured list.
        #[arg(long = "instrument")]
        instruments: Vec<String>,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        end: Option<String>,

        /// Output directory for tables, charts and manifest.json.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Data source.
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// Directory of <ID>.csv files. Implies --source csv; rejected with other sources.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Skip chart rendering.
        #[arg(long, default_value_t = false)]
        no_charts: bool,

        /// Rows per instrument in the printed summary.
        #[arg(long)]
        top: Option<usize>,
    },
    /// Write the default configuration to a TOML file.
    InitConfig {
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Yahoo,
    Csv,
    Synthetic,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            instruments,
            start,
            end,
            output_dir,
            source,
            data_dir,
            no_charts,
            top,
        } => {
            let overrides = Overrides {
                instruments,
                start,
                end,
                output_dir,
                source,
                data_dir,
                no_charts,
                top,
            };
            run_scan_cmd(config, overrides)
        }
        Commands::InitConfig { path, force } => run_init_config(path, force),
    }
}

struct Overrides {
    instruments: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    output_dir: Option<PathBuf>,
    source: Option<SourceArg>,
    data_dir: Option<PathBuf>,
    no_charts: bool,
    top: Option<usize>,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn build_config(path: Option<PathBuf>, o: Overrides) -> Result<ScanConfig> {
    let mut config = match path {
        Some(path) => ScanConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if !o.instruments.is_empty() {
        config.instruments = o.instruments;
    }
    if let Some(start) = o.start.as_deref() {
        config.start_date = parse_date(start)?;
    }
    if let Some(end) = o.end.as_deref() {
        config.end_date = parse_date(end)?;
    }
    if let Some(dir) = o.output_dir {
        config.output_dir = dir;
    }

    let configured_dir = match &config.source {
        SourceConfig::Csv { dir } => Some(dir.clone()),
        _ => None,
    };
    match (o.source, o.data_dir) {
        (Some(SourceArg::Yahoo | SourceArg::Synthetic), Some(dir)) => {
            bail!("--data-dir {} only applies to --source csv", dir.display());
        }
        (Some(SourceArg::Yahoo), None) => config.source = SourceConfig::Yahoo,
        (Some(SourceArg::Synthetic), None) => config.source = SourceConfig::Synthetic,
        (Some(SourceArg::Csv), dir) | (None, dir @ Some(_)) => {
            let Some(dir) = dir.or(configured_dir) else {
                bail!("--source csv requires --data-dir");
            };
            config.source = SourceConfig::Csv { dir };
        }
        (None, None) => {}
    }

    if o.no_charts {
        config.output.charts = false;
    }
    if let Some(top) = o.top {
        config.output.top_n = top;
    }

    config.validate()?;
    Ok(config)
}

fn run_scan_cmd(config_path: Option<PathBuf>, overrides: Overrides) -> Result<()> {
    let config = build_config(config_path, overrides)?;
    let loader = config.build_loader()?;
    info!(
        source = loader.name(),
        instruments = config.instruments.len(),
        start = %config.start_date,
        end = %config.end_date,
        "starting scan"
    );

    let svg = SvgChartRenderer::default();
    let renderer: Option<&dyn ChartRenderer> = Some(&svg);
    let summary = run_scan(&config, loader.as_ref(), renderer, &LogProgress)?;

    print_summary(&summary, config.output.top_n);
    println!("Output written to: {}", config.output_dir.display());
    Ok(())
}

fn print_summary(summary: &ScanSummary, top_n: usize) {
    for report in &summary.reports {
        let analysis = &report.analysis;
        println!();
        println!(
            "{}: {} sessions, {} anomalies, {} suspect sessions",
            analysis.instrument,
            analysis.len(),
            report.table.len(),
            analysis.suspect_count()
        );
        if report.table.is_empty() {
            println!("  no anomalies");
            continue;
        }
        println!(
            "  {:<10} {:>12} {:>12} {:<6} {:<5} {:<8}",
            "Date", "Close", "Change", "Kind", "Dir", "Fraud"
        );
        println!("  {}", "-".repeat(58));
        for row in report.table.top(top_n) {
            println!(
                "  {:<10} {:>12.2} {:>12} {:<6} {:<5} {:<8}",
                row.date,
                row.close,
                row.pct_change.map(format_pct).unwrap_or_default(),
                row.kind,
                row.direction.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                row.fraud
            );
        }
    }

    for skipped in &summary.skipped {
        println!("\nSkipped {}: {}", skipped.instrument, skipped.reason);
    }

    println!();
    if summary.has_anomalies() {
        println!(
            "Total: {} anomalies across {} instruments ({} skipped)",
            summary.global.len(),
            summary.reports.len(),
            summary.skipped.len()
        );
    } else {
        println!(
            "No anomalies detected across {} instruments ({} skipped)",
            summary.reports.len(),
            summary.skipped.len()
        );
    }
}

fn run_init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let toml = ScanConfig::default().to_toml()?;
    std::fs::write(&path, toml).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
