mod api;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::{DashboardReport, DiffReport, RangeReport, TimelineReport};
use engagement_core::config::EngagementConfig;
use engagement_core::diff::revert;
use engagement_core::ranges::{BandEstimator, BandSource, RangeNormalizer};
use engagement_core::{
    format_compact, format_number, reconcile, Error, MetricKind, RawPrediction, Result, Timeline,
};

#[derive(Parser)]
#[command(name = "engagement-core", about = "Engagement range, timeline and revision diff tool")]
struct Cli {
    /// TOML config file (defaults to ENGAGEMENT_CONFIG_PATH or config/engagement.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a prediction payload into per-metric ranges
    Ranges(RangesArgs),
    /// Spread a cumulative band across the day
    Timeline(TimelineArgs),
    /// Show what a revision changed
    Diff(DiffArgs),
    /// Ranges plus the timeline for one metric
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
struct RangesArgs {
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    followers: u64,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct TimelineArgs {
    #[arg(long, requires = "high", conflicts_with = "file")]
    low: Option<u64>,
    #[arg(long, requires = "low", conflicts_with = "file")]
    high: Option<u64>,
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, default_value = "likes")]
    metric: String,
    #[arg(long, default_value_t = 1000)]
    followers: u64,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct DiffArgs {
    #[arg(long)]
    original: String,
    #[arg(long)]
    revised: Option<String>,
    /// Segment index to revert; may be repeated
    #[arg(long)]
    revert: Vec<usize>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    followers: u64,
    #[arg(long, default_value = "likes")]
    metric: String,
    #[arg(long)]
    json: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            file: None,
            followers: 1000,
            metric: "likes".to_string(),
            json: false,
        }
    }
}

fn main() {
    load_dotenv();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, _) = EngagementConfig::load(cli.config)?;
    let command = cli.command.unwrap_or(Command::Report(ReportArgs::default()));

    match command {
        Command::Ranges(args) => run_ranges(args, &config),
        Command::Timeline(args) => run_timeline(args, &config),
        Command::Diff(args) => run_diff(args),
        Command::Report(args) => run_report(args, &config),
    }
}

fn run_ranges(args: RangesArgs, config: &EngagementConfig) -> Result<()> {
    let raw = read_prediction(args.file.as_deref())?;
    let normalized = normalizer(config).normalize_detailed(&raw, args.followers);
    let report = RangeReport::from_normalized(&normalized, args.followers);

    if args.json {
        return print_json(&report);
    }
    print_ranges(&report);
    Ok(())
}

fn run_timeline(args: TimelineArgs, config: &EngagementConfig) -> Result<()> {
    let report = match (args.low, args.high) {
        (Some(low), Some(high)) => {
            let timeline = Timeline::from_totals(low, high, &config.curve);
            TimelineReport::new(None, low, high, timeline)
        }
        _ => {
            let metric = parse_metric(&args.metric)?;
            let raw = read_prediction(args.file.as_deref())?;
            let range = normalizer(config).normalize(&raw, args.followers).get(metric);
            let timeline = Timeline::for_range(&range, &config.curve);
            TimelineReport::new(Some(metric), range.low, range.high, timeline)
        }
    };

    if args.json {
        return print_json(&report);
    }
    print_timeline(&report);
    Ok(())
}

fn run_diff(args: DiffArgs) -> Result<()> {
    let revised = match args.revised {
        Some(revised) => revised,
        None => read_stdin("missing revised text: pass --revised or pipe stdin")?
            .trim_end_matches(['\n', '\r'])
            .to_string(),
    };

    let mut segments = reconcile(&args.original, &revised);
    for index in args.revert {
        if index >= segments.len() {
            return Err(Error::InvalidArgument(format!(
                "segment index {} out of range (0-{})",
                index,
                segments.len().saturating_sub(1)
            )));
        }
        segments = revert(&segments, index);
    }
    let report = DiffReport::from_segments(segments);

    if args.json {
        return print_json(&report);
    }

    for (index, segment) in report.segments.iter().enumerate() {
        if segment.is_revised {
            println!(
                "[{}] {:?} (was {:?})",
                index,
                segment.text,
                segment.original_text.as_deref().unwrap_or_default()
            );
        }
    }
    println!("Revised segments: {}", report.revised_count);
    println!("Text: {}", report.text);
    Ok(())
}

fn run_report(args: ReportArgs, config: &EngagementConfig) -> Result<()> {
    let metric = parse_metric(&args.metric)?;
    let raw = read_prediction(args.file.as_deref())?;
    let normalized = normalizer(config).normalize_detailed(&raw, args.followers);
    let range = normalized.ranges.get(metric);
    let timeline = Timeline::for_range(&range, &config.curve);
    let report = DashboardReport {
        ranges: RangeReport::from_normalized(&normalized, args.followers),
        timeline: TimelineReport::new(Some(metric), range.low, range.high, timeline),
    };

    if args.json {
        return print_json(&report);
    }
    print_ranges(&report.ranges);
    println!();
    print_timeline(&report.timeline);
    Ok(())
}

fn normalizer(config: &EngagementConfig) -> RangeNormalizer {
    RangeNormalizer::new(BandEstimator::new(config.bands.clone()))
}

fn print_ranges(report: &RangeReport) {
    println!("Followers: {}", format_number(report.followers as f64));
    for metric in &report.metrics {
        let note = match metric.source {
            BandSource::Estimated => " (estimated)",
            BandSource::Upstream => "",
        };
        println!(
            "{}: {} (mid {}){}",
            metric.metric.label(),
            metric.label,
            format_number(metric.mid as f64),
            note
        );
    }
}

fn print_timeline(report: &TimelineReport) {
    let title = report
        .metric
        .map(|metric| format!("{} timeline", metric.label()))
        .unwrap_or_else(|| "Timeline".to_string());
    println!("{} (axis max {})", title, format_compact(report.axis_ceiling as f64));
    for bucket in &report.buckets {
        println!(
            "  {:>5}  low {:>8}  high {:>8}",
            bucket.label,
            format_number(bucket.low as f64),
            format_number(bucket.high as f64)
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_metric(value: &str) -> Result<MetricKind> {
    MetricKind::from_str(value)
        .ok_or_else(|| Error::InvalidArgument(format!("invalid metric: {}", value)))
}

fn read_prediction(path: Option<&Path>) -> Result<RawPrediction> {
    let payload = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => read_stdin("missing prediction payload: pass --file or pipe stdin")?,
    };
    Ok(RawPrediction::from_json(&payload)?)
}

fn read_stdin(missing: &str) -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(Error::InvalidArgument(missing.to_string()));
    }
    Ok(buffer)
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
