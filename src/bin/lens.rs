//! Lens CLI - Command-line interface for Classlens
//!
//! Commands:
//! - analyze: Aggregate an activity log into summaries, breakdown, and series
//! - validate: Check an activity log for malformed lines
//! - schema: Print the expected input format

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use classlens::loader::scan_log;
use classlens::report::report_from_views;
use classlens::types::{BehaviorBreakdown, EngagementPoint, StudentSummary};
use classlens::{breakdown, engagement_over_time, parse_log, summarize, CLASSLENS_VERSION};

/// Lens - Classroom activity-log aggregation engine
#[derive(Parser)]
#[command(name = "lens")]
#[command(version = CLASSLENS_VERSION)]
#[command(about = "Aggregate classroom activity logs into engagement views", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate an activity log into summaries, breakdown, and series
    Analyze {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Engagement series bucket width in seconds
        #[arg(long, default_value = "60")]
        interval: u32,

        /// Output format (defaults to text on a TTY, json otherwise)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Check an activity log for malformed lines
    Validate {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expected input format
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), LensCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            interval,
            format,
        } => cmd_analyze(&input, interval, format),
        Commands::Validate { input, json } => cmd_validate(&input, json),
        Commands::Schema { json } => cmd_schema(json),
    }
}

#[derive(serde::Serialize)]
struct AnalysisOutput {
    summaries: Vec<StudentSummary>,
    breakdown: BehaviorBreakdown,
    series: Vec<EngagementPoint>,
    report: classlens::ClassReport,
}

fn cmd_analyze(
    input: &PathBuf,
    interval: u32,
    format: Option<OutputFormat>,
) -> Result<(), LensCliError> {
    let text = read_input(input)?;
    let records = parse_log(&text);

    let summaries = summarize(&records);
    let counts = breakdown(&records);
    let series = engagement_over_time(&records, interval)?;
    let report = report_from_views(&records, &summaries, &series);

    let format = format.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdout) {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    });

    let output = AnalysisOutput {
        summaries,
        breakdown: counts,
        series,
        report,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&output)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print_analysis(&output),
    }

    Ok(())
}

fn print_analysis(output: &AnalysisOutput) {
    println!("Student Engagement");
    println!("==================");
    for s in &output.summaries {
        println!(
            "  Student {:>3}: {:>3}% engaged  ({} min observed, {} min attentive, avg confidence {:.2})",
            s.student_id, s.engagement_pct, s.total_minutes, s.attentive_minutes, s.avg_confidence
        );
    }

    println!("\nBehavior Breakdown");
    println!("==================");
    for (label, count) in output.breakdown.rows() {
        println!("  {:<20} {}", label, count);
    }

    println!("\nEngagement Over Time");
    println!("====================");
    for point in &output.series {
        println!(
            "  {}  {:>3}%  ({}/{} frames)",
            point.bucket, point.attentive_pct, point.attentive_frames, point.total_frames
        );
    }

    let report = &output.report;
    println!("\nClass Report");
    println!("============");
    println!("  Students observed:  {}", report.student_count);
    println!("  Total records:      {}", report.total_records);
    println!("  Class engagement:   {:.1}%", report.class_engagement_pct);
    if report.low_engagement_alert {
        println!("  ALERT: class engagement is below 60%");
    }
    if !report.intervention_needed.is_empty() {
        println!("  Needs intervention: {:?}", report.intervention_needed);
    }
    if !report.frequent_sleepers.is_empty() {
        println!("  Frequent sleepers:  {:?}", report.frequent_sleepers);
    }
    for bucket in &report.low_engagement_buckets {
        println!(
            "  Low engagement at {} ({}%)",
            bucket.bucket, bucket.attentive_pct
        );
    }
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    malformed_lines: usize,
    issues: Vec<classlens::loader::LineIssue>,
}

fn cmd_validate(input: &PathBuf, json: bool) -> Result<(), LensCliError> {
    let text = read_input(input)?;
    let scan = scan_log(&text);

    let report = ValidationReport {
        total_records: scan.records.len(),
        malformed_lines: scan.issues.len(),
        issues: scan.issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Parsed records:  {}", report.total_records);
        println!("Malformed lines: {}", report.malformed_lines);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!("  - Line {}: {}", issue.line, issue.reason);
            }
        }
    }

    if report.malformed_lines > 0 {
        Err(LensCliError::ValidationFailed(report.malformed_lines))
    } else {
        Ok(())
    }
}

fn cmd_schema(json: bool) -> Result<(), LensCliError> {
    if json {
        let schema = serde_json::json!({
            "format": "csv",
            "header": "timestamp,studentId,activity,confidence",
            "columns": [
                { "name": "timestamp", "type": "ISO-8601 datetime" },
                { "name": "studentId", "type": "non-negative integer" },
                { "name": "activity", "type": "free-text label" },
                { "name": "confidence", "type": "float, conventionally [0,1]" }
            ],
            "attentive_label": "Studying/Attentive",
            "recognized_inattentive": ["Sleeping", "Talking in Class", "*Phone*"]
        });
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!("Input Schema");
        println!();
        println!("UTF-8 CSV with a mandatory header line, then one observation per line:");
        println!();
        println!("  timestamp,studentId,activity,confidence");
        println!("  2024-01-01T09:00:00.000Z,3,Studying/Attentive,0.93");
        println!("  2024-01-01T09:00:01.000Z,3,Sleeping,0.81");
        println!();
        println!("The sole attentive label is \"Studying/Attentive\".");
        println!("Recognized inattentive labels: \"Sleeping\", \"Talking in Class\",");
        println!("and anything containing \"Phone\". Other labels count as");
        println!("inattentive but uncategorized.");
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, LensCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

// Error types

#[derive(Debug)]
enum LensCliError {
    Io(io::Error),
    Analytics(classlens::AnalyticsError),
    Json(serde_json::Error),
    ValidationFailed(usize),
}

impl From<io::Error> for LensCliError {
    fn from(e: io::Error) -> Self {
        LensCliError::Io(e)
    }
}

impl From<classlens::AnalyticsError> for LensCliError {
    fn from(e: classlens::AnalyticsError) -> Self {
        LensCliError::Analytics(e)
    }
}

impl From<serde_json::Error> for LensCliError {
    fn from(e: serde_json::Error) -> Self {
        LensCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<LensCliError> for CliError {
    fn from(e: LensCliError) -> Self {
        match e {
            LensCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            LensCliError::Analytics(e) => CliError {
                code: "ANALYTICS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'lens schema' for the expected input format".to_string()),
            },
            LensCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            LensCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} lines failed validation", count),
                hint: Some("Fix the reported lines and retry".to_string()),
            },
        }
    }
}
