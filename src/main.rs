//! Sitegauge: page analysis CLI

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sitegauge::analyzer::AnalysisEngine;
use sitegauge::commentary::{is_ai_available, CommentaryPrompt, GeminiClient};
use sitegauge::config::{load_config, ScoringConfig};
use sitegauge::fetcher::Fetcher;
use sitegauge::reporter::{ConsoleReporter, JsonReporter};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Sitegauge: SEO, crawlability and AI-readability analyzer for web pages
#[derive(Parser, Debug)]
#[command(name = "sitegauge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to analyze
    url: String,

    /// Output the report as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Write the report as JSON to a file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Minimum composite score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (just the composite score)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (all findings and the raw metric table)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .sitegaugerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Generate qualitative commentary (calls the Gemini API when built
    /// with the ai feature and GEMINI_API_KEY is set; prints the prompt otherwise)
    #[arg(long)]
    insights: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.timeout);

    // Weight validation happens before any network traffic
    let scoring = ScoringConfig::from_config(&config)?;
    let engine = AnalysisEngine::new(scoring)?;

    let fetcher = Fetcher::new(config.timeout_secs.unwrap_or(30), config.user_agent.clone())?;
    if !args.quiet && !args.json {
        eprintln!("Fetching {} ...", args.url);
    }
    let snapshot = fetcher
        .snapshot(&args.url)
        .with_context(|| format!("Failed to fetch {}", args.url))?;

    let report = engine.analyze(&snapshot);

    if args.json {
        let reporter = if args.pretty {
            JsonReporter::new().pretty()
        } else {
            JsonReporter::new()
        };
        println!("{}", reporter.report(&report));
    } else if args.quiet {
        ConsoleReporter::new().report_quiet(&report);
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.no_color {
            reporter = reporter.without_colors();
        }
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report(&report);
    }

    if let Some(ref path) = args.output {
        let json = JsonReporter::new().pretty().report(&report);
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !args.quiet {
            eprintln!("Report saved to {}", path.display());
        }
    }

    if args.insights {
        print_insights(&report)?;
    }

    if let Some(threshold) = config.threshold {
        if report.composite < threshold {
            eprintln!(
                "{}: composite {:.1} below threshold {:.1}",
                "Failed".red().bold(),
                report.composite,
                threshold
            );
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Call Gemini when available, otherwise print the prompt for manual use.
fn print_insights(report: &sitegauge::AnalysisReport) -> Result<()> {
    if is_ai_available() {
        match GeminiClient::from_env() {
            Ok(client) => match client.commentary(report) {
                Ok(text) => {
                    println!("{}", "Commentary:".bold());
                    println!("{}", text);
                    return Ok(());
                }
                Err(e) => eprintln!("{}: {}", "AI commentary failed".yellow(), e),
            },
            Err(e) => eprintln!("{}: {}", "AI commentary unavailable".yellow(), e),
        }
    }

    println!("{}", CommentaryPrompt::new().generate(report));
    Ok(())
}
