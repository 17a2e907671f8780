//! Console reporter with colored output

use colored::Colorize;

use crate::{AnalysisReport, CategoryStatus, Finding, Grade, MetricValue, Severity};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        colored::control::set_override(false);
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a full analysis
    pub fn report(&self, report: &AnalysisReport) {
        self.print_header(report);
        self.print_composite(report);
        self.print_categories(report);

        if !report.findings.is_empty() {
            self.print_findings(report);
        }
        if self.verbose {
            self.print_metrics(report);
        }
        println!();
    }

    /// Report in quiet mode (just the composite)
    pub fn report_quiet(&self, report: &AnalysisReport) {
        let grade = self.colorize_grade(&report.grade);
        println!("{}: {:.1} ({})", report.url, report.composite, grade);
    }

    fn print_header(&self, report: &AnalysisReport) {
        println!();
        println!("{}", format!("Page Analysis: {}", report.url).bold());
        println!(
            "   Fetched: {}",
            report.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!();
    }

    fn print_composite(&self, report: &AnalysisReport) {
        let bar = self.create_score_bar(report.composite);
        let grade = self.colorize_grade(&report.grade);
        println!("   Composite: {} {}", bar, grade.bold());
        println!();
    }

    fn print_categories(&self, report: &AnalysisReport) {
        println!("   {}", "Category Breakdown:".bold());
        for category in &report.categories {
            match &category.status {
                CategoryStatus::Computed { score } => {
                    let bar = self.create_mini_bar(*score);
                    let score_str = format!("{:>5.1}", score);
                    let colored_score = if *score >= 80.0 {
                        score_str.green()
                    } else if *score >= 60.0 {
                        score_str.yellow()
                    } else {
                        score_str.red()
                    };
                    println!(
                        "   {} {} {} (weight {:.0}%)",
                        bar,
                        colored_score,
                        category.category,
                        category.weight * 100.0
                    );
                }
                CategoryStatus::Unavailable { reason } => {
                    println!(
                        "   {} {} {}",
                        "[----------]".dimmed(),
                        "unavailable".red(),
                        format!("{} ({})", category.category, reason).dimmed()
                    );
                }
            }
        }
        println!();
    }

    fn print_findings(&self, report: &AnalysisReport) {
        println!("   {}", "Findings:".bold());

        let by_severity = |severity: Severity| {
            report
                .findings
                .iter()
                .filter(move |f| f.severity == severity)
        };

        for finding in by_severity(Severity::Error) {
            self.print_finding(finding);
        }
        for finding in by_severity(Severity::Warning) {
            self.print_finding(finding);
        }

        // Only show info findings in verbose mode or when there are few
        let infos: Vec<&Finding> = by_severity(Severity::Info).collect();
        if self.verbose || report.findings.len() <= 5 {
            for finding in infos {
                self.print_finding(finding);
            }
        } else if !infos.is_empty() {
            println!(
                "   {} {} additional notes (use --verbose to show)",
                "i".blue(),
                infos.len()
            );
        }

        println!();
    }

    fn print_finding(&self, finding: &Finding) {
        let icon = match finding.severity {
            Severity::Error => "x".red(),
            Severity::Warning => "!".yellow(),
            Severity::Info => "i".blue(),
        };
        println!(
            "   {} [{}] {}",
            icon,
            finding.category.to_string().dimmed(),
            finding.message
        );
    }

    fn print_metrics(&self, report: &AnalysisReport) {
        println!("   {}", "Metrics:".bold());
        for metric in &report.metrics {
            let normalized = report
                .scores
                .iter()
                .find(|s| s.metric == metric.id)
                .map(|s| format!("{:>5.1} via {}", s.score, s.curve))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "   {:<26} {:<14} -> {}",
                metric.id.to_string(),
                format_value(&metric.value),
                normalized.dimmed()
            );
        }
        println!();
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score * 20.0) / 100.0).round() as usize;
        let empty = 20usize.saturating_sub(filled);

        let bar = format!(
            "[{}{}] {:>5.1}",
            "#".repeat(filled),
            "-".repeat(empty),
            score
        );

        if self.use_colors {
            if score >= 80.0 {
                bar.green().to_string()
            } else if score >= 60.0 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: f64) -> String {
        let filled = ((score * 10.0) / 100.0).round() as usize;
        let empty = 10usize.saturating_sub(filled);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Count(n) => format!("{}", n),
        MetricValue::Ratio(r) => format!("{:.3}", r),
        MetricValue::Boolean(b) => format!("{}", b),
        MetricValue::DurationMs(ms) => format!("{:.0}ms", ms),
        MetricValue::Scale(s) => format!("{:.2}", s),
    }
}
