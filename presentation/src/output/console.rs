//! Console output formatting for verdicts and evaluation reports
//!
//! The summary layout follows the plain report the evaluation scripts have
//! always printed, so existing eyeballs and grep patterns keep working.

use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use triage_application::{Classification, EvaluationReport};
use triage_domain::MetricsReport;

/// Formats classifier output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Summary printed after an evaluation run
    pub fn format_evaluation(report: &EvaluationReport, saved_to: Option<&Path>) -> String {
        let mut output = String::new();

        if let Some(path) = saved_to {
            output.push_str(&format!(
                "\n{} Results saved to {}\n",
                "Evaluation complete.".green().bold(),
                path.display()
            ));
        }

        output.push_str(&Self::format_metrics(&report.metrics));

        if !report.failures.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                format!("Skipped {} calls after errors:", report.failures.len())
                    .red()
                    .bold()
            ));
            for failure in &report.failures {
                output.push_str(&format!("  {}: {}\n", failure.id, failure.error));
            }
        }

        output
    }

    /// Accuracy, per-category rows, confidence buckets and human review
    pub fn format_metrics(metrics: &MetricsReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ({}/{})\n",
            "Overall accuracy:".cyan().bold(),
            percent(metrics.overall_accuracy, 2),
            metrics.correct,
            metrics.total
        ));
        output.push_str(&format!(
            "{} {:.2}\n",
            "Macro F1:".cyan().bold(),
            metrics.macro_f1()
        ));

        output.push_str(&Self::section_header("Per-category metrics:"));
        for (category, m) in metrics.category_metrics.iter().filter(|(_, m)| m.count > 0) {
            output.push_str(&format!(
                "{}: F1={:.2}, Precision={:.2}, Recall={:.2}, Count={}\n",
                category.bold(),
                m.f1,
                m.precision,
                m.recall,
                m.count
            ));
        }

        output.push_str(&Self::section_header("Confidence-level metrics:"));
        for (bucket, tier) in metrics.confidence_metrics.iter().filter(|(_, t)| t.count > 0) {
            let share = tier.count as f64 / metrics.total as f64;
            output.push_str(&format!(
                "{}: Accuracy={}, Count={} ({})\n",
                capitalize(bucket.as_str()),
                percent(tier.accuracy, 2),
                tier.count,
                percent(share, 1)
            ));
        }

        output.push_str(&format!(
            "\n{} {} ({})\n",
            "Calls needing human review:".yellow().bold(),
            metrics.human_review.count,
            percent(metrics.human_review.percentage, 1)
        ));

        output
    }

    /// One verdict with the opinions behind it
    pub fn format_classification(input_text: &str, classification: &Classification) -> String {
        let verdict = &classification.verdict;
        let debug = &classification.debug;
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Customer input:".cyan().bold(), input_text));

        let label = match verdict.label() {
            Some(label) => label.green().bold().to_string(),
            None => "(none)".red().to_string(),
        };
        output.push_str(&format!("{} {}\n", "Classification:".cyan().bold(), label));
        output.push_str(&format!(
            "{} {}\n",
            "Confidence:".cyan().bold(),
            verdict.confidence().map_or("unknown", |c| c.as_str())
        ));
        if verdict.needs_human() {
            output.push_str(&format!("{}\n", "This call needs human review.".yellow()));
        }

        output.push_str(&Self::section_header("Debug info:"));
        output.push_str(&format!(
            "Primary result: {}\n",
            debug.primary_label.as_deref().unwrap_or("-")
        ));
        output.push_str(&format!(
            "Backup result: {}\n",
            debug.backup_label.as_deref().unwrap_or("-")
        ));
        output.push_str(&format!(
            "Negative check: {}\n",
            debug.negative_check.map_or("-", |n| n.as_str())
        ));
        output.push_str(&format!(
            "Validation result: {}\n",
            debug
                .validation_result
                .map_or_else(|| "-".to_string(), |v| v.to_string())
        ));
        if let Some(rule) = debug.consensus_rule {
            output.push_str(&format!("{} {}\n", "Rule:".dimmed(), rule.as_str()));
        }

        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", title.cyan().bold())
    }
}

/// `0.8125` with 2 decimals -> `81.25%`
fn percent(fraction: f64, decimals: usize) -> String {
    let value = if fraction.is_finite() { fraction * 100.0 } else { 0.0 };
    format!("{:.*}%", decimals, value)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
