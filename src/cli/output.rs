use colored::Colorize;

use crate::core::results::{RunSummary, StageOutcome};

/// Everything here writes to stderr: stdout belongs to the keys.
pub struct OutputFormatter;

impl OutputFormatter {
    pub fn print_banner() {
        eprintln!("{}", "=".repeat(60).bright_cyan());
        eprintln!("{}", "  magpie - Shodan API key hunter".bright_cyan().bold());
        eprintln!("{}", "=".repeat(60).bright_cyan());
    }

    pub fn print_ethical_warning() {
        eprintln!("{}", "ETHICAL USE ONLY".yellow().bold());
        eprintln!("This tool is for security research and responsible disclosure only.");
        eprintln!("Report discovered keys to their owners; never use them.");
        eprintln!();
    }

    pub fn print_error(message: &str) {
        eprintln!("{} {}", "error:".bright_red().bold(), message.red());
    }

    pub fn print_summary(summary: &RunSummary) {
        let stats = &summary.stats;
        let elapsed_ms = (summary.finished_at - summary.started_at).num_milliseconds();

        eprintln!();
        eprintln!("{}", "=".repeat(60).bright_cyan());
        eprintln!("{}", "  Run Summary".bright_cyan().bold());
        eprintln!("{}", "=".repeat(60).bright_cyan());
        eprintln!();
        eprintln!(
            "  urls from search:    {}",
            stats.urls_emitted.to_string().bright_white()
        );
        eprintln!(
            "  files fetched:       {} ({} errors)",
            stats.files_fetched.to_string().bright_white(),
            stats.fetch_errors.to_string().bright_red()
        );
        eprintln!(
            "  unique keys printed: {} ({} duplicates suppressed)",
            stats.keys_printed.to_string().bright_green(),
            stats.duplicate_keys.to_string().bright_black()
        );

        if stats.keys_checked > 0 {
            eprintln!(
                "  keys checked:        {} ({} valid, {} invalid, {} errors)",
                stats.keys_checked.to_string().bright_white(),
                stats.keys_valid.to_string().bright_green(),
                stats.keys_invalid.to_string().bright_red(),
                stats.verification_errors.to_string().bright_yellow()
            );
        } else if stats.keys_unverified > 0 {
            eprintln!(
                "  unverified keys:     {} (run with --validate to check them)",
                stats.keys_unverified.to_string().bright_white()
            );
        }

        eprintln!();
        for report in &summary.reports {
            match &report.outcome {
                StageOutcome::Completed => {
                    eprintln!("  {} {}", "ok".bright_green(), report.stage);
                }
                StageOutcome::Failed { reason } => {
                    eprintln!(
                        "  {} {}: {}",
                        "failed".bright_red().bold(),
                        report.stage,
                        reason
                    );
                }
            }
        }

        eprintln!();
        eprintln!("  elapsed: {}ms", elapsed_ms.to_string().bright_white());

        if stats.keys_valid > 0 {
            eprintln!();
            eprintln!(
                "{}",
                "VALID KEYS FOUND - RESPONSIBLE DISCLOSURE REQUIRED"
                    .yellow()
                    .bold()
            );
            eprintln!("Report them to the repository owners and to Shodan.");
        }

        eprintln!("{}", "=".repeat(60).bright_cyan());
    }
}
