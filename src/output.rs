//! Progress bar, colored output, and summary formatting.
//!
//! This module provides visual feedback while rows are checked and a
//! colored summary once the status column has been written.

use crate::config::RunConfig;
use crate::constants::PROGRESS_TICK_MS;
use crate::sheet::sheet_row;
use crate::status::RepoStatus;
use crate::sync::{RowStatus, SyncCallbacks, SyncReport};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Callbacks that ignore every notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl SyncCallbacks for NoOpCallbacks {
    fn on_row_complete(&self, _index: usize, _status: RowStatus) {}
}

/// Progress reporting for a sync run.
/// Uses `Option` so no bar is drawn in quiet or verbose mode.
pub struct RowProgress {
    bar: Option<ProgressBar>,
    config: RunConfig,
}

impl RowProgress {
    #[must_use]
    pub fn new(config: &RunConfig) -> Self {
        let bar = if config.is_quiet() || config.is_verbose() {
            None
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {pos}/{len} checked {spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█░"),
            );
            bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
            Some(bar)
        };

        Self {
            bar,
            config: config.clone(),
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl SyncCallbacks for RowProgress {
    fn on_rows_loaded(&self, count: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(count as u64);
        }
    }

    fn on_row_start(&self, _index: usize, path: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(path.to_string());
        }
        if self.config.is_verbose() {
            eprintln!("\n{}", format!("[{}]", path).white().bold());
        }
    }

    fn on_row_complete(&self, index: usize, status: RowStatus) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
        if self.config.is_verbose() {
            eprintln!("  row {}: {}", sheet_row(index), colorize(status));
        }
    }
}

fn colorize(status: RowStatus) -> ColoredString {
    let label = status.label();
    match status {
        RowStatus::Checked(RepoStatus::UpToDate) => label.green(),
        RowStatus::Checked(RepoStatus::OutOfDate) => label.yellow(),
        RowStatus::Checked(RepoStatus::VcsError) | RowStatus::Incomplete => label.red(),
        RowStatus::Checked(RepoStatus::NotADirectory | RepoStatus::NotARepository) => {
            label.red().dimmed()
        }
    }
}

pub fn print_target(config: &RunConfig) {
    if config.is_quiet() {
        return;
    }
    println!(
        "{} {} {}",
        "Syncing sheet:".cyan(),
        config.sheet_name.white().bold(),
        format!("({})", config.spreadsheet_id).dimmed()
    )
}

pub fn print_no_data() {
    println!("{}", "No data found.".yellow().bold())
}

pub fn print_summary(report: &SyncReport, duration: Duration, config: &RunConfig) {
    if config.is_quiet() {
        print_quiet_summary(report);
    } else {
        print_normal_summary(report, duration);
    }
}

fn print_quiet_summary(report: &SyncReport) {
    println!(
        "{}/{} repositories up to date",
        report.count(RowStatus::Checked(RepoStatus::UpToDate)),
        report.statuses.len()
    );
}

fn print_normal_summary(report: &SyncReport, duration: Duration) {
    print_section("Summary");

    for (status, count) in summary_counts(report) {
        println!("  {:>4}  {}", count, colorize(status));
    }

    if let Some(range) = &report.written_range {
        println!("\n{} {}", "Wrote".white().bold(), range.cyan());
    }
    println!(
        "{}: {} rows in {}",
        "Total".white().bold(),
        report.statuses.len(),
        format_duration(duration)
    );
}

/// Counts per status in display order, omitting statuses that never occur.
fn summary_counts(report: &SyncReport) -> Vec<(RowStatus, usize)> {
    [
        RowStatus::Checked(RepoStatus::UpToDate),
        RowStatus::Checked(RepoStatus::OutOfDate),
        RowStatus::Checked(RepoStatus::VcsError),
        RowStatus::Checked(RepoStatus::NotARepository),
        RowStatus::Checked(RepoStatus::NotADirectory),
        RowStatus::Incomplete,
    ]
    .into_iter()
    .map(|status| (status, report.count(status)))
    .filter(|(_, count)| *count > 0)
    .collect()
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}

fn print_section(title: &str) {
    let line = "=".repeat(50).cyan().dimmed();
    let padding = (50 - title.len()) / 2;
    let centered = format!("{:>width$}", title, width = padding + title.len());
    println!("\n{}\n{}\n{}\n", line, centered.cyan().bold(), line);
}
