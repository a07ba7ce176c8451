//! Row processing: read the repository list, check each path, write the
//! status column back in one batch.

use crate::constants::{MIN_ROW_FIELDS, PATH_COLUMN};
use crate::sheet::{SheetLayout, SheetStore, sheet_row};
use crate::status::RepoStatus;
use anyhow::Context;
use std::fmt;
use std::path::Path;

/// Result for one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStatus {
    /// The row had fewer than the required number of cells.
    Incomplete,
    Checked(RepoStatus),
}

impl RowStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Incomplete => "⚠️ Incomplete row",
            RowStatus::Checked(status) => status.label(),
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress notifications emitted while rows are processed.
pub trait SyncCallbacks {
    /// Called once with the number of rows read, before any row is checked.
    fn on_rows_loaded(&self, _count: usize) {}

    /// Called before the checker runs for a complete row.
    fn on_row_start(&self, _index: usize, _path: &str) {}

    fn on_row_complete(&self, index: usize, status: RowStatus);
}

/// Outcome of a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// One entry per input row, in input order.
    pub statuses: Vec<RowStatus>,
    /// Range written, or `None` when the sheet had no rows.
    pub written_range: Option<String>,
}

impl SyncReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    #[must_use]
    pub fn count(&self, status: RowStatus) -> usize {
        self.statuses.iter().filter(|s| **s == status).count()
    }
}

/// Maps every row to a status, invoking `check` only for complete rows.
pub fn collect_statuses<F, C>(rows: &[Vec<String>], mut check: F, callbacks: &C) -> Vec<RowStatus>
where
    F: FnMut(&Path) -> RepoStatus,
    C: SyncCallbacks + ?Sized,
{
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let status = if row.len() < MIN_ROW_FIELDS {
                log::warn!("Skipping incomplete row {}: {:?}", sheet_row(index), row);
                RowStatus::Incomplete
            } else {
                let path = &row[PATH_COLUMN];
                callbacks.on_row_start(index, path);
                let status = check(Path::new(path));
                log::info!("{}: {}", path, status);
                RowStatus::Checked(status)
            };
            callbacks.on_row_complete(index, status);
            status
        })
        .collect()
}

/// Reads all rows, checks each one, and writes the full status column back.
///
/// An empty sheet produces no write. Store errors are returned as-is and are
/// fatal for the run; per-row problems only ever show up as a status.
pub fn sync_statuses<S, F, C>(
    store: &S,
    layout: &SheetLayout,
    check: F,
    callbacks: &C,
) -> anyhow::Result<SyncReport>
where
    S: SheetStore + ?Sized,
    F: FnMut(&Path) -> RepoStatus,
    C: SyncCallbacks + ?Sized,
{
    let read_range = layout.read_range();
    let rows = store
        .read_rows(&read_range)
        .with_context(|| format!("Failed to read {}", read_range))?;

    if rows.is_empty() {
        log::info!("No rows in {}", read_range);
        return Ok(SyncReport {
            statuses: Vec::new(),
            written_range: None,
        });
    }

    callbacks.on_rows_loaded(rows.len());
    let statuses = collect_statuses(&rows, check, callbacks);

    let write_range = layout.write_range(statuses.len());
    let labels: Vec<String> = statuses.iter().map(|s| s.label().to_string()).collect();
    store
        .write_column(&write_range, &labels)
        .with_context(|| format!("Failed to write {}", write_range))?;

    Ok(SyncReport {
        statuses,
        written_range: Some(write_range),
    })
}
