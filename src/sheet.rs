//! Spreadsheet store abstraction and A1 range helpers.
//!
//! The sync driver only ever talks to a [`SheetStore`]; the Google Sheets
//! client in [`crate::google`] is the production implementation.

use crate::constants::{FIRST_DATA_ROW, READ_COLUMNS, STATUS_COLUMN};

/// Tabular store holding the repository list.
pub trait SheetStore {
    /// Reads `range` as rows of cell text. Missing trailing cells shorten a row.
    fn read_rows(&self, range: &str) -> anyhow::Result<Vec<Vec<String>>>;

    /// Writes one value per row into the single-column `range`.
    fn write_column(&self, range: &str, values: &[String]) -> anyhow::Result<()>;
}

/// Sheet row number (1-based, below the header) of the zero-based data row `index`.
#[must_use]
pub fn sheet_row(index: usize) -> usize {
    FIRST_DATA_ROW + index
}

/// A1 ranges for one sheet tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    sheet_name: String,
}

impl SheetLayout {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Columns A..E from the first data row to the last populated row.
    #[must_use]
    pub fn read_range(&self) -> String {
        let (first, last) = READ_COLUMNS;
        format!(
            "{}!{}{}:{}",
            self.quoted_name(),
            first,
            FIRST_DATA_ROW,
            last
        )
    }

    /// The status column, sized to exactly `row_count` rows.
    #[must_use]
    pub fn write_range(&self, row_count: usize) -> String {
        let last_row = sheet_row(row_count.max(1) - 1);
        format!(
            "{}!{col}{}:{col}{}",
            self.quoted_name(),
            FIRST_DATA_ROW,
            last_row,
            col = STATUS_COLUMN
        )
    }

    fn quoted_name(&self) -> String {
        let plain = !self.sheet_name.is_empty()
            && self
                .sheet_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if plain {
            self.sheet_name.clone()
        } else {
            format!("'{}'", self.sheet_name.replace('\'', "''"))
        }
    }
}
