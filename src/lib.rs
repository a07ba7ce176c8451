//! Repository status auditor backed by a Google spreadsheet.
//!
//! This crate reads a list of local checkouts from a sheet and, for each one:
//! - Checks that the path is a directory holding a git repository
//! - Fetches from `origin`
//! - Compares the current branch tip with its remote-tracking branch
//!
//! and writes one status label per row back into the sheet.

pub mod config;
pub mod constants;
pub mod git;
pub mod google;
pub mod output;
pub mod sheet;
pub mod status;
pub mod sync;
