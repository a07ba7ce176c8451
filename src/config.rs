//! Run configuration: the vault file, sheet selection and CLI verbosity.

use crate::constants::{DEFAULT_SHEET_NAME, SHEETS_SCOPE};
use crate::git::{self, GitLogger};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// On-disk configuration document.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub credential_file_path: PathBuf,
    pub spreadsheet_id: String,
    #[serde(default)]
    pub sheet_name: Option<String>,
}

impl Vault {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let vault: Vault = serde_json::from_str(text)?;
        if vault.spreadsheet_id.trim().is_empty() {
            anyhow::bail!("spreadsheetId is empty");
        }
        Ok(vault)
    }
}

/// Everything a run needs, built once in `main` and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub credential_file: PathBuf,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub scope: &'static str,
    pub verbosity: Verbosity,
}

impl RunConfig {
    /// Combines the vault with CLI overrides. A `--sheet` flag wins over
    /// `sheetName` in the file, which wins over the default tab.
    #[must_use]
    pub fn new(vault: Vault, sheet_override: Option<String>, verbosity: Verbosity) -> Self {
        let sheet_name = sheet_override
            .or(vault.sheet_name)
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        Self {
            credential_file: vault.credential_file_path,
            spreadsheet_id: vault.spreadsheet_id,
            sheet_name,
            scope: SHEETS_SCOPE,
            verbosity,
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Echo git commands only in verbose mode.
    #[must_use]
    pub fn git_logger(&self) -> GitLogger {
        if self.is_verbose() {
            git::verbose_logger
        } else {
            git::no_op_logger
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Default `log` filter for this verbosity; `RUST_LOG` still overrides it.
    #[must_use]
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}
