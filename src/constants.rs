//! Application-wide constants.
//!
//! Centralized configuration values to avoid magic numbers throughout the codebase.

/// Configuration file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vault.json";

/// Sheet (tab) holding the repository list.
pub const DEFAULT_SHEET_NAME: &str = "Repos";

/// The only OAuth scope requested: read/write access to spreadsheet contents.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Token endpoint used when the service-account key does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion (Google caps it at one hour).
pub const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Input columns A..E, starting below the header row.
pub const READ_COLUMNS: (&str, &str) = ("A", "E");

/// Output column for the status labels.
pub const STATUS_COLUMN: &str = "F";

/// First data row (row 1 is the header).
pub const FIRST_DATA_ROW: usize = 2;

/// Rows shorter than this are reported as incomplete.
pub const MIN_ROW_FIELDS: usize = 5;

/// Zero-based column holding the local repository path.
pub const PATH_COLUMN: usize = 4;

/// Progress bar tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;

/// Git directory name used to detect repositories.
pub const GIT_DIR: &str = ".git";

/// Remote whose tracking branches are compared against.
pub const REMOTE_NAME: &str = "origin";

/// Suppresses the console window for child processes on Windows.
#[cfg(windows)]
pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;
