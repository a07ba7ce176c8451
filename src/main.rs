use clap::Parser;
use repo_sheet_sync::config::{RunConfig, Vault, Verbosity};
use repo_sheet_sync::constants::DEFAULT_CONFIG_FILE;
use repo_sheet_sync::google::GoogleSheets;
use repo_sheet_sync::sheet::SheetLayout;
use repo_sheet_sync::{output, status, sync};
use std::path::PathBuf;
use std::time::Instant;

/// Check the local repositories listed in a spreadsheet against their remotes
/// and write the results back.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file with `credentialFilePath` and `spreadsheetId`
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Sheet (tab) name; overrides `sheetName` from the config file
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Only print the final count
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Echo every git command and per-row result
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let env = env_logger::Env::default().default_filter_or(verbosity.log_filter());
    env_logger::Builder::from_env(env).init();

    let vault = Vault::load(&cli.config)?;
    let config = RunConfig::new(vault, cli.sheet, verbosity);
    let sheets = GoogleSheets::connect(&config)?;
    output::print_target(&config);

    let start = Instant::now();
    let progress = output::RowProgress::new(&config);
    let logger = config.git_logger();
    let result = sync::sync_statuses(
        &sheets,
        &SheetLayout::new(config.sheet_name.as_str()),
        |path| status::check_status(path, logger),
        &progress,
    );
    progress.finish();
    let report = result?;

    if report.is_empty() {
        output::print_no_data();
        return Ok(());
    }

    output::print_summary(&report, start.elapsed(), &config);
    Ok(())
}
