use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finance_diary::cli::run_shell;
use finance_diary::config::paths::DATA_DIR_ENV;
use finance_diary::config::{DiaryPaths, Settings};
use finance_diary::ledger::Ledger;
use finance_diary::storage::{initialize_storage, CsvStore};

#[derive(Parser)]
#[command(
    name = "diary",
    version,
    about = "Personal finance diary with CSV storage and monthly reports",
    long_about = "Finance Diary tracks named cash registers, deposits and withdrawals \
                  against a default account, and transfers between accounts. Data is \
                  kept in CSV files; run with no command to open the interactive shell."
)]
struct Cli {
    /// Base directory for settings and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data files and the default account
    Init {
        /// Starting balance of the default account
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        initial_amount: i64,
    },

    /// Open the interactive shell (the default)
    Shell,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => DiaryPaths::with_base_dir(dir),
        None => DiaryPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Init { initial_amount }) => {
            println!("Initializing Finance Diary at: {}", paths.data_dir().display());
            initialize_storage(&paths, &settings.default_account_name, initial_amount).await?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "Deposits and withdrawals go to '{}'.",
                settings.default_account_name
            );
            println!("Run 'diary' to open the shell.");
        }
        Some(Commands::Config) => {
            println!("Finance Diary Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Default account: {}", settings.default_account_name);
            println!("  Log level:       {}", settings.log_level);
            println!("  Report start:    {}", settings.report_start);
            println!("  Date format:     {}", settings.display_date_format);
            println!("  Autosave:        {}", settings.autosave_on_exit);
        }
        Some(Commands::Shell) | None => {
            let store = CsvStore::new(paths.clone());
            let mut ledger = match Ledger::load(store, &settings.default_account_name) {
                Ok(ledger) => ledger,
                Err(e) if e.is_fatal() => {
                    tracing::error!("Ledger storage needs repair: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::error!("Could not load ledger: {}", e);
                    return Err(e.into());
                }
            };

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            run_shell(&mut ledger, &settings, stdin.lock(), &mut stdout).await?;
        }
    }

    Ok(())
}
