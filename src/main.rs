use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bilancio_cli::audit::AuditLogger;
use bilancio_cli::cli::{
    handle_file_command, handle_movement_command, FileCommands, MovementCommands, Session,
};
use bilancio_cli::config::{BilancioPaths, Settings};

/// Environment variable holding the log filter (e.g. `debug`, `bilancio_cli=info`)
const LOG_ENV: &str = "BILANCIO_LOG";

#[derive(Parser)]
#[command(
    name = "bilancio",
    version,
    about = "Income and expense ledger for the terminal",
    long_about = "Bilancio keeps a ledger of dated income and expense movements \
                  with exact decimal amounts. The ledger lives in a CSV or \
                  tab-separated text file and can be saved to and loaded from \
                  either format."
)]
struct Cli {
    /// Working ledger file (".csv" means CSV, anything else tab-separated text)
    #[arg(short, long, global = true, env = "BILANCIO_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Movement(MovementCommands),

    #[command(flatten)]
    File(FileCommands),

    /// Show recent ledger changes
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the configuration directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BilancioPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Movement(cmd)) => {
            let mut session = Session::open(&paths, settings, cli.file)?;
            handle_movement_command(&mut session, cmd)?;
        }
        Some(Commands::File(cmd)) => {
            let mut session = Session::open(&paths, settings, cli.file)?;
            handle_file_command(&mut session, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded.");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        Some(Commands::Init) => {
            println!("Initializing Bilancio at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!(
                "Working ledger: {}",
                settings.ledger(&paths, cli.file).path().display()
            );
        }
        Some(Commands::Config) => {
            let ledger = settings.ledger(&paths, cli.file);
            println!("Bilancio Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Working ledger:   {}", ledger.path().display());
            println!();
            println!("Settings:");
            println!("  Ledger format:  {}", ledger.format());
            println!("  Decode mode:    {:?}", settings.decode_mode);
            println!("  Audit enabled:  {}", settings.audit_enabled);
            println!("  Currency:       {}", settings.currency_symbol);
        }
        None => {
            println!("Bilancio - income and expense ledger");
            println!();
            println!("Run 'bilancio --help' for usage information.");
        }
    }

    Ok(())
}

/// Log to stderr so command output on stdout stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
