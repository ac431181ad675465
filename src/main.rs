use anyhow::Result;
use clap::{Parser, Subcommand};

use teller_cli::cli::{dispatch, run_shell, Commands, Context};
use teller_cli::config::{Settings, TellerPaths, UnderfundedPolicy};
use teller_cli::models::AccountNumberSequence;
use teller_cli::storage::{init::seed_sample_data, Storage};

#[derive(Parser)]
#[command(
    name = "teller",
    author = "Kaylee Beyene",
    version,
    about = "Terminal bank teller: customers, checking and investment accounts",
    long_about = "teller-cli manages bank customers and their checking or investment \
                  accounts. Data lives in memory for the lifetime of the process, so \
                  use the interactive shell (the default) to work across commands."
)]
struct Cli {
    /// Start without the sample customers and accounts
    #[arg(long, global = true, env = "TELLER_NO_SEED")]
    no_seed: bool,

    /// Discard accounts whose opening deposit is refused
    #[arg(long, global = true, env = "TELLER_CANCEL_UNDERFUNDED")]
    cancel_underfunded: bool,

    #[command(subcommand)]
    command: Option<TopLevel>,
}

#[derive(Subcommand)]
enum TopLevel {
    /// Start the interactive shell (default)
    Shell,

    #[command(flatten)]
    Run(Commands),
}

fn main() -> Result<()> {
    teller_cli::init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TellerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    if cli.no_seed {
        settings.seed_sample_data = false;
    }
    if cli.cancel_underfunded {
        settings.underfunded_policy = UnderfundedPolicy::Cancel;
    }

    // Initialize storage
    let storage = Storage::with_sequence(AccountNumberSequence::starting_at(
        settings.first_account_number,
    ));
    if settings.seed_sample_data {
        let added = seed_sample_data(&storage)?;
        tracing::debug!(added, "sample data seeded");
    }

    let ctx = Context {
        storage: &storage,
        settings: &settings,
        paths: &paths,
    };

    match cli.command {
        None | Some(TopLevel::Shell) => run_shell(&ctx)?,
        Some(TopLevel::Run(cmd)) => dispatch(&ctx, cmd)?,
    }

    Ok(())
}
