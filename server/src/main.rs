use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::{error, warn};

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if dotenv_result.is_err() {
        warn!("Could not read .env file: {}", dotenv_result.unwrap_err());
    }

    let result = match args.command {
        Command::Migrate => showbill_server::cli::database_migration::run_migrations(),
        Command::CheckMigrations => {
            showbill_server::cli::database_migration::check_migration_state()
        }
        Command::Serve => showbill_server::cli::database_migration::check_migration_state()
            .and_then(|()| showbill_server::web::serve()),
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// The Showbill booking-listing web application
#[derive(Debug, Parser)]
#[clap(name = "showbill", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply all pending database schema migrations
    Migrate,
    /// Check whether the database schema is up to date, without changing it
    CheckMigrations,
    /// Serve the Showbill web application
    Serve,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
