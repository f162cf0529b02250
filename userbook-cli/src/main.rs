//! userbook CLI - runs the user record HTTP service
//!
//! - `userbook serve` starts the server once the database answers
//! - `userbook check` verifies configuration and database connectivity

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "userbook",
    author,
    version,
    about = "Collect and list user records over HTTP",
    long_about = "Serve a small signup form and JSON API backed by a Postgres users table. \
                  Configuration comes from the environment (DB_HOST, DB_USER, DB_PASSWORD, \
                  DB_NAME, PORT), optionally loaded from ./.env or ~/.userbook/.env."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Check configuration and database connectivity, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    config::load_dotenv();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Check => commands::run_check().await?,
    }
    Ok(())
}
