//! ems — command line front end for the employee management backend
//!
//! - Login / signup / password reset, session kept in a local file
//! - List, search, add, edit and delete employees

mod cli;
mod commands;
mod logger;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.log_level.as_deref(), cli.log_dir.as_deref());

    match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("✖ {e:#}");
            ExitCode::FAILURE
        }
    }
}
