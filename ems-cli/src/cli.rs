//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Employee management front end
#[derive(Debug, Parser)]
#[command(name = "ems", version)]
pub struct Cli {
    /// Backend base URL (overrides EMS_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// `bearer` or `none` (overrides EMS_AUTH_MODE)
    #[arg(long, global = true)]
    pub auth_mode: Option<String>,

    /// Session file (overrides EMS_SESSION_PATH)
    #[arg(long, global = true)]
    pub session_path: Option<PathBuf>,

    /// Request timeout in seconds (overrides EMS_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Write logs to a daily rolling file in this directory
    #[arg(long, global = true, env = "EMS_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level for ems and ems_client (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "EMS_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        username: String,
        #[arg(long, env = "EMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and store the session
    Signup {
        username: String,
        #[arg(long, env = "EMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Set a new password
    ResetPassword {
        username: String,
        #[arg(long, env = "EMS_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List employees
    List {
        /// Only show employees whose name or email contains this text
        #[arg(long, short)]
        search: Option<String>,
        /// Render as a table instead of cards
        #[arg(long)]
        table: bool,
    },
    /// Show one employee as stored on the server
    Show { id: i64 },
    /// Add an employee
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },
    /// Edit an employee; omitted fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete an employee
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}
