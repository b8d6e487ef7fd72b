pub mod account;
pub mod session;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rust_portal")]
#[command(about = "Platform Portal account CLI", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "portal.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and show the platform dashboard
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new standard account with access to all platforms
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Must equal --password when given
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Account management
    Accounts {
        #[command(subcommand)]
        cmd: account::AccountCommands,
    },
    /// List the available platforms
    Platforms,
}
