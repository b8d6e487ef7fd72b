use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

use rust_portal::account::AccountDirectory;
use rust_portal::cli::{self, Cli, Commands};
use rust_portal::clock::Clock;
use rust_portal::config::PortalConfig;
use rust_portal::error::PortalError;
use rust_portal::storage::DirectoryFile;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Start at RUST_LOG or "info" so config loading is logged, then switch
    // to the configured level when RUST_LOG is unset.
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_set = from_env.is_some();
    let (filter, reload_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PortalConfig::load_or_default(&args.config);
    if !env_set {
        if let Err(e) = reload_handle.modify(|f| *f = EnvFilter::new(&config.log_level)) {
            warn!("Could not apply log_level '{}': {}", config.log_level, e);
        }
    }
    info!("Using config '{}', directory '{}'", args.config, config.directory.path);

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli, config: &PortalConfig) -> Result<(), PortalError> {
    let file = DirectoryFile::new(&config.directory.path)
        .with_atomic_writes(config.directory.atomic_writes);
    let mut directory = AccountDirectory::load(
        file,
        Clock::system(),
        &config.bootstrap,
        config.directory.on_malformed,
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Some(Commands::Login { email, password }) => {
            cli::account::handle_login(&mut directory, &email, &password, &mut out)?;
        }
        Some(Commands::Register { name, email, password, confirm }) => {
            cli::account::handle_register(
                &mut directory,
                &name,
                &email,
                &password,
                confirm.as_deref(),
                &mut out,
            )?;
        }
        Some(Commands::Accounts { cmd }) => {
            cli::account::handle_account_command(cmd, &mut directory, &mut out)?;
        }
        Some(Commands::Platforms) => {
            cli::account::print_platforms(&mut out)?;
        }
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            cli::session::Session::new().run(&mut directory, &mut input, &mut out)?;
        }
    }
    Ok(())
}
