use clap::Subcommand;
use std::io::Write;

use crate::account::{Account, AccountDirectory, Role, ALL_PLATFORMS};
use crate::error::PortalError;
use crate::platform::Platform;

pub const MSG_INVALID_LOGIN: &str = "Invalid email or password";
pub const MSG_MISSING_FIELDS: &str = "Fill in all fields";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts (digests are never shown)
    List,
    /// Create an account with an explicit role and platform list
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// admin or user
        #[arg(long, default_value = "user")]
        role: String,
        /// Comma-separated platform ids, or "all"
        #[arg(long, default_value = "all")]
        platforms: String,
    },
}

pub fn handle_account_command(
    cmd: AccountCommands,
    directory: &mut AccountDirectory,
    out: &mut impl Write,
) -> Result<(), PortalError> {
    match cmd {
        AccountCommands::List => {
            for a in directory.accounts() {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\tlast login: {}",
                    a.id,
                    a.name,
                    a.email,
                    a.role,
                    a.last_login.as_deref().unwrap_or("never")
                )?;
            }
        }
        AccountCommands::Create { name, email, password, role, platforms } => {
            let role: Role = role.parse()?;
            let platforms = platforms
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            let (_, message) = directory.register(&name, &email, &password, role, platforms);
            writeln!(out, "{}", message)?;
        }
    }
    Ok(())
}

/// Log in. Returns the account on success after printing the dashboard.
pub fn handle_login(
    directory: &mut AccountDirectory,
    email: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<Option<Account>, PortalError> {
    if email.is_empty() || password.is_empty() {
        writeln!(out, "{}", MSG_MISSING_FIELDS)?;
        return Ok(None);
    }
    match directory.authenticate(email, password)? {
        Some(account) => {
            print_dashboard(&account, out)?;
            Ok(Some(account))
        }
        None => {
            writeln!(out, "{}", MSG_INVALID_LOGIN)?;
            Ok(None)
        }
    }
}

/// Self-service registration: standard role, unrestricted scope
pub fn handle_register(
    directory: &mut AccountDirectory,
    name: &str,
    email: &str,
    password: &str,
    confirm: Option<&str>,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    if confirm.map_or(false, |c| c != password) {
        writeln!(out, "{}", MSG_PASSWORD_MISMATCH)?;
        return Ok(false);
    }
    if name.is_empty() || email.is_empty() || password.is_empty() {
        writeln!(out, "{}", MSG_MISSING_FIELDS)?;
        return Ok(false);
    }
    let (ok, message) = directory.register(
        name,
        email,
        password,
        Role::Standard,
        vec![ALL_PLATFORMS.to_string()],
    );
    writeln!(out, "{}", message)?;
    Ok(ok)
}

pub fn print_dashboard(account: &Account, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Welcome, {}!", account.name)?;
    print_platforms(out)
}

pub fn print_platforms(out: &mut impl Write) -> std::io::Result<()> {
    for p in Platform::all() {
        writeln!(out, "  {}", p)?;
    }
    Ok(())
}
