//! Account directory: the in-memory account list and its backing document

use tracing::{debug, info, warn};

use super::digest::hash_password;
use super::types::{Account, Role, ALL_PLATFORMS};
use crate::clock::Clock;
use crate::config::{BootstrapConfig, MalformedPolicy, DEFAULT_ADMIN_PASSWORD};
use crate::error::PortalError;
use crate::storage::DirectoryFile;

pub const MSG_CREATED: &str = "User created successfully";
pub const MSG_DUPLICATE: &str = "Email already registered";

/// Owns every account. Each mutation rewrites the whole document.
#[derive(Debug)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
    file: DirectoryFile,
    clock: Clock,
}

impl AccountDirectory {
    /// Load the directory from `file`, seeding the default administrator when
    /// the file is missing or holds no accounts.
    pub fn load(
        file: DirectoryFile,
        clock: Clock,
        bootstrap: &BootstrapConfig,
        on_malformed: MalformedPolicy,
    ) -> Result<Self, PortalError> {
        let accounts = match file.read() {
            Ok(Some(accounts)) => accounts,
            Ok(None) => Vec::new(),
            Err(PortalError::MalformedDirectory { path, reason }) => match on_malformed {
                MalformedPolicy::Fail => {
                    return Err(PortalError::MalformedDirectory { path, reason });
                }
                MalformedPolicy::Reseed => {
                    let moved = file.quarantine(&clock)?;
                    warn!(
                        "Account directory '{}' is malformed ({}); moved to '{}' and reseeding",
                        path,
                        reason,
                        moved.display()
                    );
                    Vec::new()
                }
            },
            Err(e) => return Err(e),
        };

        let mut directory = Self { accounts, file, clock };
        if directory.accounts.is_empty() {
            directory.seed_admin(bootstrap)?;
        }
        info!(
            "Loaded {} accounts from '{}'",
            directory.accounts.len(),
            directory.file.path().display()
        );
        Ok(directory)
    }

    fn seed_admin(&mut self, bootstrap: &BootstrapConfig) -> Result<(), PortalError> {
        if bootstrap.admin_password == DEFAULT_ADMIN_PASSWORD {
            warn!(
                "Seeding '{}' with the built-in default password. Change it before real use.",
                bootstrap.admin_email
            );
        }
        let admin = self.new_account(
            &bootstrap.admin_name,
            &bootstrap.admin_email,
            &bootstrap.admin_password,
            Role::Administrator,
            vec![ALL_PLATFORMS.to_string()],
        );
        info!("Created default administrator '{}'", admin.email);
        self.accounts.push(admin);
        self.persist()
    }

    /// Authenticate by email and plaintext password.
    ///
    /// Returns `Ok(None)` for an unknown email and for a wrong password alike.
    /// A match updates `last_login` and rewrites the document. If the write
    /// fails the previous `last_login` is restored.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<Option<Account>, PortalError> {
        let password_hash = hash_password(password);
        let now = self.clock.timestamp();

        let index = match self
            .accounts
            .iter()
            .position(|a| a.email == email && a.password_hash == password_hash)
        {
            Some(index) => index,
            None => {
                info!("Failed login attempt");
                return Ok(None);
            }
        };

        let previous = self.accounts[index].last_login.replace(now);
        if let Err(e) = self.persist() {
            self.accounts[index].last_login = previous;
            return Err(e);
        }
        let matched = self.accounts[index].clone();
        info!("Account '{}' logged in", matched.id);
        Ok(Some(matched))
    }

    /// Create a new account.
    ///
    /// The id comes from the clock at second granularity, so two accounts
    /// created within the same second share an id. Nothing is kept in memory
    /// when the write fails.
    pub fn create_account(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        authorized_platforms: Vec<String>,
    ) -> Result<Account, PortalError> {
        if self.find_by_email(email).is_some() {
            return Err(PortalError::DuplicateEmail(email.to_string()));
        }

        let account = self.new_account(name, email, password, role, authorized_platforms);
        self.accounts.push(account.clone());
        if let Err(e) = self.persist() {
            self.accounts.pop();
            return Err(e);
        }

        info!("Created account '{}' ({})", account.id, account.role);
        Ok(account)
    }

    /// `create_account` folded into a success flag and a user-facing message
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        authorized_platforms: Vec<String>,
    ) -> (bool, String) {
        match self.create_account(name, email, password, role, authorized_platforms) {
            Ok(_) => (true, MSG_CREATED.to_string()),
            Err(PortalError::DuplicateEmail(_)) => (false, MSG_DUPLICATE.to_string()),
            Err(e) => (false, e.to_string()),
        }
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    /// All accounts in insertion order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn new_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        authorized_platforms: Vec<String>,
    ) -> Account {
        Account {
            id: self.clock.account_id(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password),
            role,
            authorized_platforms,
            created_at: self.clock.timestamp(),
            last_login: None,
        }
    }

    fn persist(&self) -> Result<(), PortalError> {
        debug!("Rewriting account directory");
        self.file.write(&self.accounts)
    }
}
