use std::io::{BufRead, Write};
use tracing::info;

use super::account::{handle_login, handle_register, print_platforms};
use crate::account::{Account, AccountDirectory};
use crate::error::PortalError;
use crate::platform::Platform;

/// Interactive login session. Lives for one run of the menu loop.
pub struct Session {
    pub user: Option<Account>,
}

impl Session {
    pub fn new() -> Self {
        Session { user: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Account '{}' logged out", user.id);
        }
    }

    /// Menu loop. Ends on "Exit" or end of input.
    pub fn run(
        &mut self,
        directory: &mut AccountDirectory,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), PortalError> {
        writeln!(out, "\n=== Platform Portal ===")?;
        loop {
            if self.is_authenticated() {
                writeln!(out, "\n1. Platforms")?;
                writeln!(out, "2. Open Platform")?;
                writeln!(out, "3. Logout")?;
                writeln!(out, "4. Exit")?;
                let Some(choice) = prompt(input, out, "Select: ")? else { break };
                match choice.as_str() {
                    "1" => print_platforms(out)?,
                    "2" => {
                        let Some(id) = prompt(input, out, "Platform id: ")? else { break };
                        match Platform::find(&id) {
                            Some(p) => writeln!(out, "{}\n{}", p.name, p.description)?,
                            None => writeln!(out, "Unknown platform '{}'", id)?,
                        }
                    }
                    "3" => self.logout(),
                    "4" => break,
                    _ => writeln!(out, "Invalid option")?,
                }
            } else {
                writeln!(out, "\n1. Login")?;
                writeln!(out, "2. Register")?;
                writeln!(out, "3. Exit")?;
                let Some(choice) = prompt(input, out, "Select: ")? else { break };
                match choice.as_str() {
                    "1" => {
                        let Some(email) = prompt(input, out, "Email: ")? else { break };
                        let Some(password) = prompt(input, out, "Password: ")? else { break };
                        self.user = handle_login(directory, &email, &password, out)?;
                    }
                    "2" => {
                        let Some(name) = prompt(input, out, "Full name: ")? else { break };
                        let Some(email) = prompt(input, out, "Email: ")? else { break };
                        let Some(password) = prompt(input, out, "Password: ")? else { break };
                        let Some(confirm) = prompt(input, out, "Confirm password: ")? else { break };
                        handle_register(directory, &name, &email, &password, Some(&confirm), out)?;
                    }
                    "3" => break,
                    _ => writeln!(out, "Invalid option")?,
                }
            }
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// `None` at end of input
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> std::io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::config::{BootstrapConfig, MalformedPolicy};
    use crate::storage::DirectoryFile;
    use std::io::Cursor;

    fn directory(dir: &tempfile::TempDir) -> AccountDirectory {
        AccountDirectory::load(
            DirectoryFile::new(dir.path().join("accounts.json")),
            Clock::system(),
            &BootstrapConfig::default(),
            MalformedPolicy::Fail,
        )
        .unwrap()
    }

    #[test]
    fn test_register_login_logout() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = directory(&dir);
        let script = "2\nMaria Santos\nmaria@x.com\nsenha123\nsenha123\n\
                      1\nmaria@x.com\nsenha123\n\
                      2\nfinance\n\
                      3\n3\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut out = Vec::new();
        let mut session = Session::new();

        session.run(&mut directory, &mut input, &mut out).unwrap();

        assert!(!session.is_authenticated());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Welcome, Maria Santos!"));
        assert!(printed.contains("Finance System"));
        assert!(directory.find_by_email("maria@x.com").unwrap().last_login.is_some());
    }

    #[test]
    fn test_failed_login_stays_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = directory(&dir);
        let mut input = Cursor::new("1\nadmin@system.com\nwrong\n".as_bytes());
        let mut out = Vec::new();
        let mut session = Session::new();

        session.run(&mut directory, &mut input, &mut out).unwrap();

        assert!(!session.is_authenticated());
        assert!(String::from_utf8(out).unwrap().contains("Invalid email or password"));
    }

    #[test]
    fn test_end_of_input_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = directory(&dir);
        let mut input = Cursor::new("1\nadmin@system.com\nadmin123\n".as_bytes());
        let mut out = Vec::new();
        let mut session = Session::new();

        session.run(&mut directory, &mut input, &mut out).unwrap();
        assert!(session.user.as_ref().unwrap().is_admin());
    }
}
