use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::account::Account;
use crate::clock::Clock;
use crate::error::PortalError;

/// The JSON document holding every account.
///
/// Each write replaces the whole document. There is no journal and no lock;
/// two processes writing the same file will overwrite each other.
#[derive(Debug, Clone)]
pub struct DirectoryFile {
    path: PathBuf,
    atomic_writes: bool,
}

impl DirectoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: false,
        }
    }

    /// Write through a sibling temp file and rename it over the target
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the full document. `Ok(None)` when the file does not exist.
    pub fn read(&self) -> Result<Option<Vec<Account>>, PortalError> {
        if !self.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.path)?;
        let accounts = serde_json::from_slice(&data).map_err(|e| PortalError::MalformedDirectory {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(accounts))
    }

    /// Overwrite the document with `accounts`
    pub fn write(&self, accounts: &[Account]) -> Result<(), PortalError> {
        let data = encode(accounts)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if self.atomic_writes {
            let tmp = self.sibling("tmp");
            fs::write(&tmp, &data)?;
            fs::rename(&tmp, &self.path)?;
        } else {
            fs::write(&self.path, &data)?;
        }
        debug!("Persisted {} accounts to '{}'", accounts.len(), self.path.display());
        Ok(())
    }

    /// Move an unreadable document aside as `<name>.corrupt-<stamp>`.
    /// Earlier copies are never overwritten.
    pub fn quarantine(&self, clock: &Clock) -> Result<PathBuf, PortalError> {
        let stamp = format!("corrupt-{}", clock.now().format("%Y%m%d%H%M%S"));
        let mut target = self.sibling(&stamp);
        let mut n = 1;
        while target.exists() {
            target = self.sibling(&format!("{}-{}", stamp, n));
            n += 1;
        }
        fs::rename(&self.path, &target)?;
        Ok(target)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

/// Pretty JSON, 4-space indent, non-ASCII left as-is
fn encode(accounts: &[Account]) -> Result<Vec<u8>, PortalError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    accounts.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Role;
    use chrono::{Local, TimeZone};

    fn sample() -> Vec<Account> {
        vec![Account {
            id: "USR20240101120000".to_string(),
            name: "João Conceição".to_string(),
            email: "joão@exemplo.com".to_string(),
            password_hash: crate::account::digest::hash_password("senha123"),
            role: Role::Standard,
            authorized_platforms: vec!["all".to_string()],
            created_at: "2024-01-01 12:00:00".to_string(),
            last_login: Some("2024-01-02 08:30:00".to_string()),
        }]
    }

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = DirectoryFile::new(dir.path().join("accounts.json"));
        assert!(file.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = DirectoryFile::new(dir.path().join("nested").join("accounts.json"));

        file.write(&sample()).unwrap();
        assert_eq!(file.read().unwrap(), Some(sample()));
    }

    #[test]
    fn test_document_format() {
        let dir = tempfile::tempdir().unwrap();
        let file = DirectoryFile::new(dir.path().join("accounts.json"));
        file.write(&sample()).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"id\""));
        assert!(text.contains("\"name\": \"João Conceição\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = DirectoryFile::new(dir.path().join("accounts.json")).with_atomic_writes(true);

        file.write(&sample()).unwrap();
        file.write(&[]).unwrap();

        assert_eq!(file.read().unwrap(), Some(vec![]));
        assert!(!dir.path().join("accounts.json.tmp").exists());
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = DirectoryFile::new(dir.path().join("accounts.json"));
        std::fs::write(file.path(), "{ not json").unwrap();

        match file.read() {
            Err(PortalError::MalformedDirectory { .. }) => {}
            other => panic!("expected malformed error, got {:?}", other),
        }

        let clock = Clock::fixed(Local.with_ymd_and_hms(2024, 5, 20, 14, 30, 0).unwrap());
        let moved = file.quarantine(&clock).unwrap();
        assert_eq!(moved, dir.path().join("accounts.json.corrupt-20240520143000"));
        assert!(!file.exists());

        std::fs::write(file.path(), "still not json").unwrap();
        let again = file.quarantine(&clock).unwrap();
        assert_eq!(again, dir.path().join("accounts.json.corrupt-20240520143000-1"));
        assert_eq!(std::fs::read_to_string(&moved).unwrap(), "{ not json");
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let file = DirectoryFile::new(dir.path().join("accounts.json"));
        std::fs::write(file.path(), [0xff, 0xfe, 0x5b]).unwrap();

        assert!(matches!(file.read(), Err(PortalError::MalformedDirectory { .. })));
    }
}
