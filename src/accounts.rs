//! Local username/password store.
//!
//! A flat JSON object mapping usernames to password hashes, used to gate the
//! CLI. This is a convenience lock, not an authentication system: there are
//! no sessions, roles or lockouts.
//!
//! A store is an owned value with an explicit lifecycle: [`CredentialStore::load`]
//! reads the file, every mutation is written back before it returns, and the
//! value is dropped at the end of the session.
//!
//! # Hash format
//!
//! `sha256$<salt hex>$<digest hex>` where the digest is `SHA-256(salt || password)`
//! with a random 16-byte salt. Stores written by the original dashboard hold
//! bcrypt hashes (`$2a$`, `$2b$`, `$2y$`); those are verified with bcrypt and
//! left untouched. Entries in any other form are treated as legacy
//! plaintext: they are accepted once on a matching login and immediately
//! replaced with a salted hash.
//!
//! # Example
//!
//! ```no_run
//! use chatlens::accounts::CredentialStore;
//!
//! # fn main() -> chatlens::Result<()> {
//! let mut store = CredentialStore::load("users_db.json")?;
//! store.sign_up("alice", "s3cret")?;
//! store.verify("alice", "s3cret")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{AccountError, Result};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Username to password-hash map backed by a JSON file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    users: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Loads the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let users = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), users = users.len(), "loaded credential store");
        Ok(Self { path, users })
    }

    /// Path the store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no user is registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns `true` if `username` is registered.
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Registers a new user and persists the store.
    ///
    /// # Errors
    ///
    /// [`AccountError::EmptyUsername`] for a blank name,
    /// [`AccountError::UserExists`] if the name is taken, or an I/O error
    /// if the file cannot be written.
    pub fn sign_up(&mut self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername.into());
        }
        if self.users.contains_key(username) {
            return Err(AccountError::UserExists(username.to_string()).into());
        }

        self.users.insert(username.to_string(), hash_password(password));
        self.persist()?;
        info!(user = username, "account created");
        Ok(())
    }

    /// Checks a username/password pair.
    ///
    /// A matching legacy plaintext entry is re-hashed and persisted.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidCredentials`] for an unknown user or a wrong
    /// password.
    pub fn verify(&mut self, username: &str, password: &str) -> Result<()> {
        let stored = self
            .users
            .get(username.trim())
            .cloned()
            .ok_or(AccountError::InvalidCredentials)?;

        match StoredHash::parse(&stored) {
            StoredHash::Salted { salt, digest } => {
                if salted_digest(&salt, password) == digest {
                    debug!(user = username, "login ok");
                    Ok(())
                } else {
                    Err(AccountError::InvalidCredentials.into())
                }
            }
            StoredHash::Bcrypt(hash) => match bcrypt::verify(password, hash) {
                Ok(true) => {
                    debug!(user = username, "login ok (bcrypt)");
                    Ok(())
                }
                Ok(false) => Err(AccountError::InvalidCredentials.into()),
                Err(e) => {
                    warn!(user = username, error = %e, "unreadable bcrypt hash");
                    Err(AccountError::InvalidCredentials.into())
                }
            },
            StoredHash::Plaintext if stored == password => {
                self.users
                    .insert(username.trim().to_string(), hash_password(password));
                self.persist()?;
                info!(user = username, "upgraded legacy plaintext password");
                Ok(())
            }
            StoredHash::Plaintext => Err(AccountError::InvalidCredentials.into()),
        }
    }

    /// Writes the store to its file as pretty JSON.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.users)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::thread_rng().r#gen();
    format!(
        "{SCHEME}${}${}",
        hex::encode(salt),
        hex::encode(salted_digest(&salt, password))
    )
}

fn salted_digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

/// A password entry as found in the store file.
enum StoredHash<'a> {
    Salted { salt: Vec<u8>, digest: Vec<u8> },
    Bcrypt(&'a str),
    Plaintext,
}

impl<'a> StoredHash<'a> {
    fn parse(stored: &'a str) -> Self {
        if BCRYPT_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            return StoredHash::Bcrypt(stored);
        }
        Self::parse_salted(stored).unwrap_or(StoredHash::Plaintext)
    }

    fn parse_salted(stored: &str) -> Option<Self> {
        let mut parts = stored.splitn(3, '$');
        if parts.next()? != SCHEME {
            return None;
        }
        let salt = hex::decode(parts.next()?).ok()?;
        let digest = hex::decode(parts.next()?).ok()?;
        Some(StoredHash::Salted { salt, digest })
    }
}
