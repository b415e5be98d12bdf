//! Session flag persistence and the authenticated/unauthenticated switch.
//!
//! The whole persisted state is one key-value pair: `isLoggedIn` = `"1"`.
//! Absence or any other value means logged out.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::form::Credentials;

/// Key the session flag is stored under.
pub const SESSION_KEY: &str = "isLoggedIn";

/// Value stored under [`SESSION_KEY`] while logged in.
pub const LOGGED_IN: &str = "1";

/// String key-value storage with single-key atomic reads and writes.
pub trait KeyValueStore {
    /// Reads a key. `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a key, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// FileStore
// ============================================================================

/// Store backed by a JSON object of strings on disk.
///
/// Every call reads the file fresh, so two processes see each other's writes.
/// Writes go to a temp file that is renamed over the original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .with_context(|| format!("Failed to read session store {}", self.path.display()))
    }

    fn parse_entries(&self, contents: &str) -> Result<BTreeMap<String, String>> {
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(contents)
            .with_context(|| format!("Failed to parse session store {}", self.path.display()))
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match self.read_raw()? {
            Some(contents) => self.parse_entries(&contents),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Reads entries for a write. A corrupt file is replaced rather than
    /// blocking the write.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>> {
        let Some(contents) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };
        match self.parse_entries(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "discarding corrupt session store");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize session store")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write session store {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.entries_for_write()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// ============================================================================
// ViewController
// ============================================================================

/// Which screen the rendering layer must show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Home,
}

/// Owns the authenticated flag and its persistence.
#[derive(Debug)]
pub struct ViewController<S> {
    store: S,
    authenticated: bool,
}

impl<S: KeyValueStore> ViewController<S> {
    /// Reads the persisted flag once and starts authenticated if it holds
    /// the logged-in value.
    ///
    /// Never fails: an unreadable store or a malformed value means logged out.
    pub fn initialize(store: S) -> Self {
        let authenticated = match store.get(SESSION_KEY) {
            Ok(value) => value.as_deref() == Some(LOGGED_IN),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "could not read session flag");
                false
            }
        };
        tracing::info!(authenticated, "session initialized");
        Self {
            store,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn view(&self) -> View {
        if self.authenticated {
            View::Home
        } else {
            View::Login
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Logs in with any credentials and persists the session flag.
    ///
    /// Credentials are not verified. The flag flips even if persisting fails.
    ///
    /// # Errors
    /// Returns an error if the session flag could not be written.
    pub fn login(&mut self, credentials: &Credentials) -> Result<()> {
        tracing::info!(email = %credentials.email, "login accepted");
        self.authenticated = true;
        self.store
            .set(SESSION_KEY, LOGGED_IN)
            .context("Failed to persist session flag")
    }

    /// Switches back to the login screen.
    ///
    /// The persisted flag is left untouched, so the next start is
    /// authenticated again.
    pub fn logout(&mut self) {
        tracing::info!("logout");
        self.authenticated = false;
    }
}
