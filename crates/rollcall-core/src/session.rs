//! Session Store: the bearer token and the derived "authenticated teacher" flag.
//!
//! The token survives restarts through a [`TokenStore`]. Loading a token never
//! authenticates the session by itself; only a confirmed verification or a
//! successful login does. Storage failures are logged and swallowed: a slot
//! that cannot be read is treated as empty.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Fixed key the token is stored under.
pub const TOKEN_KEY: &str = "authToken";

/// Durable slot holding at most one token.
pub trait TokenStore {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the slot cannot be written.
    fn save(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty slot is not an error.
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be removed.
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

/// Token slot backed by `<home>/session.json`, written with 0600 permissions.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default session path.
    pub fn at_default_path() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        let file: SessionFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        Ok(file.auth_token.filter(|token| !token.trim().is_empty()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = SessionFile {
            auth_token: Some(token.to_string()),
        };
        let contents = serde_json::to_string_pretty(&file).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut handle = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            handle
                .write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session {}", self.path.display())),
        }
    }
}

/// Process-local token slot (tests and `--ephemeral` runs).
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Box<T> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, token: &str) -> Result<()> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Snapshot of the session for readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub authenticated: bool,
    pub display_name: Option<String>,
}

/// Sole owner of [`Session`] state and the durable token slot.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
    session: Session,
}

impl<S: TokenStore> SessionStore<S> {
    /// Creates an empty, unauthenticated store. Call [`initialize`](Self::initialize)
    /// to pick up a persisted token.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: Session::default(),
        }
    }

    /// Loads a persisted token if present. Does not authenticate.
    pub fn initialize(&mut self) {
        let token = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable session slot");
                None
            }
        };
        tracing::debug!(has_token = token.is_some(), "session initialized");
        self.session = Session {
            token,
            authenticated: false,
            display_name: None,
        };
    }

    /// Records a successful login and persists the token.
    pub fn login(&mut self, token: String, display_name: String) {
        if let Err(e) = self.store.save(&token) {
            tracing::warn!(error = %format!("{e:#}"), "failed to persist session token");
        }
        self.session = Session {
            token: Some(token),
            authenticated: true,
            display_name: Some(display_name),
        };
    }

    /// Clears the token and display name, in memory and durably.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %format!("{e:#}"), "failed to clear session token");
        }
        self.session = Session::default();
    }

    /// Marks the held token as confirmed valid by the verification endpoint.
    ///
    /// Without a token there is nothing to confirm and the session stays
    /// unauthenticated.
    pub fn confirm(&mut self, display_name: String) {
        if self.session.token.is_some() {
            self.session.authenticated = true;
            self.session.display_name = Some(display_name);
        }
    }

    /// Drops a token the server refused to confirm.
    pub fn invalidate(&mut self) {
        self.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.session.display_name.as_deref()
    }

    pub fn snapshot(&self) -> Session {
        self.session.clone()
    }
}
