//! Local session: the logged-in user.
//!
//! The user record lives in `<data_dir>/session.json`. [`AppState`] is loaded
//! once at start, updated by login and cleared by logout; nothing else holds
//! the current user.

use sd_common::{Error, LoginRequest, Result, User};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::api::{ApiClient, Method};

pub const SESSION_FILE: &str = "session.json";

pub const LOGIN_FAILED_MESSAGE: &str = "로그인에 실패했습니다.";
pub const CONNECTION_FAILED_MESSAGE: &str = "서버 연결에 실패했습니다.";

/// On-disk session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: User,
    /// RFC 3339 time of login.
    pub logged_in_at: String,
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no session file exists.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::SessionCorrupted {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Write through a temporary file and rename into place.
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_vec_pretty(session)?;
        let tmp_path = self
            .path
            .with_file_name(format!("{}.tmp.{}", SESSION_FILE, std::process::id()));
        {
            let mut file = std::fs::File::create(&tmp_path)?;
            file.write_all(&content)?;
            let _ = file.sync_all();
        }
        std::fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the session file. Missing is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Result of a login attempt that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    LoggedIn(User),
    /// Backend refused; the text is shown inline.
    Rejected(String),
}

/// Application-level state passed to every command.
#[derive(Debug, Clone)]
pub struct AppState {
    store: SessionStore,
    user: Option<User>,
}

impl AppState {
    /// Restore the session from disk.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let store = SessionStore::new(data_dir);
        let user = store.load()?.map(|s| s.user);
        debug!(logged_in = user.is_some(), "session restored");
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(Error::NotLoggedIn)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// `POST /api/login`. A 2xx answer stores its `user`; anything else is
    /// rejected with the backend's `message` or the fixed failure text.
    ///
    /// Transport and unreadable-body failures are returned as errors; use
    /// [`login_error_message`] for their inline text.
    pub fn login(
        &mut self,
        api: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&request)?;
        let raw = api.send_raw(Method::Post, "/api/login", &[], Some(&body))?;

        if !raw.is_success() {
            let message = raw.message().unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            info!(status = raw.status, "login rejected");
            return Ok(LoginOutcome::Rejected(message));
        }

        let user_value = raw.body.get("user").cloned().unwrap_or_default();
        let user: User = api.decode("/api/login", user_value)?;
        self.store.save(&StoredSession {
            user: user.clone(),
            logged_in_at: chrono::Utc::now().to_rfc3339(),
        })?;
        info!(username = %user.username, "logged in");
        self.user = Some(user.clone());
        Ok(LoginOutcome::LoggedIn(user))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "logged out");
        }
        Ok(())
    }
}

/// Inline text for a login that never got an answer.
pub fn login_error_message(err: &Error) -> &'static str {
    match err {
        Error::Transport { .. } | Error::Decode { .. } => CONNECTION_FAILED_MESSAGE,
        _ => LOGIN_FAILED_MESSAGE,
    }
}
