// ems-client/src/session.rs
// 会话存储 - 本地持久化的 token 与用户名

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientResult;
use crate::types::Page;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "jwtToken";
/// Storage key of the logged-in username
pub const USERNAME_KEY: &str = "loggedInUser";

/// Persistent string key/value storage
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&mut self, key: &str) -> ClientResult<()>;
}

/// 内存存储 (测试 / 临时会话)
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ClientResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON 文件存储
///
/// Every write rewrites the whole file. A missing file, or one that is not
/// a JSON string map, is an empty session; read errors are returned.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// 打开存储，文件不存在时为空
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring unreadable session file: {e}");
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// 确保目录存在
    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn save(&self) -> ClientResult<()> {
        if self.entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// 获取路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> ClientResult<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

// ============================================================================
// Session
// ============================================================================

/// Logged-in user as read from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: Option<String>,
}

impl Session {
    /// Read the session; the username alone decides whether one exists
    pub fn load(store: &impl SessionStore) -> Option<Self> {
        let username = store.get(USERNAME_KEY).filter(|u| !u.is_empty())?;
        Some(Self {
            username,
            token: store.get(TOKEN_KEY),
        })
    }

    /// Persist token and username after signin/signup
    pub fn persist(store: &mut impl SessionStore, token: &str, username: &str) -> ClientResult<()> {
        store.set(TOKEN_KEY, token)?;
        store.set(USERNAME_KEY, username)
    }

    /// First character of the username, uppercased
    pub fn avatar(&self) -> char {
        avatar_initial(&self.username).unwrap_or('?')
    }
}

/// Avatar letter for a username
pub fn avatar_initial(username: &str) -> Option<char> {
    username.chars().next().and_then(|c| c.to_uppercase().next())
}

/// Outcome of the dashboard session gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session present, show the dashboard
    Granted(Session),
    /// No session, go to this page instead
    Redirect(Page),
}

/// Gate the dashboard on presence of a stored username.
///
/// The token is not inspected.
pub fn check_gate(store: &impl SessionStore) -> GateDecision {
    match Session::load(store) {
        Some(session) => GateDecision::Granted(session),
        None => {
            tracing::info!("no session found, redirecting to login");
            GateDecision::Redirect(Page::Login)
        }
    }
}

/// Clear every session key and return the page to navigate to
pub fn logout(store: &mut impl SessionStore) -> ClientResult<Page> {
    store.remove(TOKEN_KEY)?;
    store.remove(USERNAME_KEY)?;
    tracing::info!("session cleared");
    Ok(Page::Login)
}
