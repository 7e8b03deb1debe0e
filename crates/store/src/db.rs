use crate::error::Result;
use async_trait::async_trait;
use semantle_engine::Session;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key-value persistence for sessions, one entry per channel.
///
/// `put` must be synchronous with respect to command completion: when it
/// returns, the session is durably recorded.
#[async_trait]
pub trait SessionDb: Send + Sync {
    async fn get(&self, channel: &str) -> Result<Option<Session>>;
    async fn put(&self, channel: &str, session: &Session) -> Result<()>;
    async fn delete(&self, channel: &str) -> Result<()>;
}

/// One JSON file per channel under a data directory. Writes go through a
/// tmp file and rename, so a session file is always either the old or the
/// new state, never a torn write.
pub struct JsonDb {
    dir: PathBuf,
}

impl JsonDb {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, channel: &str) -> PathBuf {
        self.dir.join(format!("{}.json", safe_component(channel)))
    }
}

#[async_trait]
impl SessionDb for JsonDb {
    async fn get(&self, channel: &str) -> Result<Option<Session>> {
        let path = self.path_for(channel);
        let Ok(bytes) = tokio::fs::read(&path).await else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                log::warn!("Session file corrupted {}: {err}", path.display());
                Ok(None)
            }
        }
    }

    async fn put(&self, channel: &str, session: &Session) -> Result<()> {
        let path = self.path_for(channel);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec(session)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, channel: &str) -> Result<()> {
        let path = self.path_for(channel);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Channel identifiers become file names; anything outside a conservative
/// character set is replaced.
fn safe_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryDb {
    map: Mutex<HashMap<String, Session>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionDb for MemoryDb {
    async fn get(&self, channel: &str) -> Result<Option<Session>> {
        Ok(self
            .map
            .lock()
            .expect("session map mutex poisoned")
            .get(channel)
            .cloned())
    }

    async fn put(&self, channel: &str, session: &Session) -> Result<()> {
        self.map
            .lock()
            .expect("session map mutex poisoned")
            .insert(channel.to_string(), session.clone());
        Ok(())
    }

    async fn delete(&self, channel: &str) -> Result<()> {
        self.map
            .lock()
            .expect("session map mutex poisoned")
            .remove(channel);
        Ok(())
    }
}
