use crate::db::SessionDb;
use crate::error::StoreError;
use semantle_engine::Session;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Serializes all mutating operations against one channel while letting
/// different channels proceed fully in parallel.
///
/// Each channel owns an async mutex. The guard is taken before the session
/// is read and dropped only after the updated session is durably written, so
/// the lookup await inside a guess cannot interleave with another command
/// for the same channel.
pub struct Coordinator<D> {
    db: D,
    channels: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl<D: SessionDb> Coordinator<D> {
    pub fn new(db: D) -> Self {
        Self {
            db,
            channels: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, channel: &str) -> Arc<AsyncMutex<()>> {
        self.channels
            .lock()
            .expect("channel map mutex poisoned")
            .entry(channel.to_string())
            .or_default()
            .clone()
    }

    /// Run `f` against the channel's session under its exclusive guard and
    /// persist the result.
    ///
    /// When the channel has no stored session, `seed` produces a fresh one
    /// (drawing a target word and fetching its story stats), which is
    /// persisted before `f` runs. `f` receives the session by value and
    /// returns the state to commit; if `seed` or `f` fails, the stored
    /// session keeps its pre-call value.
    pub async fn with_session<T, E, S, SFut, F, FFut>(
        &self,
        channel: &str,
        seed: S,
        f: F,
    ) -> std::result::Result<T, E>
    where
        E: From<StoreError>,
        S: FnOnce() -> SFut,
        SFut: Future<Output = std::result::Result<Session, E>>,
        F: FnOnce(Session) -> FFut,
        FFut: Future<Output = std::result::Result<(Session, T), E>>,
    {
        let gate = self.gate(channel);
        let _guard = gate.lock().await;

        let current = match self.db.get(channel).await.map_err(E::from)? {
            Some(session) => session,
            None => {
                let fresh = seed().await?;
                self.db.put(channel, &fresh).await.map_err(E::from)?;
                log::info!("channel '{channel}': started a new round");
                fresh
            }
        };

        let (updated, out) = f(current).await?;
        self.db.put(channel, &updated).await.map_err(E::from)?;
        Ok(out)
    }

    /// Snapshot the channel's session, seeding one first when the channel is
    /// empty.
    pub async fn get_or_create<E, S, SFut>(
        &self,
        channel: &str,
        seed: S,
    ) -> std::result::Result<Session, E>
    where
        E: From<StoreError>,
        S: FnOnce() -> SFut,
        SFut: Future<Output = std::result::Result<Session, E>>,
    {
        self.with_session(channel, seed, |session| async move {
            let snapshot = session.clone();
            Ok((session, snapshot))
        })
        .await
    }

    /// Atomically remove and return the channel's session, leaving the
    /// channel empty so the next command seeds a fresh round.
    pub async fn take(&self, channel: &str) -> std::result::Result<Option<Session>, StoreError> {
        let gate = self.gate(channel);
        let _guard = gate.lock().await;

        let old = self.db.get(channel).await?;
        if old.is_some() {
            self.db.delete(channel).await?;
            log::info!("channel '{channel}': round discarded");
        }
        Ok(old)
    }

    /// Delete the channel's stored session.
    pub async fn reset(&self, channel: &str) -> std::result::Result<(), StoreError> {
        let gate = self.gate(channel);
        let _guard = gate.lock().await;
        self.db.delete(channel).await
    }
}
