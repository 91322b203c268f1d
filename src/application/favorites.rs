//! Favorite store: persisted set of favorited ids with change notifications.

use crate::domain::{FavoriteError, FavoriteSnapshot, PokemonId, ToggleOutcome};
use crate::infra::db::FavoriteRepository;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn is_favorite(&self, id: PokemonId) -> Result<bool, FavoriteError>;

    /// Flip the flag for `id` and report the persisted result.
    async fn toggle(&self, id: PokemonId) -> Result<ToggleOutcome, FavoriteError>;

    async fn all(&self) -> Result<FavoriteSnapshot, FavoriteError>;

    /// Subscribe to the favorite set. The current snapshot is delivered first,
    /// then one snapshot per persisted change, in order.
    async fn observe_all(&self) -> Result<UnboundedReceiver<FavoriteSnapshot>, FavoriteError>;
}

struct Subscribers {
    version: u64,
    senders: Vec<UnboundedSender<FavoriteSnapshot>>,
}

/// SQLite-backed favorite store.
pub struct SqliteFavoriteStore {
    repo: FavoriteRepository,
    // Held across the write so snapshots go out in commit order.
    subscribers: Mutex<Subscribers>,
}

impl SqliteFavoriteStore {
    pub fn new(repo: FavoriteRepository) -> Self {
        Self {
            repo,
            subscribers: Mutex::new(Subscribers {
                version: 0,
                senders: Vec::new(),
            }),
        }
    }

    fn snapshot(&self, version: u64) -> Result<FavoriteSnapshot, FavoriteError> {
        Ok(FavoriteSnapshot {
            version,
            ids: self.repo.find_all()?,
        })
    }
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    async fn is_favorite(&self, id: PokemonId) -> Result<bool, FavoriteError> {
        Ok(self.repo.contains(id)?)
    }

    async fn toggle(&self, id: PokemonId) -> Result<ToggleOutcome, FavoriteError> {
        let mut subscribers = self.subscribers.lock();
        let (is_favorite, ids) = self.repo.toggle(id)?;
        subscribers.version += 1;
        let version = subscribers.version;

        log::info!(
            "{} #{} (favorites v{})",
            if is_favorite { "Favorited" } else { "Unfavorited" },
            id,
            version
        );

        let snapshot = FavoriteSnapshot { version, ids };
        subscribers
            .senders
            .retain(|tx| tx.send(snapshot.clone()).is_ok());

        Ok(ToggleOutcome {
            id,
            is_favorite,
            version,
        })
    }

    async fn all(&self) -> Result<FavoriteSnapshot, FavoriteError> {
        let subscribers = self.subscribers.lock();
        self.snapshot(subscribers.version)
    }

    async fn observe_all(&self) -> Result<UnboundedReceiver<FavoriteSnapshot>, FavoriteError> {
        let mut subscribers = self.subscribers.lock();
        let (tx, rx) = unbounded_channel();
        let initial = self.snapshot(subscribers.version)?;
        // Receiver is still held, so the initial send cannot fail.
        let _ = tx.send(initial);
        subscribers.senders.push(tx);
        Ok(rx)
    }
}
