use super::pokemon::PokemonId;
use std::collections::BTreeSet;

pub type FavoriteSet = BTreeSet<PokemonId>;

/// Versioned copy of the persisted favorite set.
///
/// The store bumps `version` on every persisted change, so consumers can tell
/// a stale notification from a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoriteSnapshot {
    pub version: u64,
    pub ids: FavoriteSet,
}

impl FavoriteSnapshot {
    pub fn contains(&self, id: PokemonId) -> bool {
        self.ids.contains(&id)
    }
}

/// Result of a persisted favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub id: PokemonId,
    pub is_favorite: bool,
    /// Store version at which this change became visible.
    pub version: u64,
}
