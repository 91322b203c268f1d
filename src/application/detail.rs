use crate::application::favorites::FavoriteStore;
use crate::domain::{FavoriteError, PokemonDetail, PokemonId, ToggleOutcome};
use crate::infra::api::PokemonSource;
use std::sync::Arc;

/// What the detail screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Success(PokemonDetail),
    Error(String),
}

pub struct DetailService {
    source: Arc<dyn PokemonSource>,
    favorites: Arc<dyn FavoriteStore>,
}

impl DetailService {
    pub fn new(source: Arc<dyn PokemonSource>, favorites: Arc<dyn FavoriteStore>) -> Self {
        Self { source, favorites }
    }

    /// Fetch one Pokémon and overlay its favorite flag.
    pub async fn load(&self, id: PokemonId) -> DetailState {
        let mut detail = match self.source.fetch_detail(id).await {
            Ok(detail) => detail,
            Err(err) => {
                log::warn!("Failed to load detail for #{}: {}", id, err);
                return DetailState::Error(err.to_string());
            }
        };

        match self.favorites.is_favorite(id).await {
            Ok(is_favorite) => detail.is_favorite = is_favorite,
            Err(err) => log::warn!("Favorite lookup for #{} failed: {}", id, err),
        }
        DetailState::Success(detail)
    }

    pub async fn toggle_favorite(&self, id: PokemonId) -> Result<ToggleOutcome, FavoriteError> {
        self.favorites.toggle(id).await
    }
}
