//! Remote Pokémon source.

mod client;
pub mod dto;

pub use client::PokeApiClient;

use crate::domain::{FetchError, Page, PokemonDetail, PokemonId};
use async_trait::async_trait;

/// Paginated, read-only access to the remote catalogue.
///
/// Implementations fail loudly: a page that could not be fetched is an error,
/// never a silently truncated `Page`.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Page, FetchError>;
    async fn fetch_detail(&self, id: PokemonId) -> Result<PokemonDetail, FetchError>;
}
