use crate::domain::PokemonId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchPage {
        request_id: u64,
        offset: u32,
        limit: u32,
    },
    PersistFavoriteToggle {
        id: PokemonId,
    },
}
