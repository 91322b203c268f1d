//! Domain error types for pokedeck.
//!
//! Infrastructure code reports `anyhow` errors; the application layer wraps
//! them into these enums so callers can react to the failure kind.

use super::pokemon::PokemonId;
use super::team::MAX_TEAM_SIZE;
use thiserror::Error;

/// Errors raised by the remote Pokémon source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Errors raised by the favorite store.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("Favorite storage failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Errors raised by team operations.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("Team name cannot be blank")]
    InvalidName,

    #[error("A team can hold at most {} Pokémon", MAX_TEAM_SIZE)]
    TeamFull,

    #[error("Pokémon #{0} is already in this team")]
    DuplicatePokemon(PokemonId),

    #[error("Reorder must list every team member exactly once")]
    InvalidOrder,

    #[error("Team storage failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Errors surfaced by the list engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("Could not load Pokémon: {0}")]
    NetworkFailure(#[from] FetchError),

    #[error("Could not save favorite: {0}")]
    PersistenceFailure(String),

    #[error("Favorite change for #{0} is already in progress")]
    ToggleInProgress(PokemonId),
}

impl From<FavoriteError> for ListError {
    fn from(err: FavoriteError) -> Self {
        ListError::PersistenceFailure(err.to_string())
    }
}
