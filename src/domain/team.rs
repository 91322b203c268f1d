use crate::domain::{PokemonId, PokemonSummary};
use serde::{Deserialize, Serialize};

/// Unique identifier for a team (uuid v4)
pub type TeamId = String;

/// A team holds at most this many Pokémon.
pub const MAX_TEAM_SIZE: usize = 6;

/// A user-created, named group of Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonTeam {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Members sorted by `order`.
    #[serde(default)]
    pub pokemons: Vec<TeamPokemon>,
    /// Creation timestamp in RFC3339 format.
    pub created_at: String,
    /// Update timestamp in RFC3339 format.
    pub updated_at: String,
}

impl PokemonTeam {
    pub fn is_full(&self) -> bool {
        self.pokemons.len() >= MAX_TEAM_SIZE
    }

    pub fn contains(&self, pokemon_id: PokemonId) -> bool {
        self.pokemons.iter().any(|p| p.id == pokemon_id)
    }
}

/// A team slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPokemon {
    pub id: PokemonId,
    pub name: String,
    pub image_url: String,
    pub types: Vec<String>,
    /// Display position within the team, starting at 0.
    pub order: u32,
}

impl From<&PokemonSummary> for TeamPokemon {
    fn from(summary: &PokemonSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            image_url: summary.image_url.clone(),
            types: summary.types.clone(),
            order: 0,
        }
    }
}
