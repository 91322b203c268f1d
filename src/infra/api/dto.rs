//! Wire types for the PokeAPI v2 JSON responses.

use crate::domain::{Ability, PokemonDetail, PokemonId, Stat, display_name, sprite_url};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /pokemon?offset=&limit=`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonListResponse {
    pub count: u32,
    pub next: Option<String>,
    pub results: Vec<NamedResource>,
}

impl PokemonListResponse {
    /// Pair each result with its id, falling back to the list position when
    /// the resource URL does not end in a numeric id.
    pub fn entries(&self, offset: u32) -> Vec<(PokemonId, String)> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| {
                let id = id_from_resource_url(&result.url).unwrap_or(offset + index as u32 + 1);
                (id, display_name(&result.name))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilityEntry {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub kind: NamedResource,
}

/// `GET /pokemon/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetailResponse {
    pub id: PokemonId,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

impl PokemonDetailResponse {
    /// Type names ordered by slot.
    pub fn type_names(&self) -> Vec<String> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.kind.name.clone()).collect()
    }

    pub fn into_detail(self) -> PokemonDetail {
        let types = self.type_names();
        let image_url = self
            .sprites
            .front_default
            .unwrap_or_else(|| sprite_url(self.id));

        PokemonDetail {
            id: self.id,
            name: display_name(&self.name),
            image_url,
            types,
            height: self.height,
            weight: self.weight,
            stats: self
                .stats
                .into_iter()
                .map(|entry| Stat {
                    name: entry.stat.name,
                    value: entry.base_stat,
                })
                .collect(),
            abilities: self
                .abilities
                .into_iter()
                .map(|entry| Ability {
                    name: entry.ability.name,
                    is_hidden: entry.is_hidden,
                })
                .collect(),
            moves: self.moves.into_iter().map(|entry| entry.kind.name).collect(),
            is_favorite: false,
        }
    }
}

/// Extract the trailing numeric id of a resource URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
pub fn id_from_resource_url(url: &str) -> Option<PokemonId> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}
