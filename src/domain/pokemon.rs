use serde::{Deserialize, Serialize};

/// Stable, 1-based identifier assigned by the remote source.
pub type PokemonId = u32;

const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Type tag used when the remote source cannot resolve one.
pub const FALLBACK_TYPE: &str = "normal";

/// Sprite URL for a Pokémon, derived from its id alone.
pub fn sprite_url(id: PokemonId) -> String {
    format!("{SPRITE_BASE_URL}/{id}.png")
}

/// Capitalizes the first character of a remote resource name (`pikachu` -> `Pikachu`).
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One entry of the paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: PokemonId,
    pub name: String,
    pub image_url: String,
    /// Ordered type tags, usually one or two.
    pub types: Vec<String>,
    /// Overlay computed from the favorite set at render time.
    #[serde(default)]
    pub is_favorite: bool,
}

impl PokemonSummary {
    pub fn new(id: PokemonId, name: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: sprite_url(id),
            types,
            is_favorite: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

/// Full record shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: PokemonId,
    pub name: String,
    pub image_url: String,
    pub types: Vec<String>,
    /// Decimetres, as reported by the API.
    pub height: u32,
    /// Hectograms, as reported by the API.
    pub weight: u32,
    pub stats: Vec<Stat>,
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl PokemonDetail {
    pub fn summary(&self) -> PokemonSummary {
        PokemonSummary {
            id: self.id,
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            types: self.types.clone(),
            is_favorite: self.is_favorite,
        }
    }
}

/// One page of the remote listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub items: Vec<PokemonSummary>,
    pub total_count: u32,
    pub next_page_token: Option<String>,
}
