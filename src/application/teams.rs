//! Team use cases: named groups of up to six Pokémon.

use crate::domain::{
    MAX_TEAM_SIZE, PokemonId, PokemonSummary, PokemonTeam, TeamError, TeamPokemon,
};
use crate::infra::db::{AddMemberOutcome, TeamRepository};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeSet;

/// Fixed-width timestamps so `updated_at` sorts correctly as text.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub struct TeamService {
    repo: TeamRepository,
}

impl TeamService {
    pub fn new(repo: TeamRepository) -> Self {
        Self { repo }
    }

    pub fn create_team(
        &self,
        name: &str,
        description: &str,
        pokemons: &[PokemonSummary],
    ) -> Result<PokemonTeam, TeamError> {
        let name = validate_name(name)?;
        if pokemons.len() > MAX_TEAM_SIZE {
            return Err(TeamError::TeamFull);
        }
        let mut seen = BTreeSet::new();
        for pokemon in pokemons {
            if !seen.insert(pokemon.id) {
                return Err(TeamError::DuplicatePokemon(pokemon.id));
            }
        }

        let timestamp = now();
        let team = PokemonTeam {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: description.trim().to_string(),
            pokemons: pokemons
                .iter()
                .enumerate()
                .map(|(slot, summary)| TeamPokemon {
                    order: slot as u32,
                    ..TeamPokemon::from(summary)
                })
                .collect(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        self.repo.save(&team)?;
        log::info!("Created team '{}' ({})", team.name, team.id);
        Ok(team)
    }

    pub fn get_team(&self, team_id: &str) -> Result<Option<PokemonTeam>, TeamError> {
        Ok(self.repo.find_by_id(team_id)?)
    }

    /// All teams, most recently updated first.
    pub fn list_teams(&self) -> Result<Vec<PokemonTeam>, TeamError> {
        Ok(self.repo.find_all()?)
    }

    pub fn rename_team(
        &self,
        team_id: &str,
        name: &str,
        description: &str,
    ) -> Result<PokemonTeam, TeamError> {
        let name = validate_name(name)?;
        let mut team = self.require(team_id)?;
        team.name = name;
        team.description = description.trim().to_string();
        team.updated_at = now();
        self.repo.save(&team)?;
        log::info!("Renamed team {} to '{}'", team.id, team.name);
        Ok(team)
    }

    /// Returns false when no such team existed.
    pub fn delete_team(&self, team_id: &str) -> Result<bool, TeamError> {
        let deleted = self.repo.delete(team_id)? > 0;
        if deleted {
            log::info!("Deleted team {}", team_id);
        }
        Ok(deleted)
    }

    /// Append a Pokémon in the next free slot.
    pub fn add_pokemon(
        &self,
        team_id: &str,
        pokemon: &PokemonSummary,
    ) -> Result<PokemonTeam, TeamError> {
        self.require(team_id)?;
        let member = TeamPokemon::from(pokemon);
        match self
            .repo
            .add_member(team_id, &member, MAX_TEAM_SIZE, &now())?
        {
            AddMemberOutcome::Added { order } => {
                log::info!("Added #{} to team {} at slot {}", pokemon.id, team_id, order);
            }
            AddMemberOutcome::AlreadyMember => {
                return Err(TeamError::DuplicatePokemon(pokemon.id));
            }
            AddMemberOutcome::TeamFull => return Err(TeamError::TeamFull),
        }
        self.require(team_id)
    }

    /// Returns false when the Pokémon was not in the team.
    pub fn remove_pokemon(&self, team_id: &str, pokemon_id: PokemonId) -> Result<bool, TeamError> {
        self.require(team_id)?;
        let removed = self.repo.remove_member(team_id, pokemon_id, &now())? > 0;
        if removed {
            log::info!("Removed #{} from team {}", pokemon_id, team_id);
        }
        Ok(removed)
    }

    /// Set the display order; `ordered_ids` must list every member exactly once.
    pub fn reorder(
        &self,
        team_id: &str,
        ordered_ids: &[PokemonId],
    ) -> Result<PokemonTeam, TeamError> {
        let team = self.require(team_id)?;
        let current: BTreeSet<PokemonId> = team.pokemons.iter().map(|p| p.id).collect();
        let requested: BTreeSet<PokemonId> = ordered_ids.iter().copied().collect();
        if requested.len() != ordered_ids.len() || requested != current {
            return Err(TeamError::InvalidOrder);
        }

        self.repo.update_orders(team_id, ordered_ids, &now())?;
        self.require(team_id)
    }

    pub fn team_size(&self, team_id: &str) -> Result<usize, TeamError> {
        self.require(team_id)?;
        Ok(self.repo.count_members(team_id)?)
    }

    fn require(&self, team_id: &str) -> Result<PokemonTeam, TeamError> {
        self.repo
            .find_by_id(team_id)?
            .ok_or_else(|| TeamError::NotFound(team_id.to_string()))
    }
}

fn validate_name(name: &str) -> Result<String, TeamError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TeamError::InvalidName);
    }
    Ok(name.to_string())
}
