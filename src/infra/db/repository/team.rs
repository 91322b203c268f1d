use super::DbConn;
use crate::domain::{PokemonId, PokemonTeam, TeamPokemon};
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};

/// Result of appending a member under the team's capacity limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMemberOutcome {
    /// Stored in the returned slot.
    Added { order: u32 },
    AlreadyMember,
    TeamFull,
}

/// Repository for teams and their members.
pub struct TeamRepository {
    conn: DbConn,
}

impl TeamRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Insert or update a team and replace its member list.
    pub fn save(&self, team: &PokemonTeam) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO pokemon_teams (id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
            (
                &team.id,
                &team.name,
                &team.description,
                &team.created_at,
                &team.updated_at,
            ),
        )?;

        tx.execute("DELETE FROM team_pokemons WHERE team_id = ?1", [&team.id])?;
        for member in &team.pokemons {
            insert_member(&tx, &team.id, member)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn find_by_id(&self, team_id: &str) -> Result<Option<PokemonTeam>> {
        let conn = self.conn.lock().unwrap();
        let team = conn
            .query_row(
                "SELECT id, name, description, created_at, updated_at FROM pokemon_teams WHERE id = ?1",
                [team_id],
                |row| {
                    Ok(PokemonTeam {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        pokemons: Vec::new(),
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        match team {
            Some(mut team) => {
                team.pokemons = members_for(&conn, &team.id)?;
                Ok(Some(team))
            }
            None => Ok(None),
        }
    }

    /// All teams, most recently updated first.
    pub fn find_all(&self) -> Result<Vec<PokemonTeam>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, created_at, updated_at FROM pokemon_teams ORDER BY updated_at DESC, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PokemonTeam {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                pokemons: Vec::new(),
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?;

        let mut teams = Vec::new();
        for row in rows {
            let mut team = row?;
            team.pokemons = members_for(&conn, &team.id)?;
            teams.push(team);
        }
        Ok(teams)
    }

    pub fn delete(&self, team_id: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM pokemon_teams WHERE id = ?1", [team_id])?;
        Ok(affected)
    }

    /// Append `member` in the next free slot unless it is already present or
    /// the team holds `capacity` members. `member.order` is ignored.
    pub fn add_member(
        &self,
        team_id: &str,
        member: &TeamPokemon,
        capacity: usize,
        updated_at: &str,
    ) -> Result<AddMemberOutcome> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let present: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM team_pokemons WHERE team_id = ?1 AND pokemon_id = ?2)",
            (team_id, member.id),
            |row| row.get(0),
        )?;
        if present {
            return Ok(AddMemberOutcome::AlreadyMember);
        }
        let count = member_count(&tx, team_id)?;
        if count >= capacity {
            return Ok(AddMemberOutcome::TeamFull);
        }

        let order = count as u32;
        insert_member(&tx, team_id, &TeamPokemon { order, ..member.clone() })?;
        touch(&tx, team_id, updated_at)?;
        tx.commit()?;
        Ok(AddMemberOutcome::Added { order })
    }

    /// Remove a member and close the gap in slot orders.
    pub fn remove_member(
        &self,
        team_id: &str,
        pokemon_id: PokemonId,
        updated_at: &str,
    ) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM team_pokemons WHERE team_id = ?1 AND pokemon_id = ?2",
            (team_id, pokemon_id),
        )?;
        if removed > 0 {
            let remaining = members_for(&tx, team_id)?;
            for (slot, member) in remaining.iter().enumerate() {
                set_order(&tx, team_id, member.id, slot as u32)?;
            }
            touch(&tx, team_id, updated_at)?;
        }
        tx.commit()?;
        Ok(removed)
    }

    /// Assign `order = position` for each id in `ordered_ids`.
    pub fn update_orders(
        &self,
        team_id: &str,
        ordered_ids: &[PokemonId],
        updated_at: &str,
    ) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        for (slot, pokemon_id) in ordered_ids.iter().enumerate() {
            set_order(&tx, team_id, *pokemon_id, slot as u32)?;
        }
        touch(&tx, team_id, updated_at)?;
        tx.commit()?;
        Ok(())
    }

    pub fn count_members(&self, team_id: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        member_count(&conn, team_id)
    }
}

fn member_count(conn: &Connection, team_id: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM team_pokemons WHERE team_id = ?1",
        [team_id],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn insert_member(conn: &Connection, team_id: &str, member: &TeamPokemon) -> Result<()> {
    let types_json = serde_json::to_string(&member.types)?;
    conn.execute(
        r#"
        INSERT OR REPLACE INTO team_pokemons (team_id, pokemon_id, name, image_url, types, slot_order)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        (
            team_id,
            member.id,
            &member.name,
            &member.image_url,
            &types_json,
            member.order,
        ),
    )?;
    Ok(())
}

fn members_for(conn: &Connection, team_id: &str) -> Result<Vec<TeamPokemon>> {
    let mut stmt = conn.prepare(
        "SELECT pokemon_id, name, image_url, types, slot_order FROM team_pokemons WHERE team_id = ?1 ORDER BY slot_order, pokemon_id",
    )?;
    let rows = stmt.query_map([team_id], |row| {
        let types_json: String = row.get(3)?;
        Ok(TeamPokemon {
            id: row.get(0)?,
            name: row.get(1)?,
            image_url: row.get(2)?,
            types: serde_json::from_str(&types_json).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err))
            })?,
            order: row.get(4)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn set_order(conn: &Connection, team_id: &str, pokemon_id: PokemonId, order: u32) -> Result<()> {
    conn.execute(
        "UPDATE team_pokemons SET slot_order = ?1 WHERE team_id = ?2 AND pokemon_id = ?3",
        (order, team_id, pokemon_id),
    )?;
    Ok(())
}

fn touch(conn: &Connection, team_id: &str, updated_at: &str) -> Result<()> {
    conn.execute(
        "UPDATE pokemon_teams SET updated_at = ?1 WHERE id = ?2",
        (updated_at, team_id),
    )?;
    Ok(())
}
