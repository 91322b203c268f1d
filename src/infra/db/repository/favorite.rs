use super::DbConn;
use crate::domain::{FavoriteSet, PokemonId};
use anyhow::Result;
use rusqlite::Connection;

/// Repository for favorite operations.
pub struct FavoriteRepository {
    conn: DbConn,
}

impl FavoriteRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub fn add(&self, pokemon_id: PokemonId) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO favorite_pokemons (pokemon_id) VALUES (?1)",
            [pokemon_id],
        )?;
        Ok(())
    }

    pub fn remove(&self, pokemon_id: PokemonId) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM favorite_pokemons WHERE pokemon_id = ?1",
            [pokemon_id],
        )?;
        Ok(affected)
    }

    pub fn contains(&self, pokemon_id: PokemonId) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM favorite_pokemons WHERE pokemon_id = ?1 LIMIT 1)",
            [pokemon_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Flip the favorite flag inside one transaction.
    ///
    /// Returns the new flag and the full set as committed. A failure to read
    /// the set rolls the flip back.
    pub fn toggle(&self, pokemon_id: PokemonId) -> Result<(bool, FavoriteSet)> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM favorite_pokemons WHERE pokemon_id = ?1",
            [pokemon_id],
        )?;
        if removed == 0 {
            tx.execute(
                "INSERT INTO favorite_pokemons (pokemon_id) VALUES (?1)",
                [pokemon_id],
            )?;
        }
        let ids = all_ids(&tx)?;
        tx.commit()?;
        Ok((removed == 0, ids))
    }

    pub fn find_all(&self) -> Result<FavoriteSet> {
        let conn = self.conn.lock().unwrap();
        all_ids(&conn)
    }
}

fn all_ids(conn: &Connection) -> Result<FavoriteSet> {
    let mut stmt = conn.prepare("SELECT pokemon_id FROM favorite_pokemons")?;
    let rows = stmt.query_map([], |row| row.get::<_, PokemonId>(0))?;

    let mut ids = FavoriteSet::new();
    for id in rows {
        ids.insert(id?);
    }
    Ok(ids)
}
