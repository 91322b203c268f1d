//! SQLite database setup and connection management for pokedeck
//! Handles database initialization, schema creation, and connection management.

use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const SCHEMA_VERSION: i32 = 1;

/// Database wrapper that manages SQLite connections
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create or open the database at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path();
        Self::open_at(path)
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        log::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    /// Get the default database path
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("POKEDECK_DB_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::app_config::app_data_dir().join("db.sqlite")
    }

    fn init(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version == 0 {
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version > SCHEMA_VERSION {
            return Err(anyhow::anyhow!(
                "Database schema version {} is newer than supported version {}",
                existing_version,
                SCHEMA_VERSION
            ));
        }

        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    pub fn favorite_repo(&self) -> crate::infra::db::repository::FavoriteRepository {
        crate::infra::db::repository::FavoriteRepository::new(self.connection())
    }

    pub fn team_repo(&self) -> crate::infra::db::repository::TeamRepository {
        crate::infra::db::repository::TeamRepository::new(self.connection())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS favorite_pokemons (
                pokemon_id INTEGER PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS pokemon_teams (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS team_pokemons (
                team_id TEXT NOT NULL,
                pokemon_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                image_url TEXT NOT NULL,
                types TEXT NOT NULL,
                slot_order INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY(team_id, pokemon_id),
                FOREIGN KEY(team_id) REFERENCES pokemon_teams(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_team_pokemons_team_id ON team_pokemons(team_id);
            "#,
        )?;
        Ok(())
    }
}
