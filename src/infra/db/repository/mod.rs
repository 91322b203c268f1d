//! Repository implementations for data access in pokedeck.
//!
//! Provides database operations for favorites and teams.

mod favorite;
mod team;

pub use favorite::FavoriteRepository;
pub use team::{AddMemberOutcome, TeamRepository};

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub(super) type DbConn = Arc<Mutex<Connection>>;
