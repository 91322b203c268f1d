//! Application layer (use-cases, policies).
//!
//! Orchestrates domain logic over the storage and remote sources without
//! depending on any presentation layer.

pub mod detail;
pub mod favorites;
pub mod list;
pub mod teams;

pub use detail::{DetailService, DetailState};
pub use favorites::{FavoriteStore, SqliteFavoriteStore};
pub use list::{ListConfig, ListController, ScreenState};
pub use teams::TeamService;
