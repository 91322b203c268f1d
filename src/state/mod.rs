use crate::application::list::{ListConfig, ListController};
use crate::application::{DetailService, FavoriteStore, SqliteFavoriteStore, TeamService};
use crate::domain::ListError;
use crate::infra::api::{PokeApiClient, PokemonSource};
use crate::infra::app_config::AppConfig;
use crate::infra::db::Database;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Wiring shared by every front end: one database, one favorite store and
/// one remote source per process.
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<RwLock<AppConfig>>,
    pub source: Arc<dyn PokemonSource>,
    favorites: Arc<SqliteFavoriteStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db = match &config.db_path {
            Some(path) => Database::open_at(path.clone())?,
            None => Database::open()?,
        };
        let source = PokeApiClient::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::with_parts(db, config, Arc::new(source)))
    }

    pub fn with_parts(db: Database, config: AppConfig, source: Arc<dyn PokemonSource>) -> Self {
        let favorites = Arc::new(SqliteFavoriteStore::new(db.favorite_repo()));
        Self {
            db: Arc::new(db),
            config: Arc::new(RwLock::new(config)),
            source,
            favorites,
        }
    }

    pub fn favorites(&self) -> Arc<dyn FavoriteStore> {
        self.favorites.clone()
    }

    pub fn teams(&self) -> TeamService {
        TeamService::new(self.db.team_repo())
    }

    pub fn detail(&self) -> DetailService {
        DetailService::new(self.source.clone(), self.favorites())
    }

    pub async fn list_controller(&self) -> Result<ListController, ListError> {
        let config = ListConfig::from(&*self.config.read());
        ListController::new(self.source.clone(), self.favorites(), config).await
    }
}
