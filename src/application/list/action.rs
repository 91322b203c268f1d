use crate::domain::{
    FavoriteSnapshot, FetchError, FilterCriteria, ListError, Page, PokemonId, SortOrder,
    ToggleOutcome,
};

#[derive(Debug)]
pub enum Action {
    List(ListAction),
    Async(AsyncAction),
}

/// User intents.
#[derive(Debug, Clone)]
pub enum ListAction {
    LoadInitial,
    /// Explicit retry; always supersedes an outstanding fetch.
    Refresh,
    LoadMore,
    ApplyFilter(FilterCriteria),
    SetSearchText(String),
    ToggleType(String),
    SetFavoritesOnly(bool),
    ClearFilters,
    ApplySort(SortOrder),
    ToggleFavorite(PokemonId),
    DismissError,
}

/// Side-effect results fed back into the reducer.
#[derive(Debug)]
pub enum AsyncAction {
    PageLoaded {
        request_id: u64,
        result: Result<Page, FetchError>,
    },
    FavoriteToggled {
        id: PokemonId,
        result: Result<ToggleOutcome, ListError>,
    },
    FavoritesChanged(FavoriteSnapshot),
}

impl From<ListAction> for Action {
    fn from(action: ListAction) -> Self {
        Action::List(action)
    }
}

impl From<AsyncAction> for Action {
    fn from(action: AsyncAction) -> Self {
        Action::Async(action)
    }
}
