use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    DEFAULT_PAGE_SIZE, FavoriteSnapshot, FilterCriteria, ListError, PageWindow, PokemonId,
    PokemonSummary, SortOrder, TypeMatch,
};
use crate::infra::app_config::AppConfig;

use super::view;

/// Engine tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub page_size: u32,
    /// Issue `LoadMore` when an active filter leaves the view empty.
    pub fill_filtered_results: bool,
    pub type_match: TypeMatch,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fill_filtered_results: false,
            type_match: TypeMatch::Any,
        }
    }
}

impl From<&AppConfig> for ListConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            fill_filtered_results: config.fill_filtered_results,
            type_match: config.type_match,
        }
    }
}

/// Which kind of page fetch is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlightFetch {
    pub request_id: u64,
    pub kind: FetchKind,
}

/// Per-id optimistic favorite change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingToggle {
    /// Sent to the store, not yet answered.
    Requested { previous: bool, optimistic: bool },
    /// Store accepted the change; held until a snapshot at `version` lands.
    Confirmed { value: bool, version: u64 },
}

impl PendingToggle {
    pub fn value(&self) -> bool {
        match self {
            Self::Requested { optimistic, .. } => *optimistic,
            Self::Confirmed { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub config: ListConfig,
    /// Fetched items in arrival order. Never filtered or sorted in place.
    pub collection: Vec<PokemonSummary>,
    pub(super) seen: BTreeSet<PokemonId>,
    pub window: PageWindow,
    /// Set when a page came back empty.
    pub exhausted: bool,
    /// True once an initial load succeeded in the current session.
    pub loaded: bool,
    pub favorites: FavoriteSnapshot,
    pub pending: BTreeMap<PokemonId, PendingToggle>,
    pub filter: FilterCriteria,
    pub sort: SortOrder,
    pub in_flight: Option<InFlightFetch>,
    pub(super) next_request_id: u64,
    /// Transient, dismissible failure annotation.
    pub error: Option<ListError>,
}

impl ListState {
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            collection: Vec::new(),
            seen: BTreeSet::new(),
            window: PageWindow::new(config.page_size),
            exhausted: false,
            loaded: false,
            favorites: FavoriteSnapshot::default(),
            pending: BTreeMap::new(),
            filter: FilterCriteria::default(),
            sort: SortOrder::default(),
            in_flight: None,
            next_request_id: 0,
            error: None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_fetching_kind(&self, kind: FetchKind) -> bool {
        self.in_flight.is_some_and(|fetch| fetch.kind == kind)
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted && self.window.has_more()
    }

    /// A toggle stays pending until the store snapshot reflecting it is applied.
    pub fn is_toggle_pending(&self, id: PokemonId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Favorite flag as the user should see it right now.
    pub fn is_favorite(&self, id: PokemonId) -> bool {
        match self.pending.get(&id) {
            Some(pending) => pending.value(),
            None => self.favorites.contains(id),
        }
    }

    /// Collection with the favorite overlay applied, filtered and sorted.
    pub fn render(&self) -> Vec<PokemonSummary> {
        let overlaid: Vec<PokemonSummary> = self
            .collection
            .iter()
            .map(|item| PokemonSummary {
                is_favorite: self.is_favorite(item.id),
                ..item.clone()
            })
            .collect();
        let filtered = view::filter(&overlaid, &self.filter, self.config.type_match);
        view::sort(filtered, self.sort)
    }

    /// Sorted distinct type tags across the fetched collection.
    pub fn available_types(&self) -> Vec<String> {
        self.collection
            .iter()
            .flat_map(|item| item.types.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub(super) fn next_request(&mut self, kind: FetchKind) -> u64 {
        self.next_request_id += 1;
        self.in_flight = Some(InFlightFetch {
            request_id: self.next_request_id,
            kind,
        });
        self.next_request_id
    }

    /// Append items not seen before; returns how many were added.
    pub(super) fn append(&mut self, items: Vec<PokemonSummary>) -> usize {
        let before = self.collection.len();
        for item in items {
            if self.seen.insert(item.id) {
                self.collection.push(item);
            }
        }
        self.collection.len() - before
    }

    pub fn screen(&self) -> ScreenState {
        if self.collection.is_empty() {
            if self.is_fetching_kind(FetchKind::Initial) {
                return ScreenState::Loading;
            }
            if let Some(err) = self.error.as_ref().filter(|_| !self.loaded) {
                return ScreenState::Error {
                    message: err.to_string(),
                };
            }
            if self.loaded {
                return ScreenState::Empty {
                    error: self.error.as_ref().map(ToString::to_string),
                };
            }
            return ScreenState::Loading;
        }

        ScreenState::Success {
            items: self.render(),
            has_more: self.has_more(),
            is_loading_more: self.is_fetching_kind(FetchKind::More),
            error: self.error.as_ref().map(ToString::to_string),
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

/// What the list screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Loading,
    /// The source has no items at all. `error` holds a transient toggle failure.
    Empty { error: Option<String> },
    Success {
        items: Vec<PokemonSummary>,
        has_more: bool,
        is_loading_more: bool,
        error: Option<String>,
    },
    /// Nothing could be loaded.
    Error { message: String },
}
