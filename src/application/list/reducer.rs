use crate::domain::{FavoriteSnapshot, FetchError, ListError, Page, PokemonId, ToggleOutcome};

use super::action::{Action, AsyncAction, ListAction};
use super::command::Command;
use super::state::{FetchKind, ListState, PendingToggle};

pub fn reduce(state: &mut ListState, action: Action) -> Vec<Command> {
    match action {
        Action::List(action) => reduce_list(state, action),
        Action::Async(action) => reduce_async(state, action),
    }
}

fn reduce_list(state: &mut ListState, action: ListAction) -> Vec<Command> {
    match action {
        ListAction::LoadInitial => {
            if state.is_fetching_kind(FetchKind::Initial) {
                log::debug!("Initial load already in flight, ignoring");
                return Vec::new();
            }
            start_initial(state)
        }
        ListAction::Refresh => start_initial(state),
        ListAction::LoadMore => load_more(state),
        ListAction::ApplyFilter(criteria) => {
            state.filter = criteria;
            fill_if_empty(state)
        }
        ListAction::SetSearchText(text) => {
            state.filter.search_text = text;
            fill_if_empty(state)
        }
        ListAction::ToggleType(kind) => {
            let kind = kind.trim().to_lowercase();
            if !state.filter.selected_types.remove(&kind) {
                state.filter.selected_types.insert(kind);
            }
            fill_if_empty(state)
        }
        ListAction::SetFavoritesOnly(enabled) => {
            state.filter.favorites_only = enabled;
            fill_if_empty(state)
        }
        ListAction::ClearFilters => {
            state.filter = Default::default();
            Vec::new()
        }
        ListAction::ApplySort(order) => {
            state.sort = order;
            Vec::new()
        }
        ListAction::ToggleFavorite(id) => toggle_favorite(state, id),
        ListAction::DismissError => {
            state.error = None;
            Vec::new()
        }
    }
}

fn reduce_async(state: &mut ListState, action: AsyncAction) -> Vec<Command> {
    match action {
        AsyncAction::PageLoaded { request_id, result } => page_loaded(state, request_id, result),
        AsyncAction::FavoriteToggled { id, result } => {
            favorite_toggled(state, id, result);
            Vec::new()
        }
        AsyncAction::FavoritesChanged(snapshot) => {
            favorites_changed(state, snapshot);
            fill_if_empty(state)
        }
    }
}

/// Reset the session and fetch the first page, superseding any outstanding fetch.
fn start_initial(state: &mut ListState) -> Vec<Command> {
    state.collection.clear();
    state.seen.clear();
    state.window.reset();
    state.exhausted = false;
    state.loaded = false;
    state.error = None;

    let request_id = state.next_request(FetchKind::Initial);
    vec![Command::FetchPage {
        request_id,
        offset: 0,
        limit: state.window.limit,
    }]
}

fn load_more(state: &mut ListState) -> Vec<Command> {
    if state.is_fetching() || !state.loaded || !state.has_more() {
        return Vec::new();
    }

    let request_id = state.next_request(FetchKind::More);
    vec![Command::FetchPage {
        request_id,
        offset: state.window.offset,
        limit: state.window.limit,
    }]
}

fn page_loaded(
    state: &mut ListState,
    request_id: u64,
    result: Result<Page, FetchError>,
) -> Vec<Command> {
    let Some(fetch) = state.in_flight.filter(|f| f.request_id == request_id) else {
        log::debug!("Dropping superseded page result (request {})", request_id);
        return Vec::new();
    };
    state.in_flight = None;

    match result {
        Ok(page) => {
            let returned = page.items.len() as u32;
            if fetch.kind == FetchKind::Initial {
                state.loaded = true;
            }
            let added = state.append(page.items);
            state.window.offset += returned;
            state.window.total_count = page.total_count;
            state.exhausted = returned == 0;
            state.error = None;
            log::debug!(
                "Page {} applied: {} new, offset {}/{}",
                request_id,
                added,
                state.window.offset,
                state.window.total_count
            );
            fill_if_empty(state)
        }
        Err(err) => {
            log::warn!("Page fetch failed: {}", err);
            state.error = Some(ListError::NetworkFailure(err));
            Vec::new()
        }
    }
}

fn toggle_favorite(state: &mut ListState, id: PokemonId) -> Vec<Command> {
    if state.is_toggle_pending(id) {
        log::debug!("Favorite toggle for #{} already in progress", id);
        return Vec::new();
    }

    let previous = state.is_favorite(id);
    state.pending.insert(
        id,
        PendingToggle::Requested {
            previous,
            optimistic: !previous,
        },
    );
    vec![Command::PersistFavoriteToggle { id }]
}

fn favorite_toggled(state: &mut ListState, id: PokemonId, result: Result<ToggleOutcome, ListError>) {
    match result {
        Ok(outcome) => {
            if state.favorites.version >= outcome.version {
                state.pending.remove(&id);
            } else {
                state.pending.insert(
                    id,
                    PendingToggle::Confirmed {
                        value: outcome.is_favorite,
                        version: outcome.version,
                    },
                );
            }
        }
        Err(err) => {
            if let Some(PendingToggle::Requested { previous, .. }) = state.pending.remove(&id) {
                log::warn!("Favorite toggle for #{} failed, restoring {}: {}", id, previous, err);
            }
            state.error = Some(err);
        }
    }
}

fn favorites_changed(state: &mut ListState, snapshot: FavoriteSnapshot) {
    if snapshot.version < state.favorites.version {
        log::debug!(
            "Ignoring stale favorites v{} (have v{})",
            snapshot.version,
            state.favorites.version
        );
        return;
    }

    let version = snapshot.version;
    state.favorites = snapshot;
    state.pending.retain(|_, pending| match pending {
        PendingToggle::Confirmed { version: at, .. } => *at > version,
        PendingToggle::Requested { .. } => true,
    });
}

/// Grow the candidate pool when an active filter hides everything fetched so far.
fn fill_if_empty(state: &mut ListState) -> Vec<Command> {
    if !state.config.fill_filtered_results
        || !state.filter.is_active()
        || !state.render().is_empty()
    {
        return Vec::new();
    }
    load_more(state)
}
