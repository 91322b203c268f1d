use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use super::*;
use crate::application::favorites::{FavoriteStore, SqliteFavoriteStore};
use crate::domain::{
    FavoriteError, FavoriteSnapshot, FetchError, FilterCriteria, ListError, Page, PokemonDetail,
    PokemonId, PokemonSummary, SortOrder, ToggleOutcome, TypeMatch,
};
use crate::infra::api::PokemonSource;
use crate::infra::db::Database;

fn mon(id: PokemonId, name: &str, types: &[&str]) -> PokemonSummary {
    PokemonSummary::new(id, name, types.iter().map(|t| t.to_string()).collect())
}

fn numbered(ids: std::ops::RangeInclusive<PokemonId>) -> Vec<PokemonSummary> {
    ids.map(|id| mon(id, &format!("Mon{id}"), &["normal"]))
        .collect()
}

fn page(items: Vec<PokemonSummary>, total_count: u32) -> Page {
    Page {
        items,
        total_count,
        next_page_token: None,
    }
}

fn ids(items: &[PokemonSummary]) -> Vec<PokemonId> {
    items.iter().map(|item| item.id).collect()
}

fn fetch_request(commands: &[Command]) -> (u64, u32) {
    match commands {
        [Command::FetchPage {
            request_id, offset, ..
        }] => (*request_id, *offset),
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

fn loaded(request_id: u64, result: Result<Page, FetchError>) -> Action {
    Action::Async(AsyncAction::PageLoaded { request_id, result })
}

/// State after a successful initial load of `items`.
fn state_with(items: Vec<PokemonSummary>, total_count: u32) -> ListState {
    let mut state = ListState::default();
    let commands = reduce(&mut state, ListAction::LoadInitial.into());
    let (request_id, _) = fetch_request(&commands);
    reduce(&mut state, loaded(request_id, Ok(page(items, total_count))));
    state
}

fn network_error() -> FetchError {
    FetchError::Network("connection reset".into())
}

// Reducer

#[test]
fn test_load_initial_fetches_first_page_once() {
    let mut state = ListState::default();
    assert_eq!(state.screen(), ScreenState::Loading);

    let commands = reduce(&mut state, ListAction::LoadInitial.into());
    assert_eq!(
        commands,
        vec![Command::FetchPage {
            request_id: 1,
            offset: 0,
            limit: 20,
        }]
    );
    assert!(state.is_fetching());

    let again = reduce(&mut state, ListAction::LoadInitial.into());
    assert!(again.is_empty());
    assert_eq!(state.screen(), ScreenState::Loading);
}

#[test]
fn test_pagination_scenario_45_items() {
    let mut state = state_with(numbered(1..=20), 45);
    assert_eq!(state.window.offset, 20);
    assert!(state.has_more());

    let (id, offset) = fetch_request(&reduce(&mut state, ListAction::LoadMore.into()));
    assert_eq!(offset, 20);
    reduce(&mut state, loaded(id, Ok(page(numbered(21..=40), 45))));
    assert_eq!(state.window.offset, 40);
    assert!(state.has_more());

    let (id, offset) = fetch_request(&reduce(&mut state, ListAction::LoadMore.into()));
    assert_eq!(offset, 40);
    reduce(&mut state, loaded(id, Ok(page(numbered(41..=45), 45))));
    assert_eq!(state.window.offset, 45);
    assert!(!state.has_more());
    assert_eq!(state.collection.len(), 45);

    let before = state.clone();
    assert!(reduce(&mut state, ListAction::LoadMore.into()).is_empty());
    assert_eq!(state, before);

    match state.screen() {
        ScreenState::Success {
            items, has_more, ..
        } => {
            assert_eq!(items.len(), 45);
            assert!(!has_more);
        }
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn test_load_more_while_fetching_issues_one_request() {
    let mut state = state_with(numbered(1..=20), 100);

    let mut fetches = 0;
    for _ in 0..10 {
        fetches += reduce(&mut state, ListAction::LoadMore.into()).len();
    }
    assert_eq!(fetches, 1);
    assert!(state.is_fetching_kind(FetchKind::More));
    assert_eq!(state.window.offset, 20);

    match state.screen() {
        ScreenState::Success {
            is_loading_more, ..
        } => assert!(is_loading_more),
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn test_load_more_before_first_load_is_noop() {
    let mut state = ListState::default();
    let before = state.clone();
    assert!(reduce(&mut state, ListAction::LoadMore.into()).is_empty());
    assert_eq!(state, before);
}

#[test]
fn test_superseded_results_are_dropped() {
    let mut state = ListState::default();
    let (first, _) = fetch_request(&reduce(&mut state, ListAction::LoadInitial.into()));
    let (second, _) = fetch_request(&reduce(&mut state, ListAction::Refresh.into()));
    assert_ne!(first, second);

    reduce(&mut state, loaded(first, Ok(page(numbered(1..=3), 3))));
    assert!(state.collection.is_empty());
    assert_eq!(state.in_flight.map(|f| f.request_id), Some(second));

    reduce(&mut state, loaded(second, Ok(page(numbered(1..=5), 5))));
    assert_eq!(ids(&state.collection), vec![1, 2, 3, 4, 5]);
    assert!(!state.is_fetching());
}

#[test]
fn test_load_initial_supersedes_load_more() {
    let mut state = state_with(numbered(1..=20), 45);
    let (more, _) = fetch_request(&reduce(&mut state, ListAction::LoadMore.into()));

    let (initial, offset) = fetch_request(&reduce(&mut state, ListAction::LoadInitial.into()));
    assert_eq!(offset, 0);
    assert!(state.collection.is_empty());
    assert_eq!(state.screen(), ScreenState::Loading);

    reduce(&mut state, loaded(more, Ok(page(numbered(21..=40), 45))));
    assert!(state.collection.is_empty());

    reduce(&mut state, loaded(initial, Ok(page(numbered(1..=20), 45))));
    assert_eq!(state.collection.len(), 20);
    assert_eq!(state.window.offset, 20);
}

#[test]
fn test_empty_page_stops_pagination() {
    let mut state = state_with(numbered(1..=20), 45);
    let (id, _) = fetch_request(&reduce(&mut state, ListAction::LoadMore.into()));
    reduce(&mut state, loaded(id, Ok(page(Vec::new(), 45))));

    assert!(state.window.has_more());
    assert!(!state.has_more());
    assert!(state.error.is_none());
    assert!(reduce(&mut state, ListAction::LoadMore.into()).is_empty());
}

#[test]
fn test_duplicate_ids_are_dropped_but_offset_advances() {
    let mut state = state_with(numbered(1..=3), 10);
    let (id, _) = fetch_request(&reduce(&mut state, ListAction::LoadMore.into()));
    reduce(&mut state, loaded(id, Ok(page(numbered(3..=5), 10))));

    assert_eq!(ids(&state.collection), vec![1, 2, 3, 4, 5]);
    assert_eq!(state.window.offset, 6);
}

#[test]
fn test_initial_failure_shows_error_then_refresh_recovers() {
    let mut state = ListState::default();
    let (id, _) = fetch_request(&reduce(&mut state, ListAction::LoadInitial.into()));
    reduce(&mut state, loaded(id, Err(network_error())));

    assert!(state.collection.is_empty());
    assert!(!state.is_fetching());
    match state.screen() {
        ScreenState::Error { message } => assert!(message.contains("connection reset")),
        other => panic!("unexpected screen {other:?}"),
    }

    let (id, _) = fetch_request(&reduce(&mut state, ListAction::Refresh.into()));
    assert_eq!(state.screen(), ScreenState::Loading);
    reduce(&mut state, loaded(id, Ok(page(numbered(1..=2), 2))));
    assert!(matches!(state.screen(), ScreenState::Success { error: None, .. }));
}

#[test]
fn test_load_more_failure_keeps_loaded_items() {
    let mut state = state_with(numbered(1..=20), 45);
    let (id, _) = fetch_request(&reduce(&mut state, ListAction::LoadMore.into()));
    reduce(&mut state, loaded(id, Err(network_error())));

    assert_eq!(state.collection.len(), 20);
    assert_eq!(state.window.offset, 20);
    assert!(!state.is_fetching());
    assert_eq!(
        state.error,
        Some(ListError::NetworkFailure(network_error()))
    );
    match state.screen() {
        ScreenState::Success {
            items,
            error,
            has_more,
            ..
        } => {
            assert_eq!(items.len(), 20);
            assert!(has_more);
            assert!(error.is_some());
        }
        other => panic!("unexpected screen {other:?}"),
    }

    reduce(&mut state, ListAction::DismissError.into());
    assert!(matches!(state.screen(), ScreenState::Success { error: None, .. }));
    assert_eq!(
        fetch_request(&reduce(&mut state, ListAction::LoadMore.into())).1,
        20
    );
}

#[test]
fn test_zero_items_is_empty_state() {
    let state = state_with(Vec::new(), 0);
    assert_eq!(state.screen(), ScreenState::Empty { error: None });
    assert!(!state.has_more());
}

#[test]
fn test_empty_state_keeps_toggle_failure() {
    let mut state = state_with(Vec::new(), 0);
    reduce(&mut state, ListAction::ToggleFavorite(150).into());
    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoriteToggled {
            id: 150,
            result: Err(ListError::PersistenceFailure("disk full".into())),
        }),
    );

    assert!(!state.is_favorite(150));
    match state.screen() {
        ScreenState::Empty { error: Some(message) } => assert!(message.contains("disk full")),
        other => panic!("unexpected screen {other:?}"),
    }

    reduce(&mut state, ListAction::DismissError.into());
    assert_eq!(state.screen(), ScreenState::Empty { error: None });
}

#[test]
fn test_filter_and_sort_never_touch_collection() {
    let mut state = state_with(
        vec![
            mon(6, "Charizard", &["fire", "flying"]),
            mon(7, "Squirtle", &["water"]),
            mon(4, "Charmander", &["fire"]),
        ],
        3,
    );
    let original = state.collection.clone();

    reduce(&mut state, ListAction::ToggleType("Fire".into()).into());
    reduce(&mut state, ListAction::ApplySort(SortOrder::ByNameDescending).into());
    assert_eq!(ids(&state.render()), vec![4, 6]);
    assert_eq!(state.collection, original);

    reduce(&mut state, ListAction::ClearFilters.into());
    reduce(&mut state, ListAction::ApplySort(SortOrder::ById).into());
    assert_eq!(ids(&state.render()), vec![4, 6, 7]);
    assert_eq!(state.collection, original);
}

#[test]
fn test_toggle_type_adds_and_removes() {
    let mut state = ListState::default();
    reduce(&mut state, ListAction::ToggleType(" Grass ".into()).into());
    assert_eq!(
        state.filter.selected_types,
        BTreeSet::from(["grass".to_string()])
    );
    reduce(&mut state, ListAction::ToggleType("grass".into()).into());
    assert!(state.filter.selected_types.is_empty());
}

#[test]
fn test_available_types_are_sorted_and_distinct() {
    let state = state_with(
        vec![
            mon(1, "A", &["water"]),
            mon(2, "B", &["fire", "flying"]),
            mon(3, "C", &["fire"]),
        ],
        3,
    );
    assert_eq!(state.available_types(), vec!["fire", "flying", "water"]);
}

#[test]
fn test_toggle_favorite_is_optimistic_and_reconciled() {
    let mut state = state_with(numbered(20..=30), 11);
    reduce(
        &mut state,
        ListAction::ApplyFilter(FilterCriteria::favorites()).into(),
    );
    assert!(state.render().is_empty());

    let commands = reduce(&mut state, ListAction::ToggleFavorite(25).into());
    assert_eq!(commands, vec![Command::PersistFavoriteToggle { id: 25 }]);
    assert_eq!(ids(&state.render()), vec![25]);

    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoritesChanged(FavoriteSnapshot {
            version: 1,
            ids: BTreeSet::from([25]),
        })),
    );
    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoriteToggled {
            id: 25,
            result: Ok(ToggleOutcome {
                id: 25,
                is_favorite: true,
                version: 1,
            }),
        }),
    );

    assert!(state.pending.is_empty());
    assert_eq!(ids(&state.render()), vec![25]);
    assert!(state.render()[0].is_favorite);
}

#[test]
fn test_second_toggle_while_pending_is_rejected() {
    let mut state = state_with(numbered(1..=30), 30);

    let first = reduce(&mut state, ListAction::ToggleFavorite(25).into());
    let second = reduce(&mut state, ListAction::ToggleFavorite(25).into());
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert!(state.is_favorite(25));
    assert_eq!(
        state.pending.get(&25),
        Some(&PendingToggle::Requested {
            previous: false,
            optimistic: true,
        })
    );
}

#[test]
fn test_confirmed_toggle_waits_for_matching_snapshot() {
    let mut state = state_with(numbered(1..=5), 5);
    reduce(&mut state, ListAction::ToggleFavorite(3).into());
    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoriteToggled {
            id: 3,
            result: Ok(ToggleOutcome {
                id: 3,
                is_favorite: true,
                version: 2,
            }),
        }),
    );
    assert_eq!(
        state.pending.get(&3),
        Some(&PendingToggle::Confirmed {
            value: true,
            version: 2,
        })
    );

    // Older snapshot from another writer: applied, but does not clear the toggle.
    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoritesChanged(FavoriteSnapshot {
            version: 1,
            ids: BTreeSet::from([1]),
        })),
    );
    assert!(state.is_favorite(1));
    assert!(state.is_favorite(3));
    assert!(state.is_toggle_pending(3));

    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoritesChanged(FavoriteSnapshot {
            version: 2,
            ids: BTreeSet::from([1, 3]),
        })),
    );
    assert!(state.pending.is_empty());
    assert!(state.is_favorite(3));
}

#[test]
fn test_failed_toggle_rolls_back() {
    let mut state = state_with(numbered(1..=5), 5);
    reduce(&mut state, ListAction::ToggleFavorite(2).into());
    assert!(state.is_favorite(2));

    reduce(
        &mut state,
        Action::Async(AsyncAction::FavoriteToggled {
            id: 2,
            result: Err(ListError::PersistenceFailure("disk full".into())),
        }),
    );
    assert!(!state.is_favorite(2));
    assert!(state.pending.is_empty());
    match state.screen() {
        ScreenState::Success { items, error, .. } => {
            assert_eq!(items.len(), 5);
            assert!(error.unwrap().contains("disk full"));
        }
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn test_stale_snapshot_is_ignored() {
    let mut state = ListState::default();
    for (version, ids) in [(3, vec![1, 2]), (2, vec![9])] {
        reduce(
            &mut state,
            Action::Async(AsyncAction::FavoritesChanged(FavoriteSnapshot {
                version,
                ids: ids.into_iter().collect(),
            })),
        );
    }
    assert_eq!(state.favorites.version, 3);
    assert!(state.favorites.contains(1));
    assert!(!state.favorites.contains(9));
}

#[test]
fn test_fill_filtered_results() {
    let config = ListConfig {
        fill_filtered_results: true,
        ..ListConfig::default()
    };
    let mut state = ListState::new(config);
    let (id, _) = fetch_request(&reduce(&mut state, ListAction::LoadInitial.into()));
    reduce(&mut state, loaded(id, Ok(page(numbered(1..=20), 45))));

    let commands = reduce(&mut state, ListAction::SetSearchText("Mon33".into()).into());
    assert_eq!(fetch_request(&commands).1, 20);

    let (id, _) = fetch_request(&commands);
    reduce(&mut state, loaded(id, Ok(page(numbered(21..=40), 45))));
    assert_eq!(ids(&state.render()), vec![33]);

    // Disabled by default.
    let mut state = state_with(numbered(1..=20), 45);
    assert!(
        reduce(&mut state, ListAction::SetSearchText("Mon33".into()).into()).is_empty()
    );
}

// View laws

fn sample() -> Vec<PokemonSummary> {
    vec![
        mon(6, "Charizard", &["fire", "flying"]),
        mon(7, "Squirtle", &["water"]),
        mon(4, "Charmander", &["fire"]),
        mon(25, "Pikachu", &["electric"]),
        mon(1, "bulbasaur", &["grass", "poison"]),
    ]
}

#[test]
fn test_empty_filter_is_identity() {
    let items = sample();
    assert_eq!(
        view::filter(&items, &FilterCriteria::default(), TypeMatch::Any),
        items
    );
    assert_eq!(
        view::filter(&items, &FilterCriteria::search("   "), TypeMatch::All),
        items
    );
}

#[test]
fn test_type_filter_keeps_relative_order() {
    let items = vec![
        mon(1, "Flareon", &["fire"]),
        mon(2, "Vaporeon", &["water"]),
        mon(3, "Moltres", &["fire", "flying"]),
    ];
    let filtered = view::filter(&items, &FilterCriteria::types(["fire"]), TypeMatch::Any);
    assert_eq!(ids(&filtered), vec![1, 3]);

    let all = view::filter(
        &items,
        &FilterCriteria::types(["fire", "flying"]),
        TypeMatch::All,
    );
    assert_eq!(ids(&all), vec![3]);

    let any = view::filter(
        &items,
        &FilterCriteria::types(["water", "flying"]),
        TypeMatch::Any,
    );
    assert_eq!(ids(&any), vec![2, 3]);
}

#[test]
fn test_search_matches_name_id_and_type() {
    let items = sample();
    let search = |text: &str| ids(&view::filter(&items, &FilterCriteria::search(text), TypeMatch::Any));

    assert_eq!(search("  CHAR "), vec![6, 4]);
    assert_eq!(search("25"), vec![25]);
    assert_eq!(search("Poison"), vec![1]);
    assert!(search("mewtwo").is_empty());
}

#[test]
fn test_favorites_only_uses_overlay() {
    let mut items = sample();
    items[3].is_favorite = true;
    let filtered = view::filter(&items, &FilterCriteria::favorites(), TypeMatch::Any);
    assert_eq!(ids(&filtered), vec![25]);
}

#[test]
fn test_sort_orders_and_idempotence() {
    let items = sample();
    assert_eq!(ids(&view::sort(items.clone(), SortOrder::ById)), vec![1, 4, 6, 7, 25]);
    assert_eq!(
        ids(&view::sort(items.clone(), SortOrder::ByNameAscending)),
        vec![6, 4, 25, 7, 1]
    );
    assert_eq!(
        ids(&view::sort(items.clone(), SortOrder::ByNameDescending)),
        vec![1, 7, 25, 4, 6]
    );

    for order in [
        SortOrder::ById,
        SortOrder::ByNameAscending,
        SortOrder::ByNameDescending,
    ] {
        let once = view::sort(items.clone(), order);
        assert_eq!(view::sort(once.clone(), order), once);
    }
}

#[test]
fn test_name_sort_is_case_sensitive() {
    let items = vec![mon(1, "bulbasaur", &[]), mon(6, "Charizard", &[])];
    assert_eq!(ids(&view::sort(items.clone(), SortOrder::ByNameAscending)), vec![6, 1]);
    assert_eq!(ids(&view::sort(items, SortOrder::ByNameDescending)), vec![1, 6]);
}

#[test]
fn test_name_sort_ties_break_on_id() {
    let items = vec![mon(9, "Eevee", &[]), mon(3, "Eevee", &[]), mon(5, "eevee", &[])];
    assert_eq!(ids(&view::sort(items.clone(), SortOrder::ByNameAscending)), vec![3, 9, 5]);
    assert_eq!(ids(&view::sort(items, SortOrder::ByNameDescending)), vec![5, 3, 9]);
}

// Runtime

struct FakeSource {
    total: u32,
    fail_at: Option<u32>,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(total: u32) -> Self {
        Self {
            total,
            fail_at: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PokemonSource for FakeSource {
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Page, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(offset) {
            return Err(network_error());
        }
        let end = (offset + limit).min(self.total);
        Ok(page(numbered(offset + 1..=end), self.total))
    }

    async fn fetch_detail(&self, id: PokemonId) -> Result<PokemonDetail, FetchError> {
        Err(FetchError::Status {
            status: 404,
            url: format!("/pokemon/{id}"),
        })
    }
}

/// A store whose writes always fail.
struct BrokenStore;

#[async_trait]
impl FavoriteStore for BrokenStore {
    async fn is_favorite(&self, _id: PokemonId) -> Result<bool, FavoriteError> {
        Ok(false)
    }

    async fn toggle(&self, _id: PokemonId) -> Result<ToggleOutcome, FavoriteError> {
        Err(FavoriteError::Storage(anyhow::anyhow!("database is locked")))
    }

    async fn all(&self) -> Result<FavoriteSnapshot, FavoriteError> {
        Ok(FavoriteSnapshot::default())
    }

    async fn observe_all(&self) -> Result<UnboundedReceiver<FavoriteSnapshot>, FavoriteError> {
        let (tx, rx) = unbounded_channel();
        let _ = tx.send(FavoriteSnapshot::default());
        Ok(rx)
    }
}

fn sqlite_store() -> Arc<SqliteFavoriteStore> {
    let db = Database::open_in_memory().unwrap();
    Arc::new(SqliteFavoriteStore::new(db.favorite_repo()))
}

#[tokio::test]
async fn test_controller_paginates_and_notifies() {
    let source = Arc::new(FakeSource::new(45));
    let mut controller = ListController::new(source.clone(), sqlite_store(), ListConfig::default())
        .await
        .unwrap();

    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    controller.subscribe(move |screen| sink.lock().unwrap().push(screen.clone()));

    controller.load_initial();
    controller.wait_idle().await;
    for _ in 0..5 {
        controller.load_more();
    }
    controller.wait_idle().await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.page_window().offset, 40);
    assert!(controller.has_more());
    assert!(!controller.is_fetching());

    let screens = seen.lock().unwrap();
    assert_eq!(screens.first(), Some(&ScreenState::Loading));
    assert!(matches!(
        screens.last(),
        Some(ScreenState::Success { items, has_more: true, is_loading_more: false, error: None })
            if items.len() == 40
    ));
}

#[tokio::test]
async fn test_controller_rejects_double_toggle() {
    let store = sqlite_store();
    let mut controller = ListController::new(
        Arc::new(FakeSource::new(30)),
        store.clone(),
        ListConfig::default(),
    )
    .await
    .unwrap();
    controller.load_initial();
    controller.wait_idle().await;

    assert!(controller.toggle_favorite(25).is_ok());
    assert_eq!(
        controller.toggle_favorite(25),
        Err(ListError::ToggleInProgress(25))
    );
    controller.wait_idle().await;

    assert!(store.is_favorite(25).await.unwrap());
    assert!(controller.state().pending.is_empty());
    assert_eq!(controller.state().favorites.version, 1);

    controller.set_favorites_only(true);
    assert_eq!(ids(&controller.items()), vec![25]);

    assert!(controller.toggle_favorite(25).is_ok());
    controller.wait_idle().await;
    assert!(controller.items().is_empty());
    assert!(!store.is_favorite(25).await.unwrap());
}

#[tokio::test]
async fn test_controller_rolls_back_failed_toggle() {
    let mut controller = ListController::new(
        Arc::new(FakeSource::new(5)),
        Arc::new(BrokenStore),
        ListConfig::default(),
    )
    .await
    .unwrap();
    controller.load_initial();
    controller.wait_idle().await;

    controller.toggle_favorite(3).unwrap();
    assert!(controller.items()[2].is_favorite);
    controller.wait_idle().await;

    assert!(!controller.items()[2].is_favorite);
    match controller.current_state() {
        ScreenState::Success { error, .. } => {
            assert!(error.unwrap().contains("database is locked"));
        }
        other => panic!("unexpected screen {other:?}"),
    }
    controller.dismiss_error();
    assert!(matches!(
        controller.current_state(),
        ScreenState::Success { error: None, .. }
    ));
}

#[tokio::test]
async fn test_controller_load_more_failure_keeps_items() {
    let source = Arc::new(FakeSource {
        fail_at: Some(20),
        ..FakeSource::new(45)
    });
    let mut controller = ListController::new(source, sqlite_store(), ListConfig::default())
        .await
        .unwrap();
    controller.load_initial();
    controller.wait_idle().await;
    controller.load_more();
    controller.wait_idle().await;

    match controller.current_state() {
        ScreenState::Success { items, error, .. } => {
            assert_eq!(items.len(), 20);
            assert!(error.is_some());
        }
        other => panic!("unexpected screen {other:?}"),
    }
    assert_eq!(controller.page_window().offset, 20);
}
