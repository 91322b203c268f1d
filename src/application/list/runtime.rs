use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::application::favorites::FavoriteStore;
use crate::domain::{
    FavoriteSnapshot, FilterCriteria, ListError, PageWindow, PokemonId, PokemonSummary, SortOrder,
};
use crate::infra::api::PokemonSource;

use super::action::{Action, AsyncAction, ListAction};
use super::command::Command;
use super::reducer;
use super::state::{ListConfig, ListState, ScreenState};

type Subscriber = Box<dyn FnMut(&ScreenState) + Send>;

/// Owns one list session and runs its side effects on tokio tasks.
///
/// All state mutation happens on the task that owns the controller; spawned
/// work only reports back through `AsyncAction` messages.
pub struct ListController {
    state: ListState,
    source: Arc<dyn PokemonSource>,
    favorites: Arc<dyn FavoriteStore>,
    action_tx: UnboundedSender<AsyncAction>,
    action_rx: UnboundedReceiver<AsyncAction>,
    favorite_rx: UnboundedReceiver<FavoriteSnapshot>,
    in_flight: usize,
    subscribers: Vec<Subscriber>,
    last_screen: ScreenState,
}

impl ListController {
    pub async fn new(
        source: Arc<dyn PokemonSource>,
        favorites: Arc<dyn FavoriteStore>,
        config: ListConfig,
    ) -> Result<Self, ListError> {
        let favorite_rx = favorites.observe_all().await?;
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let state = ListState::new(config);
        let last_screen = state.screen();

        let mut controller = Self {
            state,
            source,
            favorites,
            action_tx,
            action_rx,
            favorite_rx,
            in_flight: 0,
            subscribers: Vec::new(),
            last_screen,
        };
        controller.drain_favorites();
        Ok(controller)
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let commands = reducer::reduce(&mut self.state, action.into());
        for command in commands {
            self.run(command);
        }
        self.notify();
    }

    fn run(&mut self, command: Command) {
        self.in_flight += 1;
        let tx = self.action_tx.clone();

        match command {
            Command::FetchPage {
                request_id,
                offset,
                limit,
            } => {
                let source = self.source.clone();
                tokio::spawn(async move {
                    let result = source.fetch_page(offset, limit).await;
                    let _ = tx.send(AsyncAction::PageLoaded { request_id, result });
                });
            }
            Command::PersistFavoriteToggle { id } => {
                let favorites = self.favorites.clone();
                tokio::spawn(async move {
                    let result = favorites.toggle(id).await.map_err(ListError::from);
                    let _ = tx.send(AsyncAction::FavoriteToggled { id, result });
                });
            }
        }
    }

    /// Apply every result that has already arrived. Returns true if anything changed.
    pub fn poll_action_messages(&mut self) -> bool {
        let mut any = self.drain_favorites();
        while let Ok(action) = self.action_rx.try_recv() {
            self.in_flight -= 1;
            // The store publishes before answering, so its snapshot goes first.
            self.drain_favorites();
            self.dispatch(action);
            any = true;
        }
        any
    }

    /// Run until no command is outstanding, applying results as they arrive.
    pub async fn wait_idle(&mut self) {
        loop {
            self.poll_action_messages();
            if self.in_flight == 0 {
                break;
            }
            let Some(action) = self.action_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.drain_favorites();
            self.dispatch(action);
        }
    }

    fn drain_favorites(&mut self) -> bool {
        let mut any = false;
        while let Ok(snapshot) = self.favorite_rx.try_recv() {
            self.dispatch(AsyncAction::FavoritesChanged(snapshot));
            any = true;
        }
        any
    }

    fn notify(&mut self) {
        let screen = self.state.screen();
        if screen == self.last_screen {
            return;
        }
        for subscriber in &mut self.subscribers {
            subscriber(&screen);
        }
        self.last_screen = screen;
    }

    /// Register a callback for screen changes. It is invoked once right away
    /// with the current screen.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&ScreenState) + Send + 'static) {
        callback(&self.last_screen);
        self.subscribers.push(Box::new(callback));
    }

    pub fn current_state(&self) -> ScreenState {
        self.state.screen()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn load_initial(&mut self) {
        self.dispatch(ListAction::LoadInitial);
    }

    pub fn refresh(&mut self) {
        self.dispatch(ListAction::Refresh);
    }

    pub fn load_more(&mut self) {
        self.dispatch(ListAction::LoadMore);
    }

    pub fn apply_filter(&mut self, criteria: FilterCriteria) {
        self.dispatch(ListAction::ApplyFilter(criteria));
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch(ListAction::SetSearchText(text.into()));
    }

    pub fn toggle_type(&mut self, kind: impl Into<String>) {
        self.dispatch(ListAction::ToggleType(kind.into()));
    }

    pub fn set_favorites_only(&mut self, enabled: bool) {
        self.dispatch(ListAction::SetFavoritesOnly(enabled));
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(ListAction::ClearFilters);
    }

    pub fn apply_sort(&mut self, order: SortOrder) {
        self.dispatch(ListAction::ApplySort(order));
    }

    /// Optimistically flip the favorite flag and persist it.
    ///
    /// Rejected with `ToggleInProgress` while an earlier toggle for the same id
    /// has not been reconciled with the store.
    pub fn toggle_favorite(&mut self, id: PokemonId) -> Result<(), ListError> {
        if self.state.is_toggle_pending(id) {
            return Err(ListError::ToggleInProgress(id));
        }
        self.dispatch(ListAction::ToggleFavorite(id));
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(ListAction::DismissError);
    }

    pub fn items(&self) -> Vec<PokemonSummary> {
        self.state.render()
    }

    pub fn available_types(&self) -> Vec<String> {
        self.state.available_types()
    }

    pub fn page_window(&self) -> PageWindow {
        self.state.window
    }

    pub fn is_fetching(&self) -> bool {
        self.state.is_fetching()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }
}
