//! The coordinator task: executes actions and publishes snapshots.
//!
//! [`SearchCoordinator::spawn`] starts one tokio task that owns the
//! [`SearchState`]. Front-ends talk to it through a [`CoordinatorHandle`]:
//! methods send events in, and [`CoordinatorHandle::subscribe`] yields a
//! `watch` receiver that always holds the latest snapshot.
//!
//! ```text
//!  handle ──events──► coordinator task ──snapshots──► watch::Receiver
//!                       │    ▲
//!           spawn/abort │    │ feedback events
//!                       ▼    │
//!        debounce timers, catalog calls, favorites watchers
//! ```
//!
//! Background work never touches the state. It reports back through an
//! internal feedback channel and the handler decides whether the result is
//! still wanted. The task stops once every handle is dropped.
//!
//! Favorite writes go through one writer task that awaits each write before
//! taking the next, so the store sees toggles in the order they were made.

use super::handler::{handle_event, Event};
use super::{Action, SearchState};
use crate::catalog::CatalogClient;
use crate::domain::error::{FootballError, Result};
use crate::domain::Player;
use crate::flags::FlagDirectory;
use crate::worker::FavoritesStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Tunables for a coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorOptions {
    pub debounce: Duration,
    /// Flags file to load at start; the bundled table when `None`.
    pub flags_file: Option<PathBuf>,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            debounce: super::state::DEFAULT_DEBOUNCE,
            flags_file: None,
        }
    }
}

/// Entry point for starting a coordinator.
pub struct SearchCoordinator;

impl SearchCoordinator {
    /// Spawns the coordinator task on the current tokio runtime.
    ///
    /// Flags start loading immediately and the favorites watcher starts
    /// tracking the (empty) active text.
    #[must_use]
    pub fn spawn(
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn FavoritesStore>,
        options: CoordinatorOptions,
    ) -> CoordinatorHandle {
        let state = SearchState::new(options.debounce);
        let (events, commands) = mpsc::unbounded_channel();
        let (feedback, feedback_rx) = mpsc::unbounded_channel();
        let (snapshots, state_rx) = watch::channel(state.clone());
        let (lookup, lookup_rx) = watch::channel(String::new());

        let (writes, writes_rx) = mpsc::unbounded_channel();

        let favorites_watcher = tokio::spawn(watch_favorites(Arc::clone(&store), lookup_rx, feedback.clone()));
        tokio::spawn(write_favorites(Arc::clone(&store), writes_rx));
        spawn_flags_loader(options.flags_file, feedback.clone());

        let coordinator = Coordinator {
            state,
            catalog,
            store,
            writes,
            feedback,
            snapshots,
            lookup,
            debounce_task: None,
            search_task: None,
            favorites_watcher,
            list_watcher: None,
        };
        tokio::spawn(coordinator.run(commands, feedback_rx));

        CoordinatorHandle { events, state: state_rx }
    }
}

/// Cloneable front-end to a running coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    events: mpsc::UnboundedSender<Event>,
    state: watch::Receiver<SearchState>,
}

impl CoordinatorHandle {
    /// Feeds an event to the coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Worker`] if the coordinator task has stopped.
    pub fn send(&self, event: Event) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| FootballError::Worker("search coordinator has stopped".to_string()))
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn text_changed(&self, text: impl Into<String>) -> Result<()> {
        self.send(Event::TextChanged(text.into()))
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn load_more_players(&self) -> Result<()> {
        self.send(Event::LoadMorePlayers)
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn load_more_teams(&self) -> Result<()> {
        self.send(Event::LoadMoreTeams)
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn refresh(&self) -> Result<()> {
        self.send(Event::Refresh)
    }

    /// Flips the player's favorite state as seen in the latest snapshot.
    ///
    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn toggle_favorite(&self, player: Player) -> Result<()> {
        let was_favorite = self.state.borrow().is_favourite(&player);
        self.send(Event::FavoriteToggled { player, was_favorite })
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn show_favorites(&self) -> Result<()> {
        self.send(Event::ShowFavorites)
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn hide_favorites(&self) -> Result<()> {
        self.send(Event::HideFavorites)
    }

    /// # Errors
    ///
    /// Fails if the coordinator task has stopped.
    pub fn dismiss_error(&self) -> Result<()> {
        self.send(Event::DismissError)
    }

    /// Receiver of state snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Copy of the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }
}

struct Coordinator {
    state: SearchState,
    catalog: Arc<dyn CatalogClient>,
    store: Arc<dyn FavoritesStore>,
    writes: mpsc::UnboundedSender<FavoriteWrite>,
    feedback: mpsc::UnboundedSender<Event>,
    snapshots: watch::Sender<SearchState>,
    lookup: watch::Sender<String>,
    debounce_task: Option<JoinHandle<()>>,
    search_task: Option<JoinHandle<()>>,
    favorites_watcher: JoinHandle<()>,
    list_watcher: Option<JoinHandle<()>>,
}

impl Coordinator {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Event>,
        mut feedback: mpsc::UnboundedReceiver<Event>,
    ) {
        tracing::debug!("search coordinator started");
        loop {
            let event = tokio::select! {
                biased;
                Some(event) = feedback.recv() => event,
                command = commands.recv() => match command {
                    Some(event) => event,
                    None => break,
                },
            };
            self.dispatch(event);
        }
        self.shutdown();
        tracing::debug!("search coordinator stopped");
    }

    fn dispatch(&mut self, event: Event) {
        let (changed, actions) = handle_event(&mut self.state, event);
        for action in actions {
            self.execute(action);
        }
        if changed {
            self.snapshots.send_replace(self.state.clone());
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::ScheduleDebounce { generation, delay } => {
                abort(self.debounce_task.take());
                let feedback = self.feedback.clone();
                self.debounce_task = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = feedback.send(Event::DebounceElapsed { generation });
                }));
            }
            Action::Search { ticket, query } => {
                abort(self.search_task.take());
                let catalog = Arc::clone(&self.catalog);
                let feedback = self.feedback.clone();
                let span = tracing::debug_span!("search_request", generation = ticket.generation, kind = ?ticket.kind);
                self.search_task = Some(tokio::spawn(
                    async move {
                        let result = catalog.search(&query).await;
                        let _ = feedback.send(Event::PageArrived { ticket, result });
                    }
                    .instrument(span),
                ));
            }
            Action::CancelSearch => abort(self.search_task.take()),
            Action::UpsertFavorite(player) => self.queue_write(FavoriteWrite::Upsert(player)),
            Action::RemoveFavorite(player) => self.queue_write(FavoriteWrite::Remove(player)),
            Action::WatchFavorites { lookup } => {
                self.lookup.send_replace(lookup);
            }
            Action::WatchFavoritesList(true) => {
                if self.list_watcher.is_none() {
                    let store = Arc::clone(&self.store);
                    self.list_watcher = Some(tokio::spawn(watch_favorites_list(store, self.feedback.clone())));
                }
            }
            Action::WatchFavoritesList(false) => abort(self.list_watcher.take()),
        }
    }

    fn queue_write(&self, write: FavoriteWrite) {
        if let Err(e) = self.writes.send(write) {
            tracing::error!(player_id = %e.0.player().id, "favorites writer has stopped");
        }
    }

    fn shutdown(&mut self) {
        abort(self.debounce_task.take());
        abort(self.search_task.take());
        abort(self.list_watcher.take());
        self.favorites_watcher.abort();
    }
}

#[derive(Debug)]
enum FavoriteWrite {
    Upsert(Player),
    Remove(Player),
}

impl FavoriteWrite {
    const fn player(&self) -> &Player {
        match self {
            Self::Upsert(player) | Self::Remove(player) => player,
        }
    }
}

/// Applies favorite writes one at a time, in arrival order. Queued writes
/// still land after the coordinator stops.
async fn write_favorites(store: Arc<dyn FavoritesStore>, mut writes: mpsc::UnboundedReceiver<FavoriteWrite>) {
    while let Some(write) = writes.recv().await {
        let saved = match &write {
            FavoriteWrite::Upsert(player) => store.upsert(player).await,
            FavoriteWrite::Remove(player) => store.remove(player).await,
        };
        if !saved {
            tracing::warn!(write = ?write, "favorite write was not applied");
        }
    }
}

fn abort(task: Option<JoinHandle<()>>) {
    if let Some(task) = task {
        task.abort();
    }
}

/// Re-runs the favorites lookup whenever the active text or the store
/// version changes.
async fn watch_favorites(
    store: Arc<dyn FavoritesStore>,
    mut lookup: watch::Receiver<String>,
    feedback: mpsc::UnboundedSender<Event>,
) {
    let mut version = store.subscribe();
    loop {
        // Mark both as seen before querying so a write landing mid-lookup
        // triggers another round.
        let needle = lookup.borrow_and_update().clone();
        version.borrow_and_update();

        let ids = store.lookup(&needle).await;
        if feedback.send(Event::FavoritesChanged { lookup: needle, ids }).is_err() {
            break;
        }

        let alive = tokio::select! {
            r = lookup.changed() => r.is_ok(),
            r = version.changed() => r.is_ok(),
        };
        if !alive {
            break;
        }
    }
}

/// Keeps the favorites screen current until aborted.
async fn watch_favorites_list(store: Arc<dyn FavoritesStore>, feedback: mpsc::UnboundedSender<Event>) {
    let mut version = store.subscribe();
    loop {
        version.borrow_and_update();
        let records = store.list_all().await;
        if feedback.send(Event::FavoritesListed(records)).is_err() || version.changed().await.is_err() {
            break;
        }
    }
}

fn spawn_flags_loader(path: Option<PathBuf>, feedback: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || FlagDirectory::load(path.as_deref())).await {
            Ok(flags) => {
                let _ = feedback.send(Event::FlagsLoaded(flags));
            }
            Err(e) => tracing::error!(error = %e, "flag loading task failed"),
        }
    });
}
