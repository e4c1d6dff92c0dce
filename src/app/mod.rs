//! Search coordinator: state, events, actions and the task that runs them.
//!
//! # Architecture
//!
//! The coordinator follows a unidirectional data flow pattern:
//!
//! ```text
//! Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                       ↑                                          ↓
//!                       └──── timers, pages, favorites lookups ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: In-flight request kinds and request tickets
//! - [`runtime`]: The tokio task executing actions and publishing snapshots
//! - [`state`]: Session state and view model computation
//!
//! # Example
//!
//! ```
//! use football_search::app::{handle_event, Action, Event, SearchState};
//!
//! let mut state = SearchState::default();
//! let (changed, actions) = handle_event(&mut state, Event::TextChanged("Beck".into()));
//! assert!(changed);
//! assert!(matches!(actions[..], [Action::ScheduleDebounce { .. }]));
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InFlight, RequestTicket};
pub use runtime::{CoordinatorHandle, CoordinatorOptions, SearchCoordinator};
pub use state::{SearchState, DEFAULT_DEBOUNCE};
