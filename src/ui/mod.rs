//! Presentation layer: view models and a plain-text renderer.
//!
//! ```text
//! SearchState → view_model → SearchViewModel → render → text frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready cells, overlays and button states
//! - [`renderer`]: Text frame used by the line driver

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{ListOverlay, MoreButton, PlayerCell, SearchViewModel, TeamCell};
