//! # GameDeck
//!
//! A terminal catalog browser for a game-listing REST service.
//!
//! ## Features
//! - Paginated catalog list (all, free, on-sale, search, category)
//! - Per-game detail view with price history
//! - Typed API client with classified errors and manual retry
//! - Transient notifications
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod config;
pub mod constants;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Feed, Game, GamesResponse, PaginationParams, Price, SearchQuery};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState};
pub use network::{ApiError, GameService, NetworkActor};
