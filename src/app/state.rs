//! App state - pure data structure with no I/O logic

use std::time::Duration;

use crate::app::pagination::Pagination;
use crate::app::snackbar::Snackbar;
use crate::config::Config;
use crate::messages::ui_events::{PromptKind, View};
use crate::messages::RenderState;
use crate::models::{Feed, Game, GamesResponse};
use crate::network::ApiError;

/// Lifecycle of one fetched value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(ApiError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub view: View,
    pub feed: Feed,

    // Catalog list
    pub list: LoadState<GamesResponse>,
    pub selected: usize,
    pub pagination: Pagination,

    // Detail view
    pub detail: LoadState<Game>,
    pub detail_scroll: u16,

    // Request tracking
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
    pub time_ms: u64,
    /// Announce the next successful load (manual reload)
    pub announce_reload: bool,

    // Prompt popup
    pub prompt: Option<PromptKind>,
    pub prompt_input: String,

    pub snackbar: Snackbar,
    pub show_help: bool,
    pub debug: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            view: View::List,
            feed: Feed::All,
            list: LoadState::Idle,
            selected: 0,
            pagination: Pagination::new(config.items_per_page),
            detail: LoadState::Idle,
            detail_scroll: 0,
            next_request_id: 1,
            pending_request_id: None,
            time_ms: 0,
            announce_reload: false,
            prompt: None,
            prompt_input: String::new(),
            snackbar: Snackbar::new(Duration::from_millis(config.snackbar_duration_ms)),
            show_help: false,
            debug: config.debug,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request_id.is_some()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view,
            feed: self.feed.clone(),
            list: self.list.clone(),
            selected: self.selected,
            pagination: self.pagination,
            detail: self.detail.clone(),
            detail_scroll: self.detail_scroll,
            is_loading: self.is_loading(),
            time_ms: self.time_ms,
            prompt: self.prompt,
            prompt_input: self.prompt_input.clone(),
            snackbar: self.snackbar.view(),
            show_help: self.show_help,
            debug: self.debug,
        }
    }
}
