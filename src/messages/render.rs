//! Render state - data structure sent from App layer to UI for rendering

use crate::app::pagination::Pagination;
use crate::app::snackbar::SnackbarView;
use crate::app::state::LoadState;
use crate::constants::DEFAULT_ITEMS_PER_PAGE;
use crate::messages::ui_events::{PromptKind, View};
use crate::models::{Feed, Game, GamesResponse};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub view: View,
    pub feed: Feed,

    // Catalog list
    pub list: LoadState<GamesResponse>,
    pub selected: usize,
    pub pagination: Pagination,

    // Detail view
    pub detail: LoadState<Game>,
    pub detail_scroll: u16,

    pub is_loading: bool,
    pub time_ms: u64,

    // Prompt popup
    pub prompt: Option<PromptKind>,
    pub prompt_input: String,

    pub snackbar: Option<SnackbarView>,
    pub show_help: bool,
    pub debug: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: View::List,
            feed: Feed::All,
            list: LoadState::Loading,
            selected: 0,
            pagination: Pagination::new(DEFAULT_ITEMS_PER_PAGE),
            detail: LoadState::Idle,
            detail_scroll: 0,
            is_loading: true,
            time_ms: 0,
            prompt: None,
            prompt_input: String::new(),
            snackbar: None,
            show_help: false,
            debug: false,
        }
    }
}
