//! Command handlers - business logic for processing UI events

use std::time::Instant;

use crate::app::snackbar::Severity;
use crate::app::state::LoadState;
use crate::app::AppState;
use crate::constants::STORE_NOTICE;
use crate::messages::ui_events::{FeedKey, PromptKind, View};
use crate::messages::{ApiRequest, NetworkCommand, NetworkResponse};
use crate::models::{Feed, SearchQuery};

impl AppState {
    // ========================
    // Requests
    // ========================

    fn issue(&mut self, request: ApiRequest) -> NetworkCommand {
        let id = self.next_id();
        self.pending_request_id = Some(id);
        NetworkCommand::Fetch { id, request }
    }

    /// Load the current page of the current feed
    pub fn fetch_list(&mut self) -> NetworkCommand {
        self.list = LoadState::Loading;
        let request = ApiRequest::Page {
            feed: self.feed.clone(),
            params: self.pagination.params(),
        };
        self.issue(request)
    }

    pub fn fetch_detail(&mut self, game_id: u64) -> NetworkCommand {
        self.view = View::Detail(game_id);
        self.detail = LoadState::Loading;
        self.detail_scroll = 0;
        self.issue(ApiRequest::Game(game_id))
    }

    /// Re-issue the request behind the current view
    pub fn reload(&mut self) -> NetworkCommand {
        self.announce_reload = true;
        match self.view {
            View::List => self.fetch_list(),
            View::Detail(game_id) => self.fetch_detail(game_id),
        }
    }

    // ========================
    // List navigation
    // ========================

    fn list_len(&self) -> usize {
        self.list.loaded().map(|page| page.games.len()).unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn open_selected(&mut self) -> Option<NetworkCommand> {
        let game_id = self
            .list
            .loaded()
            .and_then(|page| page.games.get(self.selected))
            .map(|game| game.id)?;
        Some(self.fetch_detail(game_id))
    }

    /// Return to the list without refetching it
    pub fn back(&mut self) {
        if let View::Detail(_) = self.view {
            self.view = View::List;
            self.announce_reload = false;
            if self.detail.is_loading() {
                self.pending_request_id = None;
            }
            self.detail = LoadState::Idle;
        }
    }

    // ========================
    // Pagination
    // ========================

    fn page_changed(&mut self, moved: bool) -> Option<NetworkCommand> {
        if !moved {
            return None;
        }
        self.selected = 0;
        self.announce_reload = false;
        Some(self.fetch_list())
    }

    pub fn next_page(&mut self) -> Option<NetworkCommand> {
        let moved = self.pagination.next();
        self.page_changed(moved)
    }

    pub fn prev_page(&mut self) -> Option<NetworkCommand> {
        let moved = self.pagination.prev();
        self.page_changed(moved)
    }

    pub fn first_page(&mut self) -> Option<NetworkCommand> {
        let moved = self.pagination.first();
        self.page_changed(moved)
    }

    pub fn last_page(&mut self) -> Option<NetworkCommand> {
        let moved = self.pagination.last();
        self.page_changed(moved)
    }

    // ========================
    // Feeds
    // ========================

    pub fn switch_feed(&mut self, feed: Feed) -> NetworkCommand {
        tracing::info!(feed = ?feed, "Switching feed");
        self.feed = feed;
        self.pagination.reset();
        self.selected = 0;
        self.announce_reload = false;
        self.fetch_list()
    }

    pub fn show_feed(&mut self, key: FeedKey) -> Option<NetworkCommand> {
        let feed = match key {
            FeedKey::All => Feed::All,
            FeedKey::Free => Feed::Free,
            FeedKey::OnSale => Feed::OnSale,
        };
        if feed == self.feed {
            return None;
        }
        Some(self.switch_feed(feed))
    }

    // ========================
    // Prompt popup
    // ========================

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(kind);
        self.prompt_input.clear();
    }

    pub fn prompt_char(&mut self, c: char) {
        self.prompt_input.push(c);
    }

    pub fn prompt_backspace(&mut self) {
        self.prompt_input.pop();
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.prompt_input.clear();
    }

    pub fn submit_prompt(&mut self, now: Instant) -> Option<NetworkCommand> {
        let kind = self.prompt.take()?;
        let input = std::mem::take(&mut self.prompt_input);

        let feed = match kind {
            PromptKind::Search => SearchQuery::new(&input).map(Feed::Search),
            PromptKind::Category => {
                let category = input.trim();
                (!category.is_empty()).then(|| Feed::Category(category.to_string()))
            }
        };

        match feed {
            Some(feed) => Some(self.switch_feed(feed)),
            None => {
                let message = match kind {
                    PromptKind::Search => "Enter a search term",
                    PromptKind::Category => "Enter a category name",
                };
                self.snackbar.show(message, Severity::Warning, now);
                None
            }
        }
    }

    // ========================
    // Detail scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    // ========================
    // Notifications & popups
    // ========================

    pub fn open_store(&mut self, now: Instant) {
        self.snackbar.show(STORE_NOTICE, Severity::Info, now);
    }

    pub fn dismiss_snackbar(&mut self) {
        self.snackbar.dismiss();
    }

    /// Periodic housekeeping; returns whether a redraw is needed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.snackbar.tick(now)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a fetch result; returns a follow-up fetch when the page has to move
    pub fn handle_response(
        &mut self,
        response: NetworkResponse,
        now: Instant,
    ) -> Option<NetworkCommand> {
        let response_id = response.id();
        if self.pending_request_id != Some(response_id) {
            tracing::debug!(id = response_id, "Dropping stale response");
            return None;
        }
        self.pending_request_id = None;

        match response {
            NetworkResponse::Page { page, time_ms, .. } => {
                self.time_ms = time_ms;
                self.pagination.total_items = page.total;
                if self.pagination.clamp() {
                    tracing::debug!(
                        page = self.pagination.current_page,
                        "Result set shrank, refetching last page"
                    );
                    self.selected = 0;
                    return Some(self.fetch_list());
                }
                if self.selected >= page.games.len() {
                    self.selected = 0;
                }
                self.list = LoadState::Loaded(page);
                self.finish_reload("Games reloaded", now);
            }
            NetworkResponse::Game { game, time_ms, .. } => {
                self.time_ms = time_ms;
                self.detail = LoadState::Loaded(*game);
                self.finish_reload("Game reloaded", now);
            }
            NetworkResponse::Failed { error, time_ms, .. } => {
                self.time_ms = time_ms;
                self.announce_reload = false;
                match self.view {
                    View::List => self.list = LoadState::Failed(error),
                    View::Detail(_) => self.detail = LoadState::Failed(error),
                }
            }
        }
        None
    }

    fn finish_reload(&mut self, message: &str, now: Instant) {
        if std::mem::take(&mut self.announce_reload) {
            self.snackbar.show(message, Severity::Success, now);
        }
    }
}
