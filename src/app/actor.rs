//! App actor - message loop processing UI events and network responses

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// How often expiring UI state (the snackbar) is checked
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Load the first page straight away
        let cmd = self.state.fetch_list();
        let _ = self.network_tx.send(cmd);
        let _ = self.render_tx.send(self.state.to_render_state());

        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    if let Some(cmd) = self.state.handle_response(response, Instant::now()) {
                        let _ = self.network_tx.send(cmd);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                _ = ticker.tick() => {
                    if self.state.tick(Instant::now()) {
                        let _ = self.render_tx.send(self.state.to_render_state());
                    }
                }
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let now = Instant::now();

        let cmd = match event {
            // List navigation
            UiEvent::SelectNext => {
                self.state.select_next();
                None
            }
            UiEvent::SelectPrev => {
                self.state.select_prev();
                None
            }
            UiEvent::OpenSelected => self.state.open_selected(),
            UiEvent::Back => {
                self.state.back();
                None
            }

            // Pagination
            UiEvent::NextPage => self.state.next_page(),
            UiEvent::PrevPage => self.state.prev_page(),
            UiEvent::FirstPage => self.state.first_page(),
            UiEvent::LastPage => self.state.last_page(),

            // Feeds
            UiEvent::ShowFeed(key) => self.state.show_feed(key),
            UiEvent::OpenPrompt(kind) => {
                self.state.open_prompt(kind);
                None
            }
            UiEvent::PromptChar(c) => {
                self.state.prompt_char(c);
                None
            }
            UiEvent::PromptBackspace => {
                self.state.prompt_backspace();
                None
            }
            UiEvent::SubmitPrompt => self.state.submit_prompt(now),
            UiEvent::CancelPrompt => {
                self.state.cancel_prompt();
                None
            }

            // Detail
            UiEvent::ScrollUp => {
                self.state.scroll_up();
                None
            }
            UiEvent::ScrollDown => {
                self.state.scroll_down();
                None
            }

            UiEvent::Reload => Some(self.state.reload()),
            UiEvent::OpenStore => {
                self.state.open_store(now);
                None
            }
            UiEvent::DismissSnackbar => {
                self.state.dismiss_snackbar();
                None
            }

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
        false
    }
}
