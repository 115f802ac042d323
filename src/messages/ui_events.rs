//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which screen is showing
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    List,
    Detail(u64),
}

/// Feeds reachable with a single key
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FeedKey {
    All,
    Free,
    OnSale,
}

/// What a text prompt collects
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PromptKind {
    Search,
    Category,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::Search => " Search games (Enter to search, Esc to cancel) ",
            PromptKind::Category => " Browse category (Enter to browse, Esc to cancel) ",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // List navigation
    SelectNext,
    SelectPrev,
    OpenSelected,
    Back,

    // Pagination
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    // Feeds
    ShowFeed(FeedKey),
    OpenPrompt(PromptKind),
    PromptChar(char),
    PromptBackspace,
    SubmitPrompt,
    CancelPrompt,

    // Detail
    ScrollUp,
    ScrollDown,

    /// Re-issue the request behind the current view
    Reload,
    OpenStore,
    DismissSnackbar,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    view: View,
    prompt_open: bool,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if prompt_open {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelPrompt),
            KeyCode::Enter => Some(UiEvent::SubmitPrompt),
            KeyCode::Backspace => Some(UiEvent::PromptBackspace),
            KeyCode::Char(c) => Some(UiEvent::PromptChar(c)),
            _ => None,
        };
    }

    // Keys shared by both views
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => return Some(UiEvent::Reload),
        KeyCode::Char('x') => return Some(UiEvent::DismissSnackbar),
        KeyCode::Char('o') => return Some(UiEvent::OpenStore),
        _ => {}
    }

    match view {
        View::List => handle_list_keys(key),
        View::Detail(_) => handle_detail_keys(key),
    }
}

fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Enter => Some(UiEvent::OpenSelected),
        KeyCode::Right | KeyCode::Char('n') => Some(UiEvent::NextPage),
        KeyCode::Left | KeyCode::Char('p') => Some(UiEvent::PrevPage),
        KeyCode::Home => Some(UiEvent::FirstPage),
        KeyCode::End => Some(UiEvent::LastPage),
        KeyCode::Char('a') => Some(UiEvent::ShowFeed(FeedKey::All)),
        KeyCode::Char('f') => Some(UiEvent::ShowFeed(FeedKey::Free)),
        KeyCode::Char('s') => Some(UiEvent::ShowFeed(FeedKey::OnSale)),
        KeyCode::Char('/') => Some(UiEvent::OpenPrompt(PromptKind::Search)),
        KeyCode::Char('c') => Some(UiEvent::OpenPrompt(PromptKind::Category)),
        _ => None,
    }
}

fn handle_detail_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => Some(UiEvent::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_prompt_captures_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('q')), View::List, true, false),
            Some(UiEvent::PromptChar('q'))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), View::List, true, false),
            Some(UiEvent::SubmitPrompt)
        );
    }

    #[test]
    fn test_view_specific_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), View::List, false, false),
            Some(UiEvent::OpenSelected)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Esc), View::Detail(3), false, false),
            Some(UiEvent::Back)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('r')), View::Detail(3), false, false),
            Some(UiEvent::Reload)
        );
    }

    #[test]
    fn test_help_closes_on_any_key() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('f')), View::List, false, true),
            Some(UiEvent::CloseHelp)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, View::List, true, false), Some(UiEvent::Quit));
    }
}
