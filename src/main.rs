//! GameDeck - Actor-based terminal catalog browser
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async catalog requests

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use gamedeck::app::{AppActor, LoadState};
use gamedeck::config::Config;
use gamedeck::constants::{APP_NAME, LOG_FILE};
use gamedeck::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use gamedeck::messages::ui_events::{key_to_ui_event, View};
use gamedeck::models::{Feed, Game, GamesResponse};
use gamedeck::network::{ApiError, GameService, NetworkActor};
use gamedeck::ui::{
    error_presentation, format_date_long, format_date_short, format_price, pagination_line,
    render_tabs, score_color, severity_style,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    tracing::info!(base_url = %config.base_url, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(GameService::from_config(&config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.view,
                    current_state.prompt.is_some(),
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let show_pagination = state.view == View::List
        && matches!(state.list, LoadState::Loaded(_))
        && state.pagination.is_visible();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                  // Feed tabs
            Constraint::Min(0),                                     // Content
            Constraint::Length(if show_pagination { 3 } else { 0 }), // Pagination
            Constraint::Length(1),                                  // Status bar
        ])
        .split(area);

    draw_feed_bar(f, state, main_chunks[0]);

    match state.view {
        View::List => draw_list(f, state, main_chunks[1]),
        View::Detail(_) => draw_detail(f, state, main_chunks[1]),
    }

    if show_pagination {
        draw_pagination(f, state, main_chunks[2]);
    }

    draw_status_bar(f, state, main_chunks[3]);

    if let Some(kind) = state.prompt {
        draw_prompt_popup(f, kind.title(), &state.prompt_input, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }

    draw_snackbar(f, state, area);
}

fn draw_feed_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(APP_NAME.len() as u16 + 3), Constraint::Min(0)])
        .split(area);

    let name = Paragraph::new(format!(" {} ", APP_NAME))
        .style(Style::default().fg(Color::Black).bg(Color::Cyan).bold());
    f.render_widget(name, chunks[0]);

    let selected = match state.feed {
        Feed::All => 0,
        Feed::Free => 1,
        Feed::OnSale => 2,
        Feed::Search(_) => 3,
        Feed::Category(_) => 4,
    };
    let tabs = render_tabs(&["a:All", "f:Free", "s:On Sale", "/:Search", "c:Category"], selected);
    f.render_widget(tabs, chunks[1]);
}

fn draw_loading(f: &mut Frame, title: &str, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", title));
    let loading = Paragraph::new("\n  Loading...")
        .style(Style::default().fg(Color::Blue))
        .block(block);
    f.render_widget(loading, area);
}

fn draw_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = state.feed.title();

    match &state.list {
        LoadState::Idle | LoadState::Loading => draw_loading(f, &title, area),
        LoadState::Failed(error) => {
            draw_error_panel(f, error, "Unable to Load Games", state.debug, false, area)
        }
        LoadState::Loaded(page) => draw_game_list(f, state, page, &title, area),
    }
}

fn draw_game_list(f: &mut Frame, state: &RenderState, page: &GamesResponse, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
        .title_bottom(Line::from(" ↑/↓ select | Enter details | ←/→ page ").right_aligned());

    if page.games.is_empty() {
        let empty = Paragraph::new("\n  No games found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = page.games.iter().map(game_list_item).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn game_list_item(game: &Game) -> ListItem<'static> {
    let mut title = vec![Span::styled(game.title.clone(), Style::default().bold())];
    if game.is_free {
        title.push(Span::raw(" "));
        title.push(Span::styled(" FREE ", Style::default().fg(Color::White).bg(Color::Green).bold()));
    }
    if game.is_discounted() {
        title.push(Span::raw(" "));
        title.push(Span::styled(
            format!(" -{}% ", game.discount_percent),
            Style::default().fg(Color::White).bg(Color::Red).bold(),
        ));
    }

    let mut price = price_spans(game);
    price.push(Span::styled(
        format!(
            "   {} / {}",
            game.developer_name().unwrap_or("Unknown Developer"),
            game.publisher_name().unwrap_or("Unknown Publisher"),
        ),
        Style::default().fg(Color::Gray),
    ));

    let mut meta = Vec::new();
    if let Some(score) = game.metacritic_score {
        meta.push(Span::styled(
            format!(" {} ", score),
            Style::default().fg(Color::Black).bg(score_color(score)).bold(),
        ));
        meta.push(Span::raw(" Metacritic   "));
    }
    meta.push(Span::styled(
        format!("Released: {}", format_date_short(game.release_date.as_deref())),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(vec![Line::from(title), Line::from(price), Line::from(meta), Line::from("")])
}

fn price_spans(game: &Game) -> Vec<Span<'static>> {
    if game.is_free {
        return vec![Span::styled("Free", Style::default().fg(Color::Green).bold())];
    }

    let mut spans = Vec::new();
    if game.is_discounted() {
        spans.push(Span::styled(
            format!("${}", game.original_price),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format_price(&game.price),
        Style::default().fg(Color::LightRed).bold(),
    ));
    spans
}

fn draw_detail(f: &mut Frame, state: &RenderState, area: Rect) {
    match &state.detail {
        LoadState::Loading => draw_loading(f, "Game Details", area),
        LoadState::Failed(error) => {
            draw_error_panel(f, error, "Error Loading Game", state.debug, true, area)
        }
        LoadState::Idle => {
            let block = Block::default().borders(Borders::ALL).title(" Game Not Found ");
            let text = "\n  The game you're looking for doesn't exist or has been removed.\n\n  Esc: back to games";
            f.render_widget(Paragraph::new(text).block(block), area);
        }
        LoadState::Loaded(game) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(format!(" {} ", game.title), Style::default().bold()))
                .title_bottom(Line::from(" Esc back | ↑/↓ scroll | o view on Steam ").right_aligned());

            let details = Paragraph::new(detail_lines(game))
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((state.detail_scroll, 0));
            f.render_widget(details, area);
        }
    }
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).bold(),
    ))
}

fn detail_lines(game: &Game) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(short) = &game.short_description {
        lines.push(Line::from(Span::styled(short.clone(), Style::default().italic())));
        lines.push(Line::from(""));
    }

    // Price block
    let mut price = price_spans(game);
    if game.is_discounted() {
        price.push(Span::styled(
            format!("  -{}%", game.discount_percent),
            Style::default().fg(Color::Red).bold(),
        ));
    }
    lines.push(Line::from(price));
    lines.push(Line::from(format!(
        "Release Date: {}",
        format_date_long(game.release_date.as_deref())
    )));
    lines.push(Line::from(format!(
        "Developer: {}",
        game.developer_name().unwrap_or("Unknown Developer")
    )));
    lines.push(Line::from(format!(
        "Publisher: {}",
        game.publisher_name().unwrap_or("Unknown Publisher")
    )));
    if let Some(score) = game.metacritic_score {
        let mut spans = vec![
            Span::raw("Metacritic: "),
            Span::styled(format!(" {} ", score), Style::default().fg(Color::Black).bg(score_color(score))),
        ];
        if let Some(url) = &game.metacritic_url {
            spans.push(Span::styled(format!("  {}", url), Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));

    lines.push(section("About This Game"));
    lines.push(Line::from(game.description.clone()));
    lines.push(Line::from(""));

    if let Some(requirements) = &game.system_requirements {
        let tiers = [
            ("Minimum", requirements.minimum.as_ref()),
            ("Recommended", requirements.recommended.as_ref()),
        ];
        let present: Vec<_> = tiers
            .into_iter()
            .filter_map(|(name, tier)| tier.map(|t| (name, t.lines())))
            .filter(|(_, tier_lines)| !tier_lines.is_empty())
            .collect();
        if !present.is_empty() {
            lines.push(section("System Requirements"));
            for (name, tier_lines) in present {
                lines.push(Line::from(Span::styled(name.to_string(), Style::default().bold())));
                for (label, value) in tier_lines {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {}: ", label), Style::default().bold()),
                        Span::raw(value.to_string()),
                    ]));
                }
            }
            lines.push(Line::from(""));
        }
    }

    for (title, values, color) in [
        ("Categories", &game.categories, Color::Blue),
        ("Languages", &game.languages, Color::Green),
        ("Platforms", &game.platforms, Color::Magenta),
    ] {
        if let Some(values) = values.as_ref().filter(|v| !v.is_empty()) {
            lines.push(section(title));
            let mut spans = Vec::new();
            for value in values {
                spans.push(Span::styled(format!(" {} ", value), Style::default().fg(color).bold()));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
    }

    if !game.prices.is_empty() {
        lines.push(section("Price History"));
        for entry in &game.prices {
            let mut text = format!(
                "  {} {:>4}  {} {}",
                entry.recorded_at.format("%Y-%m-%d"),
                entry.region,
                entry.price,
                entry.currency,
            );
            if entry.discount_percent > 0 {
                text.push_str(&format!("  (-{}% from {})", entry.discount_percent, entry.original_price));
            }
            if entry.is_on_sale {
                if let Some(end) = entry.sale_end_date {
                    text.push_str(&format!("  sale ends {}", end.format("%b %-d, %Y")));
                } else {
                    text.push_str("  on sale");
                }
            }
            lines.push(Line::from(text));
        }
    }

    lines
}

fn draw_error_panel(
    f: &mut Frame,
    error: &ApiError,
    fallback_title: &'static str,
    debug: bool,
    in_detail: bool,
    area: Rect,
) {
    let presentation = error_presentation(error, fallback_title);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(presentation.color))
        .title(format!(" {} {} ", presentation.glyph, presentation.title));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", error.message()),
            Style::default().fg(presentation.color),
        )),
        Line::from(""),
        Line::from("  r: Try Again"),
    ];
    if in_detail {
        lines.push(Line::from("  Esc: Back to Games"));
    }
    if debug {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  status={} code={} {:?}", error.status(), error.code(), error),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}

fn draw_pagination(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.pagination.summary()));
    let bar = Paragraph::new(pagination_line(&state.pagination))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(bar, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        String::from(" Loading... ")
    } else {
        let hints = match state.view {
            View::List => " ↑/↓:select | Enter:open | ←/→:page | r:reload | ?:help | q:quit ",
            View::Detail(_) => " Esc:back | ↑/↓:scroll | r:reload | o:Steam | ?:help | q:quit ",
        };
        if state.time_ms > 0 {
            format!("{}| {}ms ", hints, state.time_ms)
        } else {
            hints.to_string()
        }
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_snackbar(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(snackbar) = &state.snackbar else {
        return;
    };
    let (glyph, color) = severity_style(snackbar.severity);

    let width = (snackbar.message.chars().count() as u16 + 12).min(area.width);
    let height = 3u16.min(area.height);
    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title_bottom(Line::from(" x ").right_aligned());
    let text = Line::from(vec![
        Span::styled(format!(" {} ", glyph), Style::default().fg(color).bold()),
        Span::raw(snackbar.message.clone()),
    ]);

    f.render_widget(Clear, popup_area);
    f.render_widget(Paragraph::new(text).block(block), popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 GAMEDECK - Keyboard Shortcuts

 CATALOG
   ↑ / ↓  (k / j)     Select game
   Enter              Open game details
   ← / →  (p / n)     Previous / next page
   Home / End         First / last page

 FEEDS
   a                  All games
   f                  Free games
   s                  On sale
   /                  Search
   c                  Browse a category

 DETAILS
   Esc / b            Back to games
   ↑ / ↓              Scroll
   o                  View on Steam

 GENERAL
   r                  Reload / try again
   x                  Dismiss notification
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_prompt_popup(f: &mut Frame, title: &str, input: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().bg(Color::Black));

    let prompt = Paragraph::new(input.to_string())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(prompt, popup_area);

    let max_x = popup_area.x + popup_area.width.saturating_sub(2);
    let cursor_x = (popup_area.x + input.chars().count() as u16 + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, popup_area.y + 1));
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
