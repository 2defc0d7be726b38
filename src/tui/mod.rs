//! Terminal user interface: state, event loop, and rendering.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui. Every frame re-derives each card's
//! clock strings from the current instant; the periodic redraw driven by
//! the poll timeout is what makes the clocks tick.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod clock_card;
pub mod search;
pub mod status_bar;
pub mod theme;
pub mod world_map;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::catalog;
use crate::clock;
use crate::constants::APP_NAME;
use crate::insight::{InsightClient, InsightState};
use crate::locale;
use crate::models::City;
use crate::selection::Selection;

pub use clock_card::ClockCard;
pub use search::SearchState;
pub use status_bar::{StatusBar, Toast};
pub use theme::{Theme, ThemeMode};
pub use world_map::WorldMap;

/// Cards per grid row.
const CARDS_PER_ROW: u16 = 4;
/// Height of one card row (content plus borders).
const CARD_ROW_HEIGHT: u16 = 7;

/// Central application state.
///
/// The selection is owned here and only ever mutated through its add and
/// remove operations; every other field is presentation state.
pub struct AppState {
    /// The user's city selection (single owner of the mutable list)
    pub selection: Selection,
    /// Search box state
    pub search: SearchState,
    /// Index of the keyboard-focused card
    pub selected_card: usize,
    /// Theme preference, cycled with `t`
    pub theme_mode: ThemeMode,
    /// Concrete theme resolved from the mode each frame
    pub theme: Theme,
    /// Insight service client
    pub insight_client: InsightClient,
    /// In-flight and completed insight fetches
    pub insights: InsightState,
    /// City id whose insight panel is open, if any
    pub insight_city: Option<String>,
    /// Status message shown in the status bar
    pub status_message: String,
    /// Error message, shown until the next status update
    pub error_message: Option<String>,
    /// Transient share confirmation
    pub toast: Option<Toast>,
    /// Set when the user quits
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state around an initialized selection.
    #[must_use]
    pub fn new(selection: Selection, theme_mode: ThemeMode, insight_client: InsightClient) -> Self {
        let theme = Theme::from_mode(theme_mode);
        Self {
            selection,
            search: SearchState::default(),
            selected_card: 0,
            theme_mode,
            theme,
            insight_client,
            insights: InsightState::new(),
            insight_city: None,
            status_message: String::new(),
            error_message: None,
            toast: None,
            should_quit: false,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// The current catalog matches for the search query.
    #[must_use]
    pub fn search_results(&self) -> Vec<City> {
        catalog::search(&self.search.query, &self.selection.ids())
    }

    /// The city under keyboard focus.
    #[must_use]
    pub fn selected_city(&self) -> Option<&City> {
        self.selection.cities().get(self.selected_card)
    }

    /// Moves card focus right, wrapping.
    pub fn select_next_card(&mut self) {
        let len = self.selection.len();
        if len > 0 {
            self.selected_card = (self.selected_card + 1) % len;
        }
    }

    /// Moves card focus left, wrapping.
    pub fn select_prev_card(&mut self) {
        let len = self.selection.len();
        if len > 0 {
            self.selected_card = (self.selected_card + len - 1) % len;
        }
    }

    /// Removes the focused card from the selection.
    ///
    /// Its session insight is dropped with it; an open insight panel for
    /// that city closes. Focus clamps to the new last card.
    pub fn remove_selected(&mut self) {
        let Some(city) = self.selected_city().cloned() else {
            return;
        };
        self.selection.remove(&city.id);
        self.insights.forget(&city.id);
        if self.insight_city.as_deref() == Some(city.id.as_str()) {
            self.insight_city = None;
        }
        if self.selected_card >= self.selection.len() && self.selected_card > 0 {
            self.selected_card = self.selection.len() - 1;
        }
        self.set_status(format!("Removed {}", city.name));
    }

    /// Adds a city from the search results and clears the search box.
    pub fn add_city(&mut self, city: City) {
        let name = city.name.clone();
        if self.selection.add(city) {
            self.set_status(format!("Added {name}"));
        }
        self.search.clear();
    }

    /// Copies the shareable URL to the clipboard and shows the toast.
    ///
    /// The toast appears regardless of clipboard success; a clipboard
    /// failure is additionally surfaced as an error once the toast fades.
    /// A repeat share simply restarts the toast window.
    pub fn share(&mut self) {
        let url = self.selection.share_url();

        if let Err(e) =
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url.clone()))
        {
            self.set_error(format!("Failed to copy to clipboard: {e}"));
        }

        self.toast = Some(Toast::new("Link copied!"));
        self.status_message = url;
    }

    /// Cycles the theme mode: auto -> light -> dark -> auto.
    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.next();
        self.set_status(format!("Theme: {}", self.theme_mode.label()));
    }

    /// Opens the insight panel for the focused card, fetching if needed.
    pub fn request_insight(&mut self) {
        let Some(city) = self.selected_city().cloned() else {
            return;
        };

        self.insight_city = Some(city.id.clone());
        if self.insights.get(&city.id).is_some() || self.insights.is_loading_city(&city.id) {
            return;
        }

        let tz = locale::parse_tz(&city.timezone);
        let local_time = clock::city_time_now(tz).clock;
        if let Err(e) = self
            .insights
            .start_fetch(&self.insight_client, &city, local_time)
        {
            self.set_error(e.to_string());
            self.insight_city = None;
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop.
///
/// The poll timeout doubles as the clock tick: every pass through the loop
/// redraws all cards from the current instant, so each card updates at
/// sub-second granularity and stops updating the moment it is removed.
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Resolve the theme each pass; Auto can flip at the 6:00/18:00 edges
        state.theme = Theme::from_mode(state.theme_mode);

        // Expire the share toast after its fixed window
        if state.toast.as_ref().is_some_and(Toast::is_expired) {
            state.toast = None;
        }

        terminal.draw(|f| render(f, state))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break;
                    }
                }
                _ => {} // Resize redraws on the next pass
            }
        }

        // Pick up a finished insight fetch, if any
        state.insights.poll();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handles one key event. Returns true when the user quit.
fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if state.search.active {
        handle_search_key(state, key);
        return Ok(false);
    }

    if state.insight_city.is_some() {
        // Esc or i closes the panel; other keys keep working underneath
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('i')) {
            state.insight_city = None;
            return Ok(false);
        }
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('/') => {
            state.search.active = true;
            state.set_status("");
        }
        KeyCode::Left | KeyCode::Char('h') => state.select_prev_card(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => state.select_next_card(),
        KeyCode::Char('x') | KeyCode::Delete => state.remove_selected(),
        KeyCode::Char('s') => state.share(),
        KeyCode::Char('t') => state.toggle_theme(),
        KeyCode::Char('i') => state.request_insight(),
        _ => {}
    }

    Ok(false)
}

/// Handles keys while the search box has focus.
fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.search.clear(),
        KeyCode::Backspace => state.search.backspace(),
        KeyCode::Down => {
            let visible = state.search.visible(&state.search_results()).len();
            state.search.select_next(visible);
        }
        KeyCode::Up => {
            let visible = state.search.visible(&state.search_results()).len();
            state.search.select_prev(visible);
        }
        KeyCode::Enter => {
            let results = state.search_results();
            let visible = state.search.visible(&results);
            if let Some(city) = visible.get(state.search.selected).cloned() {
                state.add_city(city);
            }
        }
        KeyCode::Char(c) => state.search.input(c),
        _ => {}
    }
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search input
            Constraint::Min(CARD_ROW_HEIGHT),
            Constraint::Length(12), // World map
            Constraint::Length(2),  // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    search::render_input(f, chunks[1], &state.search, &state.theme);
    render_cards(f, chunks[2], state);

    let highlighted = state.selected_city().map(|c| c.id.clone());
    f.render_widget(
        WorldMap::new(
            state.selection.cities(),
            highlighted.as_deref(),
            &state.theme,
        ),
        chunks[3],
    );

    StatusBar::render(f, chunks[4], state, &state.theme);

    // Overlays last: search dropdown, then the insight panel
    let results = state.search_results();
    search::render_results(f, chunks[1], &state.search, &results, &state.theme);

    if let Some(city_id) = &state.insight_city {
        render_insight_panel(f, state, city_id);
    }
}

/// Render title bar with the app name and detected timezone
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            format!(" ◷ {APP_NAME} "),
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "— {} cities — detected {}",
                state.selection.len(),
                state.selection.detected_timezone()
            ),
            Style::default().fg(state.theme.text_muted),
        ),
    ]);

    let widget = Paragraph::new(title)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(state.theme.text_muted)),
        )
        .style(Style::default().bg(state.theme.background));
    f.render_widget(widget, area);
}

/// Render the clock-card grid, four cards to a row.
fn render_cards(f: &mut Frame, area: Rect, state: &AppState) {
    let cities = state.selection.cities();
    if cities.is_empty() {
        let empty = Paragraph::new("No cities selected. Press / to add one.")
            .style(Style::default().fg(state.theme.text_muted))
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let rows = cities.chunks(CARDS_PER_ROW as usize);
    let row_constraints: Vec<Constraint> = rows
        .clone()
        .map(|_| Constraint::Length(CARD_ROW_HEIGHT))
        .collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_index, row_cities) in rows.enumerate() {
        let Some(row_area) = row_areas.get(row_index) else {
            break; // Terminal too short for further rows
        };
        let col_constraints: Vec<Constraint> = (0..CARDS_PER_ROW)
            .map(|_| Constraint::Ratio(1, u32::from(CARDS_PER_ROW)))
            .collect();
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col_index, city) in row_cities.iter().enumerate() {
            let index = row_index * CARDS_PER_ROW as usize + col_index;
            let tz = locale::parse_tz(&city.timezone);
            let time = clock::city_time_now(tz);
            ClockCard::render(
                f,
                col_areas[col_index],
                city,
                &time,
                state.selection.is_local(city),
                index == state.selected_card,
                &state.theme,
            );
        }
    }
}

/// Render the insight popup for a city.
fn render_insight_panel(f: &mut Frame, state: &AppState, city_id: &str) {
    let Some(city) = state.selection.cities().iter().find(|c| c.id == city_id) else {
        return;
    };

    let area = centered_rect(60, 40, f.area());

    let lines: Vec<Line> = if let Some(insight) = state.insights.get(city_id) {
        vec![
            Line::from(Span::styled(
                insight.summary.clone(),
                Style::default().fg(state.theme.text),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Tip: ", Style::default().fg(state.theme.accent)),
                Span::styled(
                    insight.culture_tip.clone(),
                    Style::default().fg(state.theme.text_secondary),
                ),
            ]),
            Line::from(vec![
                Span::styled("Vibe: ", Style::default().fg(state.theme.accent)),
                Span::styled(
                    insight.current_vibe.clone(),
                    Style::default().fg(state.theme.success),
                ),
            ]),
        ]
    } else {
        vec![Line::from(Span::styled(
            "Fetching insight...",
            Style::default().fg(state.theme.text_muted),
        ))]
    };

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(state.theme.primary))
            .title(format!(" {} right now ", city.name))
            .title_style(Style::default().fg(state.theme.primary))
            .style(Style::default().bg(state.theme.surface)),
    );

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}

/// Centers a percentage-sized rect inside `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HubStore;

    fn test_state() -> AppState {
        let selection = Selection::initialize(
            Some("cities=london,tokyo"),
            HubStore::disabled(),
            "Europe/London".to_string(),
        );
        AppState::new(selection, ThemeMode::Dark, InsightClient::new(None, None))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut state = test_state();
        assert!(handle_key_event(&mut state, press(KeyCode::Char('q'))).unwrap());

        let mut state = test_state();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut state, ctrl_c).unwrap());
    }

    #[test]
    fn test_card_navigation_wraps() {
        let mut state = test_state();
        assert_eq!(state.selected_card, 0);
        state.select_next_card();
        assert_eq!(state.selected_card, 1);
        state.select_next_card();
        assert_eq!(state.selected_card, 0);
        state.select_prev_card();
        assert_eq!(state.selected_card, 1);
    }

    #[test]
    fn test_remove_selected_clamps_focus() {
        let mut state = test_state();
        state.selected_card = 1;
        state.remove_selected();
        assert_eq!(state.selection.ids(), vec!["london"]);
        assert_eq!(state.selected_card, 0);
    }

    #[test]
    fn test_search_flow_adds_city() {
        let mut state = test_state();
        handle_key_event(&mut state, press(KeyCode::Char('/'))).unwrap();
        assert!(state.search.active);

        for c in "dubai".chars() {
            handle_key_event(&mut state, press(KeyCode::Char(c))).unwrap();
        }
        handle_key_event(&mut state, press(KeyCode::Enter)).unwrap();

        assert_eq!(state.selection.ids(), vec!["london", "tokyo", "dubai"]);
        // Adding clears the in-progress search text
        assert!(state.search.query.is_empty());
        assert!(!state.search.active);
    }

    #[test]
    fn test_search_esc_cancels() {
        let mut state = test_state();
        state.search.active = true;
        state.search.input('x');
        handle_key_event(&mut state, press(KeyCode::Esc)).unwrap();
        assert!(!state.search.active);
        assert!(state.search.query.is_empty());
    }

    #[test]
    fn test_theme_toggle_key() {
        let mut state = test_state();
        handle_key_event(&mut state, press(KeyCode::Char('t'))).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Auto);
        handle_key_event(&mut state, press(KeyCode::Char('t'))).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_insight_panel_toggles() {
        let mut state = test_state();
        handle_key_event(&mut state, press(KeyCode::Char('i'))).unwrap();
        assert_eq!(state.insight_city.as_deref(), Some("london"));
        handle_key_event(&mut state, press(KeyCode::Esc)).unwrap();
        assert!(state.insight_city.is_none());
    }

    #[test]
    fn test_status_helpers() {
        let mut state = test_state();
        state.set_error("boom");
        assert!(state.error_message.is_some());
        state.set_status("ok");
        assert!(state.error_message.is_none());
        assert_eq!(state.status_message, "ok");
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 40, area);
        assert!(rect.x > 0 && rect.y > 0);
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}
