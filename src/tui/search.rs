//! City search box with a results dropdown.
//!
//! The filter itself lives in [`crate::catalog::search`]; this widget owns
//! the query text, the highlighted row, and the display cap of five rows.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::Theme;
use crate::constants::SEARCH_RESULT_CAP;
use crate::models::City;

/// Search input state.
#[derive(Debug, Default)]
pub struct SearchState {
    /// Current query text
    pub query: String,
    /// Whether the search box has keyboard focus
    pub active: bool,
    /// Highlighted row in the visible results
    pub selected: usize,
}

impl SearchState {
    /// Appends a typed character to the query.
    pub fn input(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    /// Removes the last character of the query.
    pub fn backspace(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    /// Clears the query and drops focus (after an add or Esc).
    pub fn clear(&mut self) {
        self.query.clear();
        self.selected = 0;
        self.active = false;
    }

    /// Moves the highlight down within the visible rows.
    pub fn select_next(&mut self, visible: usize) {
        if visible > 0 {
            self.selected = (self.selected + 1) % visible;
        }
    }

    /// Moves the highlight up within the visible rows.
    pub fn select_prev(&mut self, visible: usize) {
        if visible > 0 {
            self.selected = (self.selected + visible - 1) % visible;
        }
    }

    /// Caps the match set to the rows the dropdown shows.
    #[must_use]
    pub fn visible<'a>(&self, results: &'a [City]) -> &'a [City] {
        &results[..results.len().min(SEARCH_RESULT_CAP)]
    }
}

/// Renders the search input row.
pub fn render_input(f: &mut Frame, area: Rect, state: &SearchState, theme: &Theme) {
    let border_style = if state.active {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let content = if state.query.is_empty() && !state.active {
        Line::from(Span::styled(
            "Press / to add another city...",
            Style::default().fg(theme.text_muted),
        ))
    } else {
        Line::from(vec![
            Span::styled(state.query.clone(), Style::default().fg(theme.text)),
            Span::styled(
                if state.active { "▌" } else { "" },
                Style::default().fg(theme.accent),
            ),
        ])
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ")
            .title_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(input, area);
}

/// Renders the results dropdown directly under the input row.
///
/// Does nothing when there are no matches, hiding the panel.
pub fn render_results(
    f: &mut Frame,
    input_area: Rect,
    state: &SearchState,
    results: &[City],
    theme: &Theme,
) {
    let visible = state.visible(results);
    if visible.is_empty() {
        return;
    }

    let height = visible.len() as u16 + 2;
    let area = Rect {
        x: input_area.x,
        y: input_area.y + input_area.height,
        width: input_area.width,
        height,
    };

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, city)| {
            let style = if i == state.selected {
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}, {}", city.name, city.country), style),
                Span::styled(
                    format!("  {}", city.timezone),
                    Style::default().fg(theme.text_muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface)),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_input_and_backspace() {
        let mut state = SearchState::default();
        state.input('l');
        state.input('o');
        assert_eq!(state.query, "lo");
        state.backspace();
        assert_eq!(state.query, "l");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = SearchState {
            query: "tok".to_string(),
            active: true,
            selected: 2,
        };
        state.clear();
        assert!(state.query.is_empty());
        assert!(!state.active);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = SearchState::default();
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected, 0);
        state.select_prev(3);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_visible_caps_results() {
        let state = SearchState::default();
        // Query "a" matches most of the catalog; the dropdown shows 5.
        let results = catalog::search("a", &[]);
        assert!(results.len() > SEARCH_RESULT_CAP);
        assert_eq!(state.visible(&results).len(), SEARCH_RESULT_CAP);
    }
}
