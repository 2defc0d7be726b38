//! Status bar widget for status messages, the share toast, and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

use super::{AppState, Theme};
use crate::constants::TOAST_DURATION;

/// Transient confirmation shown after a share action.
///
/// A repeat share replaces the toast, restarting its window
/// (last-write-wins, no queueing).
#[derive(Debug, Clone)]
pub struct Toast {
    /// Message text, e.g. "Link copied!"
    pub message: String,
    created: Instant,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created: Instant::now(),
        }
    }

    /// Whether the fixed display window has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= TOAST_DURATION
    }
}

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Renders the status line and the key-hint line.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some(toast) = &state.toast {
            lines.push(Line::from(Span::styled(
                format!("✓ {}", toast.message),
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            )));
        } else if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::styled(error.clone(), Style::default().fg(theme.text)),
            ]));
        } else if !state.status_message.is_empty() {
            lines.push(Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.text),
            )));
        } else {
            lines.push(Self::hints_line(state, theme));
        }

        let bar = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.text_muted))
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(bar, area);
    }

    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hint_style = Style::default().fg(theme.text_muted);
        let key_style = Style::default().fg(theme.accent);

        let hints: Vec<(String, String)> = if state.search.active {
            [
                ("type", "filter"),
                ("↑/↓", "choose"),
                ("Enter", "add"),
                ("Esc", "cancel"),
            ]
            .iter()
            .map(|(k, a)| ((*k).to_string(), (*a).to_string()))
            .collect()
        } else {
            vec![
                ("/".to_string(), "search".to_string()),
                ("←/→".to_string(), "select card".to_string()),
                ("x".to_string(), "remove".to_string()),
                ("i".to_string(), "insight".to_string()),
                ("s".to_string(), "share".to_string()),
                (
                    "t".to_string(),
                    format!("theme ({})", state.theme_mode.label()),
                ),
                ("q".to_string(), "quit".to_string()),
            ]
        };

        let mut spans = Vec::new();
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", hint_style));
            }
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(format!(" {action}"), hint_style));
        }
        Line::from(spans)
    }
}
