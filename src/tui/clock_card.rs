//! Clock card widget: one city's live clock, date, and badges.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::clock::CityTime;
use crate::models::City;

/// Renders a single clock card.
pub struct ClockCard;

impl ClockCard {
    /// Draws the card for `city` into `area`.
    ///
    /// `is_local` marks the user's own detected location; `is_selected`
    /// highlights the card under keyboard focus.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        city: &City,
        time: &CityTime,
        is_local: bool,
        is_selected: bool,
        theme: &Theme,
    ) {
        let border_style = if is_selected {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text_muted)
        };

        let title = if is_local {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", city.name),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("[Your Location] ", Style::default().fg(theme.success)),
            ])
        } else {
            Line::from(Span::styled(
                format!(" {} ", city.name),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(theme.background));

        let badge_color = if time.is_daylight {
            theme.warning
        } else {
            theme.night
        };
        let badge_icon = if time.is_daylight { "☀" } else { "☾" };

        let position_line = if city.has_known_position() {
            format!("{:.2}N, {:.2}E", city.lat, city.lng)
        } else {
            "Detected Location".to_string()
        };

        let lines = vec![
            Line::from(Span::styled(
                city.country.to_uppercase(),
                Style::default().fg(theme.text_secondary),
            )),
            Line::from(Span::styled(
                time.clock.clone(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(time.date.clone(), Style::default().fg(theme.text_muted)),
                Span::raw("  "),
                Span::styled(time.offset_label(), Style::default().fg(theme.text_secondary)),
            ]),
            Line::from(Span::styled(
                format!("{badge_icon} {}", time.daylight_label()),
                Style::default().fg(badge_color),
            )),
            Line::from(Span::styled(
                position_line,
                Style::default().fg(theme.text_muted),
            )),
        ];

        let card = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(card, area);
    }
}
