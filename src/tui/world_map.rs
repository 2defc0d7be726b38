//! World-map panel: selected cities plotted on an equirectangular plane.
//!
//! The panel is a character grid standing in for the flat world map of the
//! web dashboard. Each selected city is projected to percentage coordinates
//! once per render and placed as a marker; a sparse graticule (equator,
//! prime meridian, tropics) gives the plane some orientation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use super::Theme;
use crate::models::City;
use crate::projector::project;

/// Widget plotting the selected cities on a flat world plane.
pub struct WorldMap<'a> {
    cities: &'a [City],
    highlighted: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> WorldMap<'a> {
    #[must_use]
    pub fn new(cities: &'a [City], highlighted: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            cities,
            highlighted,
            theme,
        }
    }

    /// Converts projected percentages to a cell inside `inner`.
    fn to_cell(inner: Rect, x_pct: f64, y_pct: f64) -> (u16, u16) {
        let w = f64::from(inner.width.saturating_sub(1));
        let h = f64::from(inner.height.saturating_sub(1));
        let col = inner.x + (x_pct / 100.0 * w).round() as u16;
        let row = inner.y + (y_pct / 100.0 * h).round() as u16;
        (col.min(inner.right().saturating_sub(1)), row.min(inner.bottom().saturating_sub(1)))
    }
}

impl Widget for WorldMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.text_muted))
            .title(" Global Node Network ")
            .title_style(Style::default().fg(self.theme.primary))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height < 2 {
            return;
        }

        let grid_style = Style::default().fg(self.theme.text_muted);

        // Graticule: equator and tropics as horizontal lines, prime meridian
        // and date line verticals, all placed through the same projection
        // the markers use.
        for lat in [66.5, 23.5, 0.0, -23.5, -66.5] {
            let (_, row) = Self::to_cell(inner, 0.0, project(lat, 0.0).1);
            let ch = if lat == 0.0 { '─' } else { '·' };
            for col in inner.x..inner.right() {
                if buf[(col, row)].symbol() == " " {
                    buf[(col, row)].set_char(ch).set_style(grid_style);
                }
            }
        }
        for lng in [-180.0, -90.0, 0.0, 90.0] {
            let (col, _) = Self::to_cell(inner, project(0.0, lng).0, 0.0);
            for row in inner.y..inner.bottom() {
                if buf[(col, row)].symbol() == " " || buf[(col, row)].symbol() == "·" {
                    buf[(col, row)].set_char('·').set_style(grid_style);
                }
            }
        }

        // City markers on top, labels to the right where they fit.
        for city in self.cities {
            let (x_pct, y_pct) = project(city.lat, city.lng);
            let (col, row) = Self::to_cell(inner, x_pct, y_pct);

            let is_highlighted = self.highlighted == Some(city.id.as_str());
            let marker_style = if is_highlighted {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary)
            };

            buf[(col, row)].set_char('◉').set_style(marker_style);

            let label = format!(" {}", city.name);
            let room = usize::from(inner.right().saturating_sub(col + 1));
            if room >= label.len() {
                buf.set_string(col + 1, row, &label, Style::default().fg(self.theme.text_muted));
            }
        }
    }
}
