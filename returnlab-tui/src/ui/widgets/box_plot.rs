//! Horizontal box-and-whisker widget for a [`SummaryStatistics`] block.
//!
//! Whiskers run from min to max, the box from p25 to p75, with a median
//! marker. Two plots given the same `range` line up column for column.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use returnlab_core::stats::SummaryStatistics;

use crate::theme::Theme;

pub struct BoxPlot<'a> {
    title: &'a str,
    stats: &'a SummaryStatistics,
    range: (f64, f64),
    theme: &'a Theme,
}

impl<'a> BoxPlot<'a> {
    pub fn new(title: &'a str, stats: &'a SummaryStatistics, theme: &'a Theme) -> Self {
        Self {
            title,
            stats,
            range: (stats.min, stats.max),
            theme,
        }
    }

    /// Draw against a shared value range instead of this block's own min/max.
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.range = (lo.min(self.stats.min), hi.max(self.stats.max));
        self
    }
}

impl Widget for BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.neutral));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let (lo, hi) = self.range;
        let span = hi - lo;
        if span < 1e-12 {
            buf.set_string(
                inner.x,
                inner.y,
                format!("All values = {:.2}", self.stats.p50),
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let plot_left = inner.x;
        let plot_width = inner.width;
        let val_to_x = |v: f64| -> u16 {
            let frac = ((v - lo) / span).clamp(0.0, 1.0);
            plot_left + (frac * plot_width.saturating_sub(1) as f64).round() as u16
        };

        let x_min = val_to_x(self.stats.min);
        let x_p25 = val_to_x(self.stats.p25);
        let x_med = val_to_x(self.stats.p50);
        let x_p75 = val_to_x(self.stats.p75);
        let x_max = val_to_x(self.stats.max);

        let whisker_style = Style::default().fg(self.theme.muted);
        let box_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let median_style = Style::default()
            .fg(self.theme.warning)
            .add_modifier(Modifier::BOLD);

        // Row 0: the plot
        let y = inner.y;
        for x in x_min..x_p25 {
            buf.set_string(x, y, "\u{2500}", whisker_style); // ─
        }
        for x in (x_p75 + 1)..=x_max {
            buf.set_string(x, y, "\u{2500}", whisker_style);
        }
        buf.set_string(x_min, y, "\u{2502}", whisker_style); // │
        buf.set_string(x_max, y, "\u{2502}", whisker_style);
        for x in (x_p25 + 1)..x_p75 {
            buf.set_string(x, y, "\u{2550}", box_style); // ═
        }
        buf.set_string(x_p25, y, "\u{251C}", box_style); // ├
        buf.set_string(x_p75, y, "\u{2524}", box_style); // ┤
        buf.set_string(x_med, y, "\u{253C}", median_style); // ┼

        // Row 1: min / median / max labels
        let val_y = inner.y + 1;
        let left_label = format!("{:.2}", self.stats.min);
        let med_label = format!("{:.2}", self.stats.p50);
        let right_label = format!("{:.2}", self.stats.max);

        buf.set_string(
            x_min,
            val_y,
            &left_label,
            Style::default().fg(self.theme.return_color(self.stats.min)),
        );
        let med_x = x_med.saturating_sub(med_label.len() as u16 / 2);
        let left_end = x_min + left_label.len() as u16;
        if med_x > left_end && med_x + (med_label.len() as u16) < inner.right() {
            buf.set_string(med_x, val_y, &med_label, median_style);
        }
        let right_x = (x_max + 1)
            .saturating_sub(right_label.len() as u16)
            .max(inner.x);
        if right_x > med_x + med_label.len() as u16 {
            buf.set_string(
                right_x,
                val_y,
                &right_label,
                Style::default().fg(self.theme.return_color(self.stats.max)),
            );
        }
    }
}
