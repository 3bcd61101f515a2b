//! Overlaid frequency histogram built on ratatui's [`Chart`].
//!
//! Each series is drawn as vertical bars at its bin centers; the second
//! series is nudged right by a quarter bin so both stay visible where they
//! share a bin.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget},
};
use returnlab_core::stats::OverlayHistogram;

use crate::theme::Theme;

pub struct HistogramChart<'a> {
    hist: &'a OverlayHistogram,
    theme: &'a Theme,
}

impl<'a> HistogramChart<'a> {
    pub fn new(hist: &'a OverlayHistogram, theme: &'a Theme) -> Self {
        Self { hist, theme }
    }
}

/// Bar points per series: `(bin center + offset, count)`, zero bins skipped.
fn series_points(hist: &OverlayHistogram) -> Vec<Vec<(f64, f64)>> {
    let centers = hist.centers();
    let width = hist
        .edges
        .windows(2)
        .next()
        .map(|w| w[1] - w[0])
        .unwrap_or(0.0);

    hist.series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let offset = width * 0.25 * i as f64;
            centers
                .iter()
                .zip(&s.counts)
                .filter(|&(_, &c)| c > 0)
                .map(|(&x, &c)| (x + offset, c as f64))
                .collect()
        })
        .collect()
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spec = &self.hist.spec;
        let block = Block::default()
            .title(format!(" {} ", spec.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.neutral));

        if self.hist.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(
                inner.x,
                inner.y,
                "no values",
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let points = series_points(self.hist);
        let datasets: Vec<Dataset> = self
            .hist
            .series
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(i, (s, data))| {
                Dataset::default()
                    .name(format!("{} ({})", s.label, s.total))
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Bar)
                    .style(Style::default().fg(self.theme.series_color(i)))
                    .data(data)
            })
            .collect();

        let x_lo = self.hist.edges.first().copied().unwrap_or(0.0);
        let x_hi = self.hist.edges.last().copied().unwrap_or(1.0);
        let y_hi = (self.hist.max_count().max(1) as f64 * 1.1).ceil();
        let muted = Style::default().fg(self.theme.muted);

        let chart = Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .x_axis(
                Axis::default()
                    .title(Span::styled(spec.x_label.as_str(), muted))
                    .style(muted)
                    .bounds([x_lo, x_hi])
                    .labels(vec![
                        Span::styled(format!("{x_lo:.1}"), muted),
                        Span::styled(format!("{:.1}", (x_lo + x_hi) / 2.0), muted),
                        Span::styled(format!("{x_hi:.1}"), muted),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(spec.y_label.as_str(), muted))
                    .style(muted)
                    .bounds([0.0, y_hi])
                    .labels(vec![
                        Span::styled("0", muted),
                        Span::styled(format!("{y_hi:.0}"), muted),
                    ]),
            );

        chart.render(area, buf);
    }
}
