//! Histograms view: raw vs. inflation-adjusted, raw vs. combined-adjusted.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use returnlab_runner::MarketReport;

use crate::theme::Theme;
use crate::ui::widgets::HistogramChart;

pub fn render(f: &mut Frame, area: Rect, report: &MarketReport) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let palette = Theme::default();
    f.render_widget(
        HistogramChart::new(&report.inflation_histogram, &palette),
        rows[0],
    );
    f.render_widget(
        HistogramChart::new(&report.combined_histogram, &palette),
        rows[1],
    );
}
