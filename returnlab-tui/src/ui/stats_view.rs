//! Statistics view: both summary blocks side by side, box plots, provenance.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use returnlab_core::pipeline::ImputationBasis;
use returnlab_runner::MarketReport;

use crate::theme::{self, Theme};
use crate::ui::widgets::BoxPlot;

pub fn render(f: &mut Frame, area: Rect, report: &MarketReport) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(58), Constraint::Min(20)])
        .split(area);

    f.render_widget(Paragraph::new(summary_lines(report)), columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(3),
        ])
        .split(columns[1]);

    let palette = Theme::default();
    let raw = &report.raw_summary;
    let both = &report.combined_summary;
    let lo = raw.min.min(both.min);
    let hi = raw.max.max(both.max);
    f.render_widget(
        BoxPlot::new("Pure Returns", raw, &palette).range(lo, hi),
        right[0],
    );
    f.render_widget(
        BoxPlot::new("With Dividends and Inflation", both, &palette).range(lo, hi),
        right[1],
    );
    f.render_widget(
        Paragraph::new(provenance_lines(report)).wrap(Wrap { trim: true }),
        right[2],
    );
}

fn summary_lines(report: &MarketReport) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:<8}{:>16}{:>32}", "", "Pure Returns", "Dividends and Inflation Adj."),
            theme::header(),
        )),
        Line::from(""),
    ];
    for ((label, raw), (_, both)) in report
        .raw_summary
        .rows()
        .into_iter()
        .zip(report.combined_summary.rows())
    {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<8}"), theme::muted()),
            Span::styled(format!("{:>16}", cell(label, raw)), theme::accent()),
            Span::styled(format!("{:>32}", cell(label, both)), theme::accent()),
        ]));
    }
    lines
}

fn cell(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) if label == "count" => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
        None => "NaN".to_string(),
    }
}

fn provenance_lines(report: &MarketReport) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    let imp = &report.imputation;
    if let (Some(value), Some(basis)) = (imp.value, imp.basis) {
        let how = match basis {
            ImputationBasis::ObservedMean => "mean of observed years",
            ImputationBasis::Fallback => "configured constant",
        };
        lines.push(Line::from(Span::styled(
            format!(
                "Dividend yield: {} of {} years filled with {value:.2}% ({how})",
                imp.filled,
                report.records.len()
            ),
            theme::warning(),
        )));
    }

    if !report.flags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} missing inputs:", report.flags.len()),
            theme::negative(),
        )));
        for flag in report.flags.iter().take(5) {
            lines.push(Line::from(Span::styled(format!("  {flag}"), theme::negative())));
        }
    }

    let discarded = report.discarded_rows();
    if discarded > 0 {
        lines.push(Line::from(Span::styled(
            format!("{discarded} auxiliary rows without a return year were ignored"),
            theme::muted(),
        )));
    }

    lines.push(Line::from(Span::styled("Sources:", theme::muted())));
    for src in &report.sources {
        lines.push(Line::from(Span::styled(
            format!("  {} ({} rows, {})", src.path, src.rows, &src.hash[..12]),
            theme::secondary(),
        )));
    }
    lines
}
