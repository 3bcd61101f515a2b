//! Table view: the adjusted yearly table, one row per year.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use returnlab_core::domain::Column;
use returnlab_runner::MarketReport;

use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, report: &MarketReport, offset: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    f.render_widget(
        Paragraph::new(header_lines(report)).wrap(Wrap { trim: true }),
        chunks[0],
    );
    render_table(f, chunks[1], report, offset);
}

fn header_lines(report: &MarketReport) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    if let Some(note) = &report.note {
        lines.push(Line::from(vec![
            Span::styled("Important: ", theme::warning()),
            Span::styled(note.as_str(), theme::secondary()),
        ]));
    }
    let span = report
        .year_span()
        .map(|(a, b)| format!("{a}-{b}"))
        .unwrap_or_default();
    lines.push(Line::from(Span::styled(
        format!(
            "{} rows, {span}   [j/k] scroll  [1/2/3] view  [Tab] market",
            report.records.len()
        ),
        theme::muted(),
    )));
    lines
}

fn render_table(f: &mut Frame, area: Rect, report: &MarketReport, offset: usize) {
    let palette = Theme::default();

    let mut header_cells = vec![Cell::from("Year")];
    header_cells.extend(Column::ALL.iter().map(|c| Cell::from(c.header())));
    let header = Row::new(header_cells).style(theme::header());

    let rows: Vec<Row> = report
        .records
        .iter()
        .skip(offset)
        .map(|r| {
            let mut cells = vec![Cell::from(r.year.to_string())];
            cells.extend(Column::ALL.iter().map(|&c| match r.get(c) {
                Some(v) => Cell::from(Span::styled(
                    format!("{v:.2}"),
                    Style::default().fg(palette.return_color(v)),
                )),
                None => Cell::from(Span::styled("NaN", theme::warning())),
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(6)];
    widths.extend(Column::ALL.iter().map(|c| Constraint::Min(c.header().len() as u16)));

    let table = Table::new(rows, widths).header(header).column_spacing(2);
    f.render_widget(table, area);
}
