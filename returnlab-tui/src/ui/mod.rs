//! Top-level UI layout: market tabs, active view, status bar.

pub mod histogram_view;
pub mod overlays;
pub mod stats_view;
pub mod status_bar;
pub mod table_view;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

use returnlab_runner::MarketOutcome;

use crate::app::{AppState, Overlay, View};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app);
    draw_market(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    if app.overlay == Overlay::Help {
        overlays::render_help(f, chunks[1]);
    }
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let titles: Vec<Line> = app
        .report
        .markets
        .iter()
        .map(|m| {
            let style = if m.is_failed() {
                theme::negative()
            } else {
                theme::secondary()
            };
            Line::from(Span::styled(format!(" {} ", m.name()), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.selected)
        .highlight_style(theme::panel_title(true))
        .divider("|");
    f.render_widget(tabs, area);
}

fn draw_market(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(outcome) = app.current() else {
        overlays::render_message(f, area, "No markets configured.");
        return;
    };

    let title = match outcome {
        MarketOutcome::Completed(_) => {
            format!(" {} Stats [{}] ", outcome.name(), app.view.label())
        }
        MarketOutcome::Failed(_) => format!(" {} Stats [error] ", outcome.name()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(title)
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match outcome {
        MarketOutcome::Failed(failure) => overlays::render_failure(f, inner, failure),
        MarketOutcome::Completed(report) => match app.view {
            View::Table => table_view::render(f, inner, report, app.table_offset),
            View::Statistics => stats_view::render(f, inner, report),
            View::Histograms => histogram_view::render(f, inner, report),
        },
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
