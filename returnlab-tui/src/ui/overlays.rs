//! Help overlay and the full-panel message and failure screens.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use returnlab_runner::MarketFailure;

use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keyboard ")
        .title_style(theme::panel_title(true));

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, "Markets");
    key(&mut lines, "Tab / l / Right", "Next market");
    key(&mut lines, "Shift+Tab / h / Left", "Previous market");
    lines.push(Line::from(""));
    section(&mut lines, "Views");
    key(&mut lines, "1", "Table");
    key(&mut lines, "2", "Statistics");
    key(&mut lines, "3", "Histograms");
    key(&mut lines, "v", "Cycle views");
    key(&mut lines, "j / k, PgDn / PgUp", "Scroll table");
    key(&mut lines, "g / Home", "Back to first year");
    lines.push(Line::from(""));
    section(&mut lines, "General");
    key(&mut lines, "r", "Reload config and input files");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q / Esc", "Quit");

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::header())));
}

fn key(lines: &mut Vec<Line<'static>>, keys: &'static str, action: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:<22}"), theme::accent()),
        Span::styled(action, theme::secondary()),
    ]));
}

/// A market that failed: category, stage and the error message verbatim.
pub fn render_failure(f: &mut Frame, area: Rect, failure: &MarketFailure) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Error ", theme::negative()),
            Span::styled(
                format!("[{}] during {}", failure.error.category, failure.error.stage),
                theme::warning(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            failure.error.message.as_str(),
            theme::secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Other markets are unaffected. Fix the input and press r to reload.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

pub fn render_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(msg, theme::muted()))),
        area,
    );
}
