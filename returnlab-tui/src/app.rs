//! Application state: single-owner, main-thread only.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use returnlab_runner::{run_study, MarketOutcome, StudyConfig, StudyReport};

/// Which view of the selected market is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Table,
    Statistics,
    Histograms,
}

impl View {
    pub const ALL: [View; 3] = [View::Table, View::Statistics, View::Histograms];

    pub fn index(self) -> usize {
        match self {
            View::Table => 0,
            View::Statistics => 1,
            View::Histograms => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        View::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Table => "Table",
            View::Statistics => "Statistics",
            View::Histograms => "Histograms",
        }
    }

    pub fn next(self) -> Self {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// All dashboard state.
pub struct AppState {
    pub running: bool,
    pub config: StudyConfig,
    /// Where the configuration came from, if not built in.
    pub config_path: Option<PathBuf>,
    pub report: StudyReport,
    pub selected: usize,
    pub view: View,
    pub overlay: Overlay,
    /// First table row shown in the Table view.
    pub table_offset: usize,
    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    /// Run the study once and build the initial state.
    pub fn new(config: StudyConfig, config_path: Option<PathBuf>) -> Self {
        let report = run_study(&config);
        Self::with_report(config, config_path, report)
    }

    pub fn with_report(
        config: StudyConfig,
        config_path: Option<PathBuf>,
        report: StudyReport,
    ) -> Self {
        let mut app = Self {
            running: true,
            config,
            config_path,
            report,
            selected: 0,
            view: View::Table,
            overlay: Overlay::None,
            table_offset: 0,
            status_message: None,
        };
        app.announce_load();
        app
    }

    /// Re-read the configuration file (if any) and every input source.
    pub fn reload(&mut self) {
        if let Some(path) = &self.config_path {
            match StudyConfig::from_file(path) {
                Ok(config) => self.config = config,
                Err(e) => {
                    self.set_error(format!("Config not reloaded: {e}"));
                    return;
                }
            }
        }

        let keep = self.current().map(|m| m.id().to_string());
        self.report = run_study(&self.config);
        self.selected = 0;
        if let Some(id) = keep {
            self.select_market(&id);
        }
        self.table_offset = 0;
        self.announce_load();
        tracing::info!(markets = self.report.markets.len(), "study reloaded");
    }

    fn announce_load(&mut self) {
        let failed = self.report.failed_count();
        let total = self.report.markets.len();
        if failed == 0 {
            self.set_status(format!("Loaded {total} markets from {}", self.report.data_dir));
        } else {
            self.set_warning(format!("{failed} of {total} markets failed"));
        }
    }

    pub fn current(&self) -> Option<&MarketOutcome> {
        self.report.markets.get(self.selected)
    }

    pub fn market_count(&self) -> usize {
        self.report.markets.len()
    }

    pub fn next_market(&mut self) {
        let n = self.market_count();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
            self.table_offset = 0;
        }
    }

    pub fn prev_market(&mut self) {
        let n = self.market_count();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
            self.table_offset = 0;
        }
    }

    /// Select a market by id. Returns false if no such market was run.
    pub fn select_market(&mut self, id: &str) -> bool {
        match self.report.markets.iter().position(|m| m.id() == id) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    fn row_count(&self) -> usize {
        self.current()
            .and_then(MarketOutcome::report)
            .map(|r| r.records.len())
            .unwrap_or(0)
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let max = self.row_count().saturating_sub(1);
        self.table_offset = (self.table_offset + rows).min(max);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.table_offset = self.table_offset.saturating_sub(rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.table_offset = 0;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use super::*;

    pub fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../returnlab-runner/tests/fixtures")
    }

    pub fn fixture_app() -> AppState {
        let mut config = StudyConfig::builtin();
        config.data_dir = fixtures();
        AppState::new(config, None)
    }

    pub fn broken_app() -> AppState {
        let mut config = StudyConfig::builtin();
        config.data_dir = PathBuf::from("/nonexistent/returnlab-data");
        AppState::new(config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn view_cycles() {
        assert_eq!(View::Table.next(), View::Statistics);
        assert_eq!(View::Histograms.next(), View::Table);
        assert_eq!(View::from_index(2), Some(View::Histograms));
        assert_eq!(View::from_index(3), None);
    }

    #[test]
    fn market_navigation_wraps() {
        let mut app = fixture_app();
        assert_eq!(app.current().unwrap().id(), "ftse");
        app.prev_market();
        assert_eq!(app.current().unwrap().id(), "sp500");
        app.next_market();
        app.next_market();
        assert_eq!(app.current().unwrap().id(), "nikkei");
    }

    #[test]
    fn scroll_is_bounded_by_rows() {
        let mut app = fixture_app();
        app.scroll_down(100);
        assert_eq!(app.table_offset, 4);
        app.scroll_up(1);
        assert_eq!(app.table_offset, 3);
        app.next_market();
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn failures_raise_a_warning() {
        let app = broken_app();
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Warning);
        assert!(msg.contains("3 of 3"));
    }

    #[test]
    fn reload_keeps_selected_market() {
        let mut app = fixture_app();
        assert!(app.select_market("sp500"));
        app.reload();
        assert_eq!(app.current().unwrap().id(), "sp500");
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Info);
    }

    #[test]
    fn reload_with_bad_config_file_keeps_old_report() {
        let mut app = fixture_app();
        app.config_path = Some(PathBuf::from("/nonexistent/returnlab.toml"));
        app.reload();
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Error);
        assert_eq!(app.report.failed_count(), 0);
    }
}
