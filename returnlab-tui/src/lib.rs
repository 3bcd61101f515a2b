//! ReturnLab TUI: terminal dashboard for the return study.
//!
//! One tab per market with three views:
//! - Table: the adjusted yearly table
//! - Statistics: pure vs. dividend- and inflation-adjusted summaries
//! - Histograms: the two overlaid return distributions

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{AppState, View};
pub use theme::Theme;
