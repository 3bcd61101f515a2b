pub mod box_plot;
pub mod histogram;

pub use box_plot::BoxPlot;
pub use histogram::HistogramChart;
