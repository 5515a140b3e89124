pub mod chart;
pub mod dashboard;
pub mod setup;
pub mod ui;
