//! Core data acquisition and view state abstractions

pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod log;
pub mod model;
pub mod source;
pub mod state;

// Re-export main types for cleaner imports
pub use error::{FetchError, Resource};
pub use model::{DashboardData, ExchangeRates, FinancialSummary};
pub use source::DashboardSource;
pub use state::{Render, Screen, ViewState};
