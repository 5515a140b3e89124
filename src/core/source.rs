//! Remote data source abstraction

use crate::core::error::FetchError;
use crate::core::model::{ExchangeRates, FinancialSummary};
use async_trait::async_trait;

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<ExchangeRates, FetchError>;
    async fn fetch_summary(&self) -> Result<FinancialSummary, FetchError>;
}
