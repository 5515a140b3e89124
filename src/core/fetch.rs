//! Runs one fetch cycle against a [`DashboardSource`].

use crate::core::error::FetchError;
use crate::core::model::DashboardData;
use crate::core::source::DashboardSource;
use futures::future::join;
use tracing::{debug, error};

/// Fetches exchange rates and the financial summary concurrently.
///
/// Both requests are started before either is awaited and both are allowed to
/// settle. Any failure fails the whole cycle; there is no partial result.
/// When both fail, the exchange rates error is returned and both are logged.
pub async fn acquire(
    source: &(dyn DashboardSource + Send + Sync),
) -> Result<DashboardData, FetchError> {
    debug!("Starting fetch cycle");
    let (rates, summary) = join(source.fetch_rates(), source.fetch_summary()).await;

    if let Err(e) = &rates {
        error!(error = %e, resource = %e.resource(), "Failed to fetch dashboard data");
    }
    if let Err(e) = &summary {
        error!(error = %e, resource = %e.resource(), "Failed to fetch dashboard data");
    }

    let data = DashboardData {
        rates: rates?,
        summary: summary?,
    };
    debug!(?data, "Fetch cycle complete");
    Ok(data)
}
