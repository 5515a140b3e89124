//! Chart data for the exchange rate history panel.

use crate::core::model::ExchangeRates;

/// Day labels of the chart, oldest first. The last column is the fetched rate.
pub const HISTORY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Today"];

// Reference week shown before today's value
const USD_TRAILING: [f64; 6] = [0.00023, 0.00026, 0.00028, 0.00024, 0.00023, 0.00025];
const EUR_TRAILING: [f64; 6] = [0.00022, 0.00023, 0.00025, 0.00024, 0.00026, 0.00027];

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateHistory {
    pub labels: Vec<&'static str>,
    pub series: Vec<Series>,
}

impl RateHistory {
    /// Builds the USD and EUR series ending with today's rates.
    pub fn with_today(rates: &ExchangeRates) -> Self {
        let series_for = |name, trailing: &[f64], today: f64| Series {
            name,
            points: trailing.iter().copied().chain([today]).collect(),
        };

        Self {
            labels: HISTORY_LABELS.to_vec(),
            series: vec![
                series_for("USD", &USD_TRAILING, rates.usd),
                series_for("EUR", &EUR_TRAILING, rates.eur),
            ],
        }
    }

    /// Smallest and largest point across all series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .filter(|p| p.is_finite())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}
