//! Payload types returned by the dashboard endpoints

use serde::{Deserialize, Serialize};

/// Unit price of the local currency expressed in each foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub usd: f64,
    pub eur: f64,
}

/// Income, expenses and balance as reported by the summary endpoint.
///
/// The three fields are independent: `balance` is not checked against
/// `income - expenses`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl FinancialSummary {
    /// Share of income still available, `balance / income`.
    ///
    /// Not finite when `income` is zero. Callers decide how to display that.
    pub fn progress_ratio(&self) -> f64 {
        self.balance / self.income
    }
}

/// Result of one successful fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardData {
    pub rates: ExchangeRates,
    pub summary: FinancialSummary,
}
