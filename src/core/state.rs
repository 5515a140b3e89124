//! View state for one dashboard activation.
//!
//! A [`Screen`] starts in [`ViewState::Loading`], runs exactly one fetch cycle
//! in a background task and settles once to either [`ViewState::Ready`] or
//! [`ViewState::Failed`]. Reading or rendering the state never fetches again.

use crate::core::error::FetchError;
use crate::core::fetch::acquire;
use crate::core::model::{DashboardData, ExchangeRates, FinancialSummary};
use crate::core::source::DashboardSource;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(DashboardData),
    Failed(Arc<FetchError>),
}

/// What the presentation layer should draw for a given state.
#[derive(Debug, Clone)]
pub enum Render {
    Loading,
    Ready {
        data: DashboardData,
        /// `balance / income`, or `None` when that ratio is not finite.
        progress: Option<f64>,
    },
    Failed(Arc<FetchError>),
}

impl ViewState {
    /// Applies the outcome of a fetch cycle. Only `Loading` moves; a settled
    /// state is returned unchanged.
    pub fn settle(self, outcome: Result<DashboardData, FetchError>) -> ViewState {
        match self {
            ViewState::Loading => match outcome {
                Ok(data) => ViewState::Ready(data),
                Err(e) => ViewState::Failed(Arc::new(e)),
            },
            settled => {
                debug!("View already settled, ignoring fetch outcome");
                settled
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn rates(&self) -> Option<&ExchangeRates> {
        match self {
            ViewState::Ready(data) => Some(&data.rates),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&FinancialSummary> {
        match self {
            ViewState::Ready(data) => Some(&data.summary),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Failed(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn render(&self) -> Render {
        match self {
            ViewState::Loading => Render::Loading,
            ViewState::Ready(data) => {
                let ratio = data.summary.progress_ratio();
                Render::Ready {
                    data: *data,
                    progress: ratio.is_finite().then_some(ratio),
                }
            }
            ViewState::Failed(e) => Render::Failed(Arc::clone(e)),
        }
    }
}

/// One activation of the dashboard.
///
/// Dropping the screen aborts a fetch that is still in flight, so a torn
/// down screen is never written to.
pub struct Screen {
    state: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl Screen {
    /// Enters `Loading` and spawns the single fetch cycle for this activation.
    /// Must be called within a tokio runtime.
    pub fn activate(source: Arc<dyn DashboardSource + Send + Sync>) -> Self {
        let (tx, rx) = watch::channel(ViewState::Loading);

        let task = tokio::spawn(async move {
            let outcome = acquire(source.as_ref()).await;
            tx.send_modify(|state| {
                let current = std::mem::take(state);
                *state = current.settle(outcome);
            });
        });

        Self { state: rx, task }
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn render(&self) -> Render {
        self.state.borrow().render()
    }

    /// Waits until the fetch cycle has settled and returns the final state.
    pub async fn settled(&mut self) -> ViewState {
        let settled = self
            .state
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| ViewState::clone(&state));
        // The sender only goes away without settling if the task was aborted
        settled.unwrap_or_else(|_| self.state())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("Screen torn down before fetch settled, cancelling");
            self.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Resource;
    use crate::core::source::mock::StaticSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    const RATES: ExchangeRates = ExchangeRates {
        usd: 0.00024,
        eur: 0.00025,
    };
    const SUMMARY: FinancialSummary = FinancialSummary {
        income: 5000.0,
        expenses: 1200.0,
        balance: 3800.0,
    };
    const DATA: DashboardData = DashboardData {
        rates: RATES,
        summary: SUMMARY,
    };

    fn server_error() -> FetchError {
        FetchError::Protocol {
            resource: Resource::Summary,
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = ViewState::default();
        assert!(state.is_loading());
        assert!(state.rates().is_none());
        assert!(state.summary().is_none());
        assert!(matches!(state.render(), Render::Loading));
    }

    #[test]
    fn test_settle_success() {
        let state = ViewState::Loading.settle(Ok(DATA));

        assert!(!state.is_loading());
        assert_eq!(state.rates(), Some(&RATES));
        assert_eq!(state.summary(), Some(&SUMMARY));
        assert!(state.error().is_none());
        match state.render() {
            Render::Ready { data, progress } => {
                assert_eq!(data, DATA);
                assert_eq!(progress, Some(0.76));
            }
            other => panic!("Expected ready render, got {other:?}"),
        }
    }

    #[test]
    fn test_settle_failure_is_distinct_from_loading() {
        let state = ViewState::Loading.settle(Err(server_error()));

        assert!(!state.is_loading());
        assert!(state.rates().is_none());
        assert!(state.summary().is_none());
        assert_eq!(state.error().unwrap().resource(), Resource::Summary);
        assert!(matches!(state.render(), Render::Failed(_)));
    }

    #[test]
    fn test_settled_state_does_not_change() {
        let ready = ViewState::Loading.settle(Ok(DATA));
        let still_ready = ready.settle(Err(server_error()));
        assert_eq!(still_ready.rates(), Some(&RATES));

        let failed = ViewState::Loading.settle(Err(server_error()));
        let still_failed = failed.settle(Ok(DATA));
        assert!(still_failed.error().is_some());
        assert!(still_failed.rates().is_none());
    }

    #[test]
    fn test_zero_income_renders_without_progress() {
        let data = DashboardData {
            rates: RATES,
            summary: FinancialSummary {
                income: 0.0,
                expenses: 0.0,
                balance: 0.0,
            },
        };
        match ViewState::Loading.settle(Ok(data)).render() {
            Render::Ready { progress, .. } => assert!(progress.is_none()),
            other => panic!("Expected ready render, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_screen_settles_ready() {
        let source = Arc::new(StaticSource::new(Some(RATES), Some(SUMMARY)));
        let mut screen = Screen::activate(source.clone());

        let state = screen.settled().await;

        assert_eq!(state.rates(), Some(&RATES));
        assert_eq!(state.summary(), Some(&SUMMARY));
        assert!(!screen.state().is_loading());
    }

    #[tokio::test]
    async fn test_screen_settles_failed() {
        let source = Arc::new(StaticSource::new(Some(RATES), None));
        let mut screen = Screen::activate(source);

        let state = screen.settled().await;

        assert!(!state.is_loading());
        assert!(state.rates().is_none());
        assert!(state.summary().is_none());
        assert!(matches!(screen.render(), Render::Failed(_)));
    }

    #[tokio::test]
    async fn test_one_fetch_per_activation() {
        let source = Arc::new(StaticSource::new(Some(RATES), Some(SUMMARY)));
        let mut screen = Screen::activate(source.clone());
        screen.settled().await;

        for _ in 0..5 {
            assert!(matches!(screen.render(), Render::Ready { .. }));
            screen.settled().await;
        }
        assert_eq!(source.calls(), (1, 1));

        // A fresh activation is a fresh fetch cycle
        let mut second = Screen::activate(source.clone());
        second.settled().await;
        assert_eq!(source.calls(), (2, 2));
    }

    struct CancelFlag(Arc<AtomicBool>);

    impl Drop for CancelFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Never answers; records when its pending request is dropped.
    struct HangingSource {
        started: Arc<Notify>,
        cancelled: Arc<AtomicBool>,
    }

    #[async_trait]
    impl DashboardSource for HangingSource {
        async fn fetch_rates(&self) -> Result<ExchangeRates, FetchError> {
            let _flag = CancelFlag(Arc::clone(&self.cancelled));
            self.started.notify_one();
            std::future::pending().await
        }

        async fn fetch_summary(&self) -> Result<FinancialSummary, FetchError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_fetch() {
        let started = Arc::new(Notify::new());
        let cancelled = Arc::new(AtomicBool::new(false));
        let screen = Screen::activate(Arc::new(HangingSource {
            started: Arc::clone(&started),
            cancelled: Arc::clone(&cancelled),
        }));

        started.notified().await;
        assert!(screen.state().is_loading());
        assert!(!cancelled.load(Ordering::SeqCst));

        drop(screen);

        tokio::time::timeout(Duration::from_secs(5), async {
            while !cancelled.load(Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("pending fetch was not cancelled");
    }
}
