use crate::client::RiskSource;
use crate::domain::risk::RiskSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Latest known value of a revalidating risk fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionState {
    pub data: Option<RiskSnapshot>,
    pub is_loading: bool,
}

impl SubscriptionState {
    fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
        }
    }
}

/// Polls a [`RiskSource`] for one symbol and publishes the latest result.
///
/// A failed poll keeps the previous value. The polling task is aborted on drop.
#[derive(Debug)]
pub struct RiskSubscription {
    symbol: String,
    rx: watch::Receiver<SubscriptionState>,
    task: Option<JoinHandle<()>>,
}

impl RiskSubscription {
    pub fn spawn(source: Arc<dyn RiskSource>, symbol: impl Into<String>, interval: Duration) -> Self {
        let symbol = symbol.into();
        let (tx, rx) = watch::channel(SubscriptionState::loading());

        // No key, no fetch: stay in the loading state.
        let task = (!symbol.is_empty()).then(|| {
            let symbol = symbol.clone();
            tokio::spawn(poll(source, symbol, interval, tx))
        });

        Self { symbol, rx, task }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn current(&self) -> SubscriptionState {
        self.rx.borrow().clone()
    }

    /// A receiver that observes every subsequent update.
    pub fn watch(&self) -> watch::Receiver<SubscriptionState> {
        self.rx.clone()
    }
}

impl Drop for RiskSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll(
    source: Arc<dyn RiskSource>,
    symbol: String,
    interval: Duration,
    tx: watch::Sender<SubscriptionState>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match source.fetch_risk_snapshot(&symbol).await {
            Ok(data) => {
                tracing::debug!(%symbol, has_risk = data.is_some(), "risk subscription refreshed");
                tx.send_replace(SubscriptionState {
                    is_loading: data.is_none(),
                    data,
                });
            }
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::warn!(%symbol, error = %format!("{err:#}"), "risk subscription refresh failed; keeping last value");
            }
        }

        if tx.is_closed() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        calls: AtomicUsize,
        // Answers by call index; past the end the last answer repeats.
        answers: Vec<Option<f64>>,
    }

    #[async_trait::async_trait]
    impl RiskSource for FixedSource {
        async fn fetch_risk_snapshot(&self, _symbol: &str) -> anyhow::Result<Option<RiskSnapshot>> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answers[i.min(self.answers.len() - 1)] {
                Some(v) => Ok(Some(RiskSnapshot { risk_percent: v })),
                None => anyhow::bail!("backend down"),
            }
        }
    }

    fn source(answers: Vec<Option<f64>>) -> Arc<FixedSource> {
        Arc::new(FixedSource {
            calls: AtomicUsize::new(0),
            answers,
        })
    }

    #[tokio::test]
    async fn publishes_first_result() {
        let sub = RiskSubscription::spawn(source(vec![Some(42.0)]), "AAPL", Duration::from_secs(60));
        assert!(sub.current().is_loading);

        let mut rx = sub.watch();
        rx.changed().await.unwrap();
        let state = rx.borrow().clone();
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(RiskSnapshot { risk_percent: 42.0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_last_value() {
        let src = source(vec![Some(10.0), None]);
        let sub = RiskSubscription::spawn(src.clone(), "MSFT", Duration::from_secs(30));
        let mut rx = sub.watch();
        rx.changed().await.unwrap();

        tokio::time::sleep(Duration::from_secs(95)).await;
        assert!(src.calls.load(Ordering::SeqCst) >= 3);
        assert_eq!(sub.current().data, Some(RiskSnapshot { risk_percent: 10.0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_symbol_never_fetches() {
        let src = source(vec![Some(1.0)]);
        let sub = RiskSubscription::spawn(src.clone(), "", Duration::from_secs(1));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(src.calls.load(Ordering::SeqCst), 0);
        assert!(sub.current().is_loading);
    }

    #[test]
    fn failed_refresh_is_reported_to_sentry() {
        let events = sentry::test::with_captured_events(|| {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let src = source(vec![None]);
                let sub = RiskSubscription::spawn(src.clone(), "AMZN", Duration::from_secs(60));
                while src.calls.load(Ordering::SeqCst) == 0 {
                    tokio::task::yield_now().await;
                }
                tokio::task::yield_now().await;
                assert!(sub.current().is_loading);
            });
        });
        assert_eq!(events.len(), 1);
    }
}
