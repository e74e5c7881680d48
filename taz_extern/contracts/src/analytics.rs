use std::future::Future;

use taz_models::analytics::AnalyticsEvent;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AnalyticsApiService: Send + Sync + 'static {
    /// Send a single event to the analytics backend.
    fn track(&self, event: &AnalyticsEvent) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockAnalyticsApiService {
    pub fn with_track(mut self, event: AnalyticsEvent) -> Self {
        self.expect_track()
            .once()
            .with(mockall::predicate::eq(event))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    /// The returned future never resolves, like a backend that stopped
    /// responding.
    pub fn with_track_pending(mut self, event: AnalyticsEvent) -> Self {
        self.expect_track()
            .once()
            .with(mockall::predicate::eq(event))
            .return_once(|_| Box::pin(std::future::pending::<anyhow::Result<()>>()));
        self
    }

    pub fn with_track_error(mut self, event: AnalyticsEvent) -> Self {
        self.expect_track()
            .once()
            .with(mockall::predicate::eq(event))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "analytics backend unavailable"
                ))))
            });
        self
    }
}
