use std::future::Future;

use chrono::{DateTime, Utc};
use taz_models::{
    contact::ContactForm,
    spam::{SpamRejection, SuspicionReport},
};

/// Rate limiting and content heuristics for contact form submissions.
///
/// The time of the last accepted submission is only kept in memory, while
/// the history of accepted submissions is durable.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactSpamGuardService: Send + Sync + 'static {
    /// Check whether a submission at `now` is allowed.
    ///
    /// The cooldown is checked first, then the hourly and finally the daily
    /// limit.
    fn check(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), SpamRejection>> + Send;

    /// Record a successful submission at `now`.
    ///
    /// Storage failures are logged and otherwise ignored.
    fn record(&self, now: DateTime<Utc>) -> impl Future<Output = ()> + Send;

    /// Inspect the message for typical spam content. The result is purely
    /// advisory.
    fn detect_suspicious_patterns(&self, form: &ContactForm) -> SuspicionReport;

    /// Number of recorded submissions within the hour before `now`.
    fn submissions_last_hour(&self, now: DateTime<Utc>) -> impl Future<Output = usize> + Send;

    /// Number of recorded submissions within the day before `now`.
    fn submissions_last_day(&self, now: DateTime<Utc>) -> impl Future<Output = usize> + Send;

    /// Forget all recorded submissions.
    fn reset(&self) -> impl Future<Output = ()> + Send;
}

#[cfg(feature = "mock")]
impl MockContactSpamGuardService {
    pub fn with_check(mut self, now: DateTime<Utc>, result: Result<(), SpamRejection>) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(now))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_record(mut self, now: DateTime<Utc>) -> Self {
        self.expect_record()
            .once()
            .with(mockall::predicate::eq(now))
            .return_once(|_| Box::pin(std::future::ready(())));
        self
    }

    pub fn with_detect_suspicious_patterns(
        mut self,
        form: ContactForm,
        result: SuspicionReport,
    ) -> Self {
        self.expect_detect_suspicious_patterns()
            .once()
            .with(mockall::predicate::eq(form))
            .return_const(result);
        self
    }
}
