use std::{
    sync::{Arc, LazyLock, Mutex},
    time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use taz_core_contact_contracts::spam_guard::ContactSpamGuardService;
use taz_di::Build;
use taz_models::{
    contact::ContactForm,
    spam::{SpamRejection, SuspicionReport, SuspicionWarning},
};
use taz_storage_contracts::StorageService;
use taz_utils::trace_instrument;

/// Storage key of the submission history, a list of unix timestamps in
/// milliseconds.
pub const SUBMISSION_HISTORY_KEY: &str = "taz_form_submissions";

pub const SPAM_KEYWORDS: [&str; 5] = ["viagra", "casino", "lottery", "click here", "free money"];

const MAX_LINKS: usize = 2;
const MIN_MESSAGE_LENGTH: usize = 15;
const MAX_REPEATED_CHARACTERS: usize = 9;

static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("https?://").unwrap());

#[derive(Debug, Clone, Build)]
pub struct ContactSpamGuardServiceImpl<Storage> {
    storage: Storage,
    config: ContactSpamGuardConfig,
    #[state]
    session: Arc<SpamGuardSession>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSpamGuardConfig {
    /// Minimum time between two accepted submissions of this process.
    pub cooldown: Duration,
    pub hourly_limit: usize,
    pub daily_limit: usize,
}

impl Default for ContactSpamGuardConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(3),
            hourly_limit: 5,
            daily_limit: 20,
        }
    }
}

#[derive(Debug, Default)]
struct SpamGuardSession {
    last_accepted: Mutex<Option<DateTime<Utc>>>,
    history_lock: tokio::sync::Mutex<()>,
}

impl SpamGuardSession {
    fn last_accepted(&self) -> Option<DateTime<Utc>> {
        *self.last_accepted.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn set_last_accepted(&self, value: Option<DateTime<Utc>>) {
        *self.last_accepted.lock().unwrap_or_else(|err| err.into_inner()) = value;
    }
}

impl<Storage> ContactSpamGuardService for ContactSpamGuardServiceImpl<Storage>
where
    Storage: StorageService,
{
    #[trace_instrument(skip(self))]
    async fn check(&self, now: DateTime<Utc>) -> Result<(), SpamRejection> {
        if let Some(last) = self.session.last_accepted() {
            let cooling_down = (now - last)
                .to_std()
                .map_or(true, |elapsed| elapsed < self.config.cooldown);
            if cooling_down {
                return Err(SpamRejection::Cooldown);
            }
        }

        let history = self.history().await;

        if count_within(&history, now, TimeDelta::hours(1)) >= self.config.hourly_limit {
            return Err(SpamRejection::HourlyLimit {
                limit: self.config.hourly_limit,
            });
        }

        if count_within(&history, now, TimeDelta::days(1)) >= self.config.daily_limit {
            return Err(SpamRejection::DailyLimit {
                limit: self.config.daily_limit,
            });
        }

        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn record(&self, now: DateTime<Utc>) {
        let _guard = self.session.history_lock.lock().await;

        self.session.set_last_accepted(Some(now));

        let mut history = self.history().await;
        history.push(now.timestamp_millis());

        let cutoff = (now - TimeDelta::days(1)).timestamp_millis();
        history.retain(|&timestamp| timestamp > cutoff);

        if let Err(err) = self
            .storage
            .set(SUBMISSION_HISTORY_KEY, &history, None)
            .await
        {
            tracing::error!("Failed to save submission history: {err:#}");
        }
    }

    #[trace_instrument(skip(self, form))]
    fn detect_suspicious_patterns(&self, form: &ContactForm) -> SuspicionReport {
        let message = form.message.as_str();
        let mut report = SuspicionReport::default();

        let links = LINK_REGEX.find_iter(message).count();
        if links > MAX_LINKS {
            report.push(SuspicionWarning::TooManyLinks { count: links });
        }

        let lowercase = message.to_lowercase();
        for keyword in SPAM_KEYWORDS {
            if lowercase.contains(keyword) {
                report.push(SuspicionWarning::SpamKeyword {
                    keyword: keyword.into(),
                });
            }
        }

        if message.trim().chars().count() < MIN_MESSAGE_LENGTH {
            report.push(SuspicionWarning::TooShort);
        }

        if longest_run(message) > MAX_REPEATED_CHARACTERS {
            report.push(SuspicionWarning::RepeatedCharacters);
        }

        report
    }

    #[trace_instrument(skip(self))]
    async fn submissions_last_hour(&self, now: DateTime<Utc>) -> usize {
        count_within(&self.history().await, now, TimeDelta::hours(1))
    }

    #[trace_instrument(skip(self))]
    async fn submissions_last_day(&self, now: DateTime<Utc>) -> usize {
        count_within(&self.history().await, now, TimeDelta::days(1))
    }

    #[trace_instrument(skip(self))]
    async fn reset(&self) {
        let _guard = self.session.history_lock.lock().await;

        if let Err(err) = self.storage.remove(SUBMISSION_HISTORY_KEY).await {
            tracing::error!("Failed to remove submission history: {err:#}");
        }
        self.session.set_last_accepted(None);
    }
}

impl<Storage> ContactSpamGuardServiceImpl<Storage>
where
    Storage: StorageService,
{
    async fn history(&self) -> Vec<i64> {
        match self
            .storage
            .get::<Vec<i64>>(SUBMISSION_HISTORY_KEY)
            .await
        {
            Ok(history) => history.unwrap_or_default(),
            Err(err) => {
                tracing::warn!("Failed to load submission history, assuming none: {err:#}");
                Vec::new()
            }
        }
    }
}

/// Number of timestamps strictly after `now - window`.
fn count_within(history: &[i64], now: DateTime<Utc>, window: TimeDelta) -> usize {
    let cutoff = (now - window).timestamp_millis();
    history
        .iter()
        .filter(|&&timestamp| timestamp > cutoff)
        .count()
}

/// Length of the longest run of identical characters, line breaks excluded.
fn longest_run(message: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut previous = None;

    for c in message.chars() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            run = 0;
            previous = None;
            continue;
        }
        run = if previous == Some(c) { run + 1 } else { 1 };
        previous = Some(c);
        longest = longest.max(run);
    }

    longest
}
