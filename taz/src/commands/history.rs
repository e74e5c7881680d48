use chrono::DateTime;
use clap::Subcommand;
use taz_config::Config;
use taz_core_contact_contracts::spam_guard::ContactSpamGuardService;
use taz_core_contact_impl::spam_guard::SUBMISSION_HISTORY_KEY;
use taz_di::Provide;
use taz_shared_contracts::time::TimeService;
use taz_storage_contracts::StorageService;

use crate::environment::{
    types::{ContactSpamGuard, Storage, Time},
    Provider,
};

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum HistoryCommand {
    /// List recent submissions and the remaining rate limits
    #[command(aliases(["s", "ls"]))]
    Show,
    /// Forget all recorded submissions
    #[command(aliases(["c", "reset"]))]
    Clear,
}

impl HistoryCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut provider = Provider::from_config(&config);
        let spam_guard: ContactSpamGuard = provider.provide();

        match self {
            HistoryCommand::Show => {
                let storage: Storage = provider.provide();
                let time: Time = provider.provide();
                show(&config, &storage, &spam_guard, &time).await
            }
            HistoryCommand::Clear => {
                spam_guard.reset().await;
                println!("Submission history cleared");
                Ok(())
            }
        }
    }
}

async fn show(
    config: &Config,
    storage: &Storage,
    spam_guard: &ContactSpamGuard,
    time: &Time,
) -> anyhow::Result<()> {
    let history = storage
        .get::<Vec<i64>>(SUBMISSION_HISTORY_KEY)
        .await?
        .unwrap_or_default();

    for timestamp in &history {
        match DateTime::from_timestamp_millis(*timestamp) {
            Some(at) => println!("{}", at.to_rfc3339()),
            None => println!("{timestamp} (invalid)"),
        }
    }

    let now = time.now();
    let spam = &config.contact.spam;
    println!(
        "Last hour: {}/{}",
        spam_guard.submissions_last_hour(now).await,
        spam.hourly_limit
    );
    println!(
        "Last day: {}/{}",
        spam_guard.submissions_last_day(now).await,
        spam.daily_limit
    );

    Ok(())
}
