use std::time::Duration;

use anyhow::anyhow;
use taz_di::Build;
use taz_extern_contracts::dispatch::{ContactDispatchError, ContactDispatchService};
use taz_models::contact::ContactForm;
use taz_utils::cancel::CancelSignal;

/// Stand-in for the delivery backend: waits for `delay` and then reports
/// success, or a failure if `simulate_failure` is set.
#[derive(Debug, Clone, Build)]
pub struct ContactDispatchServiceImpl {
    config: ContactDispatchServiceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactDispatchServiceConfig {
    pub delay: Duration,
    pub timeout: Duration,
    pub simulate_failure: bool,
}

impl ContactDispatchService for ContactDispatchServiceImpl {
    #[tracing::instrument(level = "trace", skip(self, form, cancel))]
    async fn dispatch(
        &self,
        form: &ContactForm,
        mut cancel: CancelSignal,
    ) -> Result<(), ContactDispatchError> {
        let deliver = async {
            tokio::time::sleep(self.config.delay).await;
            if self.config.simulate_failure {
                return Err(ContactDispatchError::Other(anyhow!(
                    "Simulated delivery failure"
                )));
            }
            tracing::info!(
                has_phone = form.has_phone(),
                message_len = form.message.chars().count() as u64,
                "Contact form delivered"
            );
            Ok::<_, ContactDispatchError>(())
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ContactDispatchError::Cancelled),
            result = tokio::time::timeout(self.config.timeout, deliver) => {
                result.unwrap_or(Err(ContactDispatchError::Timeout))
            }
        }
    }
}
