use std::time::Duration;

use taz_core_contact_contracts::{spam_guard::MockContactSpamGuardService, SubmissionState};
use taz_extern_contracts::{analytics::MockAnalyticsApiService, dispatch::MockContactDispatchService};
use taz_models::contact::ContactForm;
use taz_shared_contracts::{time::MockTimeService, toast::MockToastService};
use tokio::sync::broadcast;

use crate::{ContactFeatureConfig, ContactFeatureServiceImpl};

mod update_field;

type Sut = ContactFeatureServiceImpl<
    MockTimeService,
    MockContactSpamGuardService,
    MockContactDispatchService,
    MockAnalyticsApiService,
    MockToastService,
>;

const FORM_NAME: &str = "contact";
const TOAST_DURATION: Duration = Duration::from_secs(5);
const ANALYTICS_TIMEOUT: Duration = Duration::from_secs(5);

fn config() -> ContactFeatureConfig {
    ContactFeatureConfig {
        form_name: FORM_NAME.into(),
        toast_duration: TOAST_DURATION,
        analytics_timeout: ANALYTICS_TIMEOUT,
    }
}

impl Sut {
    fn with_form(self, form: &ContactForm) -> Self {
        self.state.lock().form = form.clone();
        self
    }
}

/// Collect all state transitions that have been broadcast so far.
fn transitions(rx: &mut broadcast::Receiver<SubmissionState>) -> Vec<SubmissionState> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}
