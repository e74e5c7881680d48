use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use taz_core_contact_contracts::{
    spam_guard::ContactSpamGuardService, ContactFeatureService, SubmissionOutcome,
    SubmissionState,
};
use taz_di::Build;
use taz_extern_contracts::{
    analytics::AnalyticsApiService,
    dispatch::{ContactDispatchError, ContactDispatchService},
};
use taz_models::{
    analytics::AnalyticsEvent,
    contact::{ContactForm, ContactFormField, ValidationErrors},
    toast::ToastNotice,
};
use taz_shared_contracts::{time::TimeService, toast::ToastService};
use taz_utils::{
    cancel::{cancellation, CancelHandle, CancelSignal},
    trace_instrument,
};
use tokio::sync::broadcast;

pub mod sanitize;
pub mod spam_guard;
pub mod validate;

#[cfg(test)]
mod tests;

pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form.";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We will contact you soon.";
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";
pub const CANCELLED_MESSAGE: &str = "Sending the message has been cancelled.";

/// Field name reported in analytics when the spam guard rejects a submission.
const SPAM_ERROR_FIELD: &str = "spam";

#[derive(Debug, Clone, Build)]
#[cfg_attr(test, derive(Default))]
pub struct ContactFeatureServiceImpl<Time, SpamGuard, Dispatch, AnalyticsApi, Toast> {
    time: Time,
    spam_guard: SpamGuard,
    dispatch: Dispatch,
    analytics_api: AnalyticsApi,
    toast: Toast,
    config: ContactFeatureConfig,
    #[state]
    state: Arc<ContactFormState>,
}

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Default))]
pub struct ContactFeatureConfig {
    /// Name of the form as reported in analytics events.
    pub form_name: String,
    /// How long notices stay visible. Zero keeps them until replaced.
    pub toast_duration: Duration,
    /// Upper bound for reporting a single analytics event.
    pub analytics_timeout: Duration,
}

#[derive(Debug)]
struct ContactFormState {
    inner: Mutex<FormInner>,
    transitions: broadcast::Sender<SubmissionState>,
}

#[derive(Debug, Default)]
struct FormInner {
    form: ContactForm,
    errors: ValidationErrors,
    state: SubmissionState,
    cancel: Option<CancelHandle>,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self {
            inner: Default::default(),
            transitions: broadcast::channel(16).0,
        }
    }
}

impl ContactFormState {
    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn transition(&self, inner: &mut FormInner, state: SubmissionState) {
        tracing::debug!(from = ?inner.state, to = ?state, "Submission state changed");
        inner.state = state;
        // nobody listening is fine
        let _ = self.transitions.send(state);
    }

    /// Enter [`SubmissionState::Submitting`] unless a submission is already
    /// in progress. The returned signal fires once the submission is
    /// cancelled, which may happen before the dispatch has started.
    fn begin(&self) -> Option<(SubmittingGuard<'_>, CancelSignal)> {
        let mut inner = self.lock();
        if inner.state == SubmissionState::Submitting {
            return None;
        }
        let (handle, signal) = cancellation();
        inner.cancel = Some(handle);
        self.transition(&mut inner, SubmissionState::Submitting);
        Some((SubmittingGuard(self), signal))
    }
}

/// Returns the form to [`SubmissionState::Idle`] when the submission ends,
/// even if the submitting future is dropped.
struct SubmittingGuard<'a>(&'a ContactFormState);

impl SubmittingGuard<'_> {
    fn finish(self, state: SubmissionState) {
        let mut inner = self.0.lock();
        inner.cancel = None;
        self.0.transition(&mut inner, state);
        // Drop moves on to Idle
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.0.lock();
        inner.cancel = None;
        if inner.state != SubmissionState::Idle {
            self.0.transition(&mut inner, SubmissionState::Idle);
        }
    }
}

impl<Time, SpamGuard, Dispatch, AnalyticsApi, Toast> ContactFeatureService
    for ContactFeatureServiceImpl<Time, SpamGuard, Dispatch, AnalyticsApi, Toast>
where
    Time: TimeService,
    SpamGuard: ContactSpamGuardService,
    Dispatch: ContactDispatchService,
    AnalyticsApi: AnalyticsApiService,
    Toast: ToastService,
{
    fn form(&self) -> ContactForm {
        self.state.lock().form.clone()
    }

    fn errors(&self) -> ValidationErrors {
        self.state.lock().errors.clone()
    }

    fn state(&self) -> SubmissionState {
        self.state.lock().state
    }

    fn subscribe(&self) -> broadcast::Receiver<SubmissionState> {
        self.state.transitions.subscribe()
    }

    #[trace_instrument(skip(self, value))]
    fn update_field(&self, field: ContactFormField, value: String) {
        let mut inner = self.state.lock();
        inner.form.set(field, value);
        inner.errors.remove(field);
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> SubmissionOutcome {
        let Some((guard, signal)) = self.state.begin() else {
            tracing::debug!("Submission already in progress");
            return SubmissionOutcome::Ignored;
        };

        let mut events = Vec::new();
        let outcome = self.run_submission(signal, &mut events).await;

        guard.finish(match outcome {
            SubmissionOutcome::Succeeded => SubmissionState::Succeeded,
            SubmissionOutcome::Rejected(_) | SubmissionOutcome::Invalid(_) => {
                SubmissionState::Rejected
            }
            SubmissionOutcome::Failed
            | SubmissionOutcome::Cancelled
            | SubmissionOutcome::Ignored => SubmissionState::Failed,
        });

        // the form is idle again, a slow analytics backend only delays the caller
        for event in events {
            self.track(event).await;
        }

        outcome
    }

    #[trace_instrument(skip(self))]
    fn cancel(&self) {
        if let Some(handle) = &self.state.lock().cancel {
            handle.cancel();
        }
    }
}

impl<Time, SpamGuard, Dispatch, AnalyticsApi, Toast>
    ContactFeatureServiceImpl<Time, SpamGuard, Dispatch, AnalyticsApi, Toast>
where
    Time: TimeService,
    SpamGuard: ContactSpamGuardService,
    Dispatch: ContactDispatchService,
    AnalyticsApi: AnalyticsApiService,
    Toast: ToastService,
{
    /// Run a single submission. Analytics events are collected in `events`
    /// and reported once the submission has finished.
    async fn run_submission(
        &self,
        signal: CancelSignal,
        events: &mut Vec<AnalyticsEvent>,
    ) -> SubmissionOutcome {
        if let Err(rejection) = self.spam_guard.check(self.time.now()).await {
            let reason = rejection.to_string();
            self.notify(ToastNotice::warning(&reason));
            events.push(AnalyticsEvent::form_error(
                &self.config.form_name,
                SPAM_ERROR_FIELD,
                &reason,
            ));
            return SubmissionOutcome::Rejected(rejection);
        }

        let form = self.state.lock().form.clone();

        let errors = validate::validate(&form);
        self.state.lock().errors = errors.clone();
        if !errors.is_empty() {
            self.notify(ToastNotice::error(INVALID_FORM_MESSAGE));
            events.extend(errors.messages().into_iter().map(|(field, message)| {
                AnalyticsEvent::form_error(&self.config.form_name, field.as_str(), &message)
            }));
            return SubmissionOutcome::Invalid(errors);
        }

        let report = self.spam_guard.detect_suspicious_patterns(&form);
        if !report.is_empty() {
            tracing::warn!(%report, "Suspicious contact form submission");
        }

        let form = sanitize::sanitize(&form);

        let result = if signal.is_cancelled() {
            Err(ContactDispatchError::Cancelled)
        } else {
            self.dispatch.dispatch(&form, signal).await
        };

        match result {
            Ok(()) => {
                self.spam_guard.record(self.time.now()).await;
                {
                    let mut inner = self.state.lock();
                    inner.form = ContactForm::default();
                    inner.errors = ValidationErrors::new();
                }
                self.notify(ToastNotice::success(SUCCESS_MESSAGE));
                events.push(AnalyticsEvent::form_submit(
                    &self.config.form_name,
                    ContactFormField::ALL.len(),
                ));
                SubmissionOutcome::Succeeded
            }
            Err(ContactDispatchError::Cancelled) => {
                self.notify(ToastNotice::info(CANCELLED_MESSAGE));
                SubmissionOutcome::Cancelled
            }
            Err(err) => {
                tracing::error!("Failed to dispatch contact form: {err:#}");
                self.notify(ToastNotice::error(FAILURE_MESSAGE));
                SubmissionOutcome::Failed
            }
        }
    }

    fn notify(&self, notice: ToastNotice) {
        self.toast
            .show(notice.with_auto_dismiss(self.config.toast_duration));
    }

    async fn track(&self, event: AnalyticsEvent) {
        match tokio::time::timeout(self.config.analytics_timeout, self.analytics_api.track(&event))
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!("Failed to track analytics event: {err:#}"),
            Err(_) => {
                tracing::warn!(event_name = &**event.name, "Tracking analytics event timed out")
            }
        }
    }
}
