use std::future::Future;

use taz_models::{
    contact::{ContactForm, ContactFormField, ValidationErrors},
    spam::SpamRejection,
};
use tokio::sync::broadcast;

pub mod spam_guard;

/// Owns the contact form and drives a submission from the first click to the
/// final notification.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Returns the current contents of the form.
    fn form(&self) -> ContactForm;

    /// Returns the field errors of the last submission attempt that have not
    /// been edited since.
    fn errors(&self) -> ValidationErrors;

    fn state(&self) -> SubmissionState;

    /// Subscribe to every subsequent state transition.
    fn subscribe(&self) -> broadcast::Receiver<SubmissionState>;

    /// Set the value of a single field and clear its error.
    ///
    /// Editing is allowed while a submission is in progress.
    fn update_field(&self, field: ContactFormField, value: String);

    /// Submit the current form.
    ///
    /// Returns [`SubmissionOutcome::Ignored`] if another submission is still
    /// in progress.
    fn submit(&self) -> impl Future<Output = SubmissionOutcome> + Send;

    /// Cancel the submission that is currently in progress, if any. A
    /// submission cancelled before its dispatch has started is never
    /// dispatched.
    fn cancel(&self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Rejected,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Rejected | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Another submission was still in progress.
    Ignored,
    /// The spam guard refused the submission.
    Rejected(SpamRejection),
    /// At least one field is invalid.
    Invalid(ValidationErrors),
    Succeeded,
    /// The form could not be delivered.
    Failed,
    Cancelled,
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_form(mut self, form: ContactForm) -> Self {
        self.expect_form().once().return_const(form);
        self
    }

    pub fn with_update_field(mut self, field: ContactFormField, value: String) -> Self {
        self.expect_update_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_const(());
        self
    }

    pub fn with_submit(mut self, result: SubmissionOutcome) -> Self {
        self.expect_submit()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
