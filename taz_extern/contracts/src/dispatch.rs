use std::future::Future;

use taz_models::contact::ContactForm;
use taz_utils::cancel::CancelSignal;
use thiserror::Error;

/// Delivers a sanitized contact form to the team.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDispatchService: Send + Sync + 'static {
    /// Deliver `form`. Aborts with [`ContactDispatchError::Cancelled`] once
    /// `cancel` fires.
    fn dispatch(
        &self,
        form: &ContactForm,
        cancel: CancelSignal,
    ) -> impl Future<Output = Result<(), ContactDispatchError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactDispatchError {
    #[error("The dispatch has been cancelled.")]
    Cancelled,
    #[error("The dispatch timed out.")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactDispatchService {
    pub fn with_dispatch(
        mut self,
        form: ContactForm,
        result: Result<(), ContactDispatchError>,
    ) -> Self {
        self.expect_dispatch()
            .once()
            .withf(move |f, _| *f == form)
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
