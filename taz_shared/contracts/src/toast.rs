use taz_models::toast::ToastNotice;

/// Displays at most one [`ToastNotice`] at a time.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ToastService: Send + Sync + 'static {
    /// Show `notice`, replacing the notice that is currently visible.
    fn show(&self, notice: ToastNotice);

    /// Hide the current notice.
    fn dismiss(&self);

    /// Returns the notice that is currently visible.
    fn current(&self) -> Option<ToastNotice>;
}

#[cfg(feature = "mock")]
impl MockToastService {
    pub fn with_show(mut self, notice: ToastNotice) -> Self {
        self.expect_show()
            .once()
            .with(mockall::predicate::eq(notice))
            .return_const(());
        self
    }
}
