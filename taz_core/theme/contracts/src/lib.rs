use std::future::Future;

use taz_models::theme::ThemeMode;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ThemeFeatureService: Send + Sync + 'static {
    /// Returns the persisted theme or the configured default.
    fn get(&self) -> impl Future<Output = ThemeMode> + Send;

    /// Persist `mode` as the selected theme.
    fn set(&self, mode: ThemeMode) -> impl Future<Output = ()> + Send;

    /// Switch between dark and light mode and return the new mode.
    fn toggle(&self) -> impl Future<Output = ThemeMode> + Send;

    /// Returns the `theme-color` of the current theme.
    fn theme_color(&self) -> impl Future<Output = &'static str> + Send;
}

#[cfg(feature = "mock")]
impl MockThemeFeatureService {
    pub fn with_get(mut self, result: ThemeMode) -> Self {
        self.expect_get()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_set(mut self, mode: ThemeMode) -> Self {
        self.expect_set()
            .once()
            .with(mockall::predicate::eq(mode))
            .return_once(|_| Box::pin(std::future::ready(())));
        self
    }
}
