use taz_core_theme_contracts::ThemeFeatureService;
use taz_di::Build;
use taz_models::theme::ThemeMode;
use taz_storage_contracts::StorageService;
use taz_utils::trace_instrument;

pub const THEME_MODE_KEY: &str = "taz_theme_mode";

#[derive(Debug, Clone, Build)]
pub struct ThemeFeatureServiceImpl<Storage> {
    storage: Storage,
    config: ThemeFeatureConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeFeatureConfig {
    /// Whether to default to dark mode if no theme has been selected yet.
    pub prefer_dark: bool,
}

impl<Storage> ThemeFeatureService for ThemeFeatureServiceImpl<Storage>
where
    Storage: StorageService,
{
    #[trace_instrument(skip(self))]
    async fn get(&self) -> ThemeMode {
        let default = ThemeMode::from_prefers_dark(self.config.prefer_dark);
        match self.storage.get::<ThemeMode>(THEME_MODE_KEY).await {
            Ok(mode) => mode.unwrap_or(default),
            Err(err) => {
                tracing::warn!("Failed to load theme, using default: {err:#}");
                default
            }
        }
    }

    #[trace_instrument(skip(self))]
    async fn set(&self, mode: ThemeMode) {
        if let Err(err) = self.storage.set(THEME_MODE_KEY, &mode, None).await {
            tracing::error!("Failed to save theme: {err:#}");
        }
    }

    #[trace_instrument(skip(self))]
    async fn toggle(&self) -> ThemeMode {
        let mode = self.get().await.toggled();
        self.set(mode).await;
        mode
    }

    #[trace_instrument(skip(self))]
    async fn theme_color(&self) -> &'static str {
        self.get().await.theme_color()
    }
}
