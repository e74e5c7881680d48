use taz_config::Config;
use taz_core_contact_impl::{spam_guard::ContactSpamGuardConfig, ContactFeatureConfig};
use taz_core_theme_impl::ThemeFeatureConfig;
use taz_di::provider;
use taz_extern_impl::{
    analytics::AnalyticsApiServiceConfig, dispatch::ContactDispatchServiceConfig,
};
use types::Storage;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        storage: Storage,
        ..config: ConfigProvider {
            // Extern
            AnalyticsApiServiceConfig,
            ContactDispatchServiceConfig,

            // Core
            ContactFeatureConfig,
            ContactSpamGuardConfig,
            ThemeFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, storage: Storage) -> Self {
        Self {
            _cache: Default::default(),
            storage,
            config,
        }
    }

    /// Build a provider that persists to the storage file of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ConfigProvider::new(config),
            Storage::new(&config.storage.path),
        )
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // Extern
        analytics_api_service_config: AnalyticsApiServiceConfig,
        contact_dispatch_service_config: ContactDispatchServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        contact_spam_guard_config: ContactSpamGuardConfig,
        theme_feature_config: ThemeFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // Extern
        let analytics_api_service_config = match &config.analytics {
            Some(analytics) => AnalyticsApiServiceConfig::new(
                &analytics.measurement_id,
                &analytics.api_secret,
                analytics.client_id.clone(),
                analytics.endpoint_override.clone(),
                analytics.timeout.map(Into::into),
            ),
            None => AnalyticsApiServiceConfig::disabled(),
        };

        let contact_dispatch_service_config = ContactDispatchServiceConfig {
            delay: config.contact.dispatch.delay.into(),
            timeout: config.contact.dispatch.timeout.into(),
            simulate_failure: config.contact.dispatch.simulate_failure,
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            form_name: config.contact.form_name.clone(),
            toast_duration: config.toast.duration.into(),
            analytics_timeout: config.contact.analytics_timeout.into(),
        };

        let contact_spam_guard_config = ContactSpamGuardConfig {
            cooldown: config.contact.spam.cooldown.into(),
            hourly_limit: config.contact.spam.hourly_limit,
            daily_limit: config.contact.spam.daily_limit,
        };

        let theme_feature_config = ThemeFeatureConfig {
            prefer_dark: config.theme.prefer_dark,
        };

        Self {
            _cache: Default::default(),

            // Extern
            analytics_api_service_config,
            contact_dispatch_service_config,

            // Core
            contact_feature_config,
            contact_spam_guard_config,
            theme_feature_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use taz_config::DEFAULT_CONFIG_PATH;
    use taz_di::Provide;

    use super::*;
    use crate::environment::types::{ContactFeature, ContactSpamGuard, ThemeFeature};

    #[test]
    fn provide_features() {
        let config = taz_config::load_paths(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        let config_provider = ConfigProvider::new(&config);
        assert!(!config_provider.analytics_api_service_config.is_enabled());

        let storage = Storage::new(std::env::temp_dir().join("taz-environment-test.json"));
        let mut provider = Provider::new(config_provider, storage);

        let _: ContactFeature = provider.provide();
        let _: ContactSpamGuard = provider.provide();
        let _: ThemeFeature = provider.provide();
    }
}
