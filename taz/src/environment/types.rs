use taz_core_contact_impl::{spam_guard::ContactSpamGuardServiceImpl, ContactFeatureServiceImpl};
use taz_core_theme_impl::ThemeFeatureServiceImpl;
use taz_extern_impl::{analytics::AnalyticsApiServiceImpl, dispatch::ContactDispatchServiceImpl};
use taz_shared_impl::{time::TimeServiceImpl, toast::ToastServiceImpl};
use taz_storage_impl::FileStorage;

// Storage
pub type Storage = FileStorage;

// Extern
pub type AnalyticsApi = AnalyticsApiServiceImpl;
pub type ContactDispatch = ContactDispatchServiceImpl;

// Shared
pub type Time = TimeServiceImpl;
pub type Toast = ToastServiceImpl;

// Core
pub type ContactFeature =
    ContactFeatureServiceImpl<Time, ContactSpamGuard, ContactDispatch, AnalyticsApi, Toast>;
pub type ContactSpamGuard = ContactSpamGuardServiceImpl<Storage>;

pub type ThemeFeature = ThemeFeatureServiceImpl<Storage>;
