use std::time::Duration;

use pretty_assertions::assert_eq;
use taz_core_contact_contracts::{
    spam_guard::ContactSpamGuardService, ContactFeatureService, SubmissionOutcome,
    SubmissionState,
};
use taz_core_contact_impl::{
    spam_guard::{ContactSpamGuardConfig, ContactSpamGuardServiceImpl, SUBMISSION_HISTORY_KEY},
    ContactFeatureConfig, ContactFeatureServiceImpl,
};
use taz_demo::contact::{INVALID_FORM, VALID_FORM};
use taz_di::{provider, Provide};
use taz_extern_impl::{
    analytics::{AnalyticsApiServiceConfig, AnalyticsApiServiceImpl},
    dispatch::{ContactDispatchServiceConfig, ContactDispatchServiceImpl},
};
use taz_models::{
    contact::{ContactForm, ContactFormField},
    spam::SpamRejection,
    toast::ToastSeverity,
};
use taz_shared_contracts::toast::ToastService;
use taz_shared_impl::{time::TimeServiceImpl, toast::ToastServiceImpl};
use taz_storage_contracts::StorageService;
use taz_storage_impl::MemoryStorage;

type SpamGuard = ContactSpamGuardServiceImpl<MemoryStorage>;

type Contact = ContactFeatureServiceImpl<
    TimeServiceImpl,
    SpamGuard,
    ContactDispatchServiceImpl,
    AnalyticsApiServiceImpl,
    ToastServiceImpl,
>;

provider! {
    Provider {
        storage: MemoryStorage,
        contact_spam_guard_config: ContactSpamGuardConfig,
        contact_dispatch_service_config: ContactDispatchServiceConfig,
        analytics_api_service_config: AnalyticsApiServiceConfig,
        contact_feature_config: ContactFeatureConfig,
    }
}

struct Setup {
    contact: Contact,
    spam_guard: SpamGuard,
    toast: ToastServiceImpl,
    storage: MemoryStorage,
}

fn setup(simulate_failure: bool) -> Setup {
    let storage = MemoryStorage::new();
    let mut provider = Provider {
        _cache: Default::default(),
        storage: storage.clone(),
        contact_spam_guard_config: ContactSpamGuardConfig::default(),
        contact_dispatch_service_config: ContactDispatchServiceConfig {
            delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
            simulate_failure,
        },
        analytics_api_service_config: AnalyticsApiServiceConfig::disabled(),
        contact_feature_config: ContactFeatureConfig {
            form_name: "contact".into(),
            toast_duration: Duration::from_secs(5),
            analytics_timeout: Duration::from_secs(5),
        },
    };

    Setup {
        contact: provider.provide(),
        spam_guard: provider.provide(),
        toast: provider.provide(),
        storage,
    }
}

fn fill(contact: &Contact, form: &ContactForm) {
    for field in ContactFormField::ALL {
        contact.update_field(field, form.get(field).into());
    }
}

async fn history(storage: &MemoryStorage) -> Vec<i64> {
    storage
        .get(SUBMISSION_HISTORY_KEY)
        .await
        .unwrap()
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn success() {
    let Setup {
        contact,
        toast,
        storage,
        ..
    } = setup(false);
    fill(&contact, &VALID_FORM);
    let mut rx = contact.subscribe();

    let outcome = contact.submit().await;

    assert_eq!(outcome, SubmissionOutcome::Succeeded);
    assert_eq!(contact.form(), ContactForm::default());
    assert_eq!(history(&storage).await.len(), 1);
    assert_eq!(toast.current().unwrap().severity, ToastSeverity::Success);

    let mut states = Vec::new();
    while let Ok(state) = rx.try_recv() {
        states.push(state);
    }
    assert_eq!(
        states,
        [
            SubmissionState::Submitting,
            SubmissionState::Succeeded,
            SubmissionState::Idle
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn invalid_email_and_short_message() {
    let Setup {
        contact, storage, ..
    } = setup(false);
    fill(&contact, &INVALID_FORM);

    let outcome = contact.submit().await;

    let SubmissionOutcome::Invalid(errors) = outcome else {
        panic!("Expected validation errors, got {outcome:?}");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(contact.errors(), errors);
    assert_eq!(storage.keys().await.unwrap(), Vec::<String>::new());
    assert_eq!(contact.state(), SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn cooldown_after_success() {
    let Setup {
        contact,
        toast,
        storage,
        ..
    } = setup(false);
    fill(&contact, &VALID_FORM);
    assert_eq!(contact.submit().await, SubmissionOutcome::Succeeded);

    fill(&contact, &VALID_FORM);
    let outcome = contact.submit().await;

    assert_eq!(outcome, SubmissionOutcome::Rejected(SpamRejection::Cooldown));
    assert_eq!(contact.form(), *VALID_FORM);
    assert_eq!(history(&storage).await.len(), 1);
    let notice = toast.current().unwrap();
    assert_eq!(notice.severity, ToastSeverity::Warning);
    assert_eq!(
        notice.message,
        "Please wait a few seconds before submitting again."
    );
}

#[tokio::test(start_paused = true)]
async fn hourly_limit_from_durable_history() {
    let Setup {
        contact,
        spam_guard,
        storage,
        ..
    } = setup(false);
    let now = chrono::Utc::now().timestamp_millis();
    let entries = (1..=5).map(|i| now - i * 60_000).collect::<Vec<i64>>();
    storage
        .set(SUBMISSION_HISTORY_KEY, &entries, None)
        .await
        .unwrap();
    fill(&contact, &VALID_FORM);

    let outcome = contact.submit().await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Rejected(SpamRejection::HourlyLimit { limit: 5 })
    );
    assert_eq!(spam_guard.submissions_last_hour(chrono::Utc::now()).await, 5);

    spam_guard.reset().await;
    assert_eq!(history(&storage).await, Vec::<i64>::new());
}

#[tokio::test(start_paused = true)]
async fn failure_preserves_form() {
    let Setup {
        contact,
        toast,
        storage,
        ..
    } = setup(true);
    fill(&contact, &VALID_FORM);

    let outcome = contact.submit().await;

    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(contact.form(), *VALID_FORM);
    assert_eq!(history(&storage).await, Vec::<i64>::new());
    assert_eq!(
        toast.current().unwrap().message,
        "Failed to send message. Please try again."
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_in_flight() {
    let Setup {
        contact, storage, ..
    } = setup(false);
    fill(&contact, &VALID_FORM);

    let task = tokio::spawn({
        let contact = contact.clone();
        async move { contact.submit().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(contact.state(), SubmissionState::Submitting);
    assert_eq!(contact.submit().await, SubmissionOutcome::Ignored);
    contact.cancel();

    assert_eq!(task.await.unwrap(), SubmissionOutcome::Cancelled);
    assert_eq!(contact.form(), *VALID_FORM);
    assert_eq!(contact.state(), SubmissionState::Idle);
    assert_eq!(history(&storage).await, Vec::<i64>::new());
}

#[tokio::test(start_paused = true)]
async fn editing_during_dispatch() {
    let Setup { contact, .. } = setup(false);
    fill(&contact, &VALID_FORM);

    let task = tokio::spawn({
        let contact = contact.clone();
        async move { contact.submit().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    contact.update_field(ContactFormField::Message, "Another message".into());

    assert_eq!(task.await.unwrap(), SubmissionOutcome::Succeeded);
    assert_eq!(contact.form(), ContactForm::default());
}
