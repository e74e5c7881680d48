use std::time::Duration;

use taz_demo::contact::VALID_FORM;
use taz_di::{provider, Provide};
use taz_extern_contracts::dispatch::{ContactDispatchError, ContactDispatchService};
use taz_extern_impl::dispatch::{ContactDispatchServiceConfig, ContactDispatchServiceImpl};
use taz_utils::{assert_matches, cancel::cancellation};

#[tokio::test(start_paused = true)]
async fn ok() {
    let sut = make_sut(false, Duration::from_secs(30));

    let result = sut.dispatch(&VALID_FORM, cancellation().1).await;

    result.unwrap();
}

#[tokio::test(start_paused = true)]
async fn simulated_failure() {
    let sut = make_sut(true, Duration::from_secs(30));

    let result = sut.dispatch(&VALID_FORM, cancellation().1).await;

    assert_matches!(result, Err(ContactDispatchError::Other(_)));
}

#[tokio::test(start_paused = true)]
async fn timeout() {
    let sut = make_sut(false, Duration::from_millis(500));

    let result = sut.dispatch(&VALID_FORM, cancellation().1).await;

    assert_matches!(result, Err(ContactDispatchError::Timeout));
}

#[tokio::test(start_paused = true)]
async fn cancelled() {
    let sut = make_sut(false, Duration::from_secs(30));
    let (handle, signal) = cancellation();

    let task = tokio::spawn(async move { sut.dispatch(&VALID_FORM, signal).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.cancel();

    assert_matches!(task.await.unwrap(), Err(ContactDispatchError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start() {
    let sut = make_sut(false, Duration::from_secs(30));
    let (handle, signal) = cancellation();
    handle.cancel();

    let result = sut.dispatch(&VALID_FORM, signal).await;

    assert_matches!(result, Err(ContactDispatchError::Cancelled));
}

fn make_sut(simulate_failure: bool, timeout: Duration) -> ContactDispatchServiceImpl {
    provider! {
        Provider { contact_dispatch_service_config: ContactDispatchServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        contact_dispatch_service_config: ContactDispatchServiceConfig {
            delay: Duration::from_secs(1),
            timeout,
            simulate_failure,
        },
    };

    provider.provide()
}
