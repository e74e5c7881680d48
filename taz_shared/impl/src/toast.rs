use std::sync::{Arc, Mutex, MutexGuard, Weak};

use taz_di::Build;
use taz_models::toast::{ToastNotice, ToastSeverity};
use taz_shared_contracts::toast::ToastService;
use taz_utils::trace_instrument;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Default, Build)]
pub struct ToastServiceImpl {
    #[state]
    state: Arc<ToastState>,
}

#[derive(Debug, Default)]
struct ToastState(Mutex<Inner>);

#[derive(Debug, Default)]
struct Inner {
    current: Option<(u64, ToastNotice)>,
    next_id: u64,
    timer: Option<JoinHandle<()>>,
}

impl ToastState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.0.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Drop for ToastState {
    fn drop(&mut self) {
        if let Some(timer) = self.lock().timer.take() {
            timer.abort();
        }
    }
}

impl ToastService for ToastServiceImpl {
    #[trace_instrument(skip(self))]
    fn show(&self, notice: ToastNotice) {
        match notice.severity {
            ToastSeverity::Success | ToastSeverity::Info => {
                tracing::info!(severity = notice.severity.as_str(), "{}", notice.message)
            }
            ToastSeverity::Warning | ToastSeverity::Error => {
                tracing::warn!(severity = notice.severity.as_str(), "{}", notice.message)
            }
        }

        let mut inner = self.state.lock();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }

        let id = inner.next_id;
        inner.next_id += 1;

        if let Some(duration) = notice.auto_dismiss {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let state = Arc::downgrade(&self.state);
                    inner.timer = Some(handle.spawn(dismiss_after(state, id, duration)));
                }
                Err(_) => tracing::debug!("No runtime available, toast will not auto dismiss"),
            }
        }

        inner.current = Some((id, notice));
    }

    #[trace_instrument(skip(self))]
    fn dismiss(&self) {
        let mut inner = self.state.lock();
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.current = None;
    }

    #[trace_instrument(skip(self))]
    fn current(&self) -> Option<ToastNotice> {
        self.state
            .lock()
            .current
            .as_ref()
            .map(|(_, notice)| notice.clone())
    }
}

async fn dismiss_after(state: Weak<ToastState>, id: u64, duration: std::time::Duration) {
    tokio::time::sleep(duration).await;

    let Some(state) = state.upgrade() else {
        return;
    };
    let mut inner = state.lock();
    if inner.current.as_ref().is_some_and(|&(current, _)| current == id) {
        inner.current = None;
        inner.timer = None;
    }
}
