// SPDX-License-Identifier: MPL-2.0
//! Async timer driver.
//!
//! [`drive`] sleeps until the earliest countdown deadline, then ticks the
//! orchestrator. It is woken early whenever a countdown starts or resumes,
//! and returns once the provider is dropped. The orchestrator is not `Send`,
//! so the driver runs on a `LocalSet`.
//!
//! For deterministic tests under a paused tokio clock, build the orchestrator
//! with [`TokioClock`](super::TokioClock).

use super::context::ToastHandle;
use crate::error::Error;
use std::time::Instant;

/// Runs the timer loop until the provider behind `handle` is dropped.
///
/// Returns the number of toasts it expired.
pub async fn drive<T>(handle: ToastHandle<T>) -> usize {
    let Ok(wake) = handle.wake_handle() else {
        return 0;
    };
    let mut expired = 0;

    loop {
        let deadline = match handle.next_deadline() {
            Ok(deadline) => deadline,
            Err(Error::Reentrant) => {
                tokio::task::yield_now().await;
                continue;
            }
            Err(_) => return expired,
        };

        match deadline {
            Some(deadline) => {
                tokio::select! {
                    () = tokio::time::sleep_until(to_tokio(deadline)) => {}
                    () = wake.notified() => {}
                }
            }
            None => wake.notified().await,
        }

        match handle.tick_now() {
            Ok(removed) => expired += removed.len(),
            Err(Error::Reentrant) => {}
            Err(_) => return expired,
        }
    }
}

fn to_tokio(deadline: Instant) -> tokio::time::Instant {
    tokio::time::Instant::from_std(deadline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ToastOptions, ToastProvider, ToastSettings, Toasts, TokioClock};
    use std::time::Duration;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    fn provider() -> ToastProvider<String> {
        ToastProvider::new(Toasts::with_clock(ToastSettings::default(), TokioClock))
    }

    fn auto(ms: u64) -> ToastOptions {
        ToastOptions::new()
            .auto_dismiss(true)
            .auto_dismiss_timeout(Duration::from_millis(ms))
    }

    #[tokio::test(start_paused = true)]
    async fn expires_toast_at_deadline() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let provider = provider();
                let handle = provider.handle();
                let driver = tokio::task::spawn_local(drive(handle.clone()));

                handle.add_toast("Saved".into(), auto(3000)).expect("add");
                sleep(Duration::from_millis(2999)).await;
                assert_eq!(provider.borrow().len(), 1);

                sleep(Duration::from_millis(2)).await;
                assert!(provider.borrow().is_empty());

                drop(provider);
                assert_eq!(driver.await.expect("driver"), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_deadline_wakes_sleeping_driver() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let provider = provider();
                let handle = provider.handle();
                let _driver = tokio::task::spawn_local(drive(handle.clone()));

                handle.add_toast("slow".into(), auto(10_000)).expect("add");
                tokio::task::yield_now().await;
                let fast = handle.add_toast("fast".into(), auto(500)).expect("add");

                sleep(Duration::from_millis(501)).await;
                let remaining: Vec<String> = provider
                    .borrow()
                    .iter()
                    .map(|t| t.content().clone())
                    .collect();
                assert_eq!(remaining, vec!["slow"]);
                assert!(provider.borrow().get(&fast).is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn detached_handle_returns_immediately() {
        let handle = crate::toast::ToastHandle::<String>::detached();
        assert_eq!(drive(handle).await, 0);
    }
}
