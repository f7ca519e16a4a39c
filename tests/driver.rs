// SPDX-License-Identifier: MPL-2.0
use iced_toasts::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
use iced_toasts::error::Error;
use iced_toasts::toast::{
    drive, ToastOptions, ToastProvider, ToastSettings, Toasts, TokioClock,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::{spawn_local, LocalSet};
use tokio::time::sleep;

fn provider() -> ToastProvider<String> {
    ToastProvider::new(Toasts::with_clock(ToastSettings::default(), TokioClock))
}

fn timed(ms: u64) -> ToastOptions {
    ToastOptions::new()
        .auto_dismiss(true)
        .auto_dismiss_timeout(Duration::from_millis(ms))
}

#[tokio::test(start_paused = true)]
async fn hover_pauses_driver_and_leave_resumes_with_remaining_time() {
    LocalSet::new()
        .run_until(async {
            let provider = provider();
            let handle = provider.handle();
            let _driver = spawn_local(drive(handle.clone()));

            let id = handle.add_toast("held".into(), timed(1000)).expect("add");
            sleep(Duration::from_millis(300)).await;
            provider.borrow_mut().pointer_entered(&id);

            sleep(Duration::from_secs(30)).await;
            assert_eq!(provider.borrow().len(), 1);

            provider.borrow_mut().pointer_left(&id);
            sleep(Duration::from_millis(699)).await;
            assert_eq!(provider.borrow().len(), 1);

            sleep(Duration::from_millis(2)).await;
            assert!(provider.borrow().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn callback_reusing_handle_is_reported_and_toast_still_removed() {
    LocalSet::new()
        .run_until(async {
            let provider = provider();
            let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
            provider.borrow_mut().set_diagnostics(collector.handle());

            let handle = provider.handle();
            let inner = handle.clone();
            let seen: Rc<RefCell<Option<Error>>> = Rc::default();
            let sink = Rc::clone(&seen);
            let _driver = spawn_local(drive(handle.clone()));

            handle
                .add_toast(
                    "nested".into(),
                    timed(100).on_dismiss(move |_| {
                        let result = inner.add_toast("again".into(), ToastOptions::new());
                        *sink.borrow_mut() = result.err();
                    }),
                )
                .expect("add");

            sleep(Duration::from_millis(150)).await;
            assert!(provider.borrow().is_empty());
            assert_eq!(*seen.borrow(), Some(Error::Reentrant));

            collector.process_pending();
            assert!(collector.iter().any(|event| matches!(
                &event.kind,
                DiagnosticEventKind::Lifecycle { event } if event.name() == "removed"
            )));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn driver_stops_when_provider_dropped() {
    LocalSet::new()
        .run_until(async {
            let provider = provider();
            let driver = spawn_local(drive(provider.handle()));
            provider
                .handle()
                .add_toast("pending".into(), timed(60_000))
                .expect("add");

            tokio::task::yield_now().await;
            drop(provider);
            assert_eq!(driver.await.expect("driver task"), 0);
        })
        .await;
}
