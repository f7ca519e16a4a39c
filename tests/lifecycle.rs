// SPDX-License-Identifier: MPL-2.0
use iced::{Point, Rectangle, Size};
use iced_toasts::error::Error;
use iced_toasts::toast::{
    Appearance, LifecycleEvent, ManualClock, RemovalReason, Side, TimerState, ToastId,
    ToastOptions, ToastProvider, ToastSettings, ToastUpdate, Toasts,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn toasts() -> (Toasts<String>, ManualClock) {
    let clock = ManualClock::new();
    let mut toasts = Toasts::with_clock(ToastSettings::default(), clock.clone());
    toasts.set_viewport(Rectangle::new(Point::ORIGIN, Size::new(800.0, 600.0)));
    toasts.set_anchor(Rectangle::new(Point::new(250.0, 0.0), Size::new(300.0, 40.0)));
    (toasts, clock)
}

fn timed(ms: u64) -> ToastOptions {
    ToastOptions::new()
        .auto_dismiss(true)
        .auto_dismiss_timeout(Duration::from_millis(ms))
}

fn ids(toasts: &Toasts<String>) -> Vec<String> {
    toasts.iter().map(|t| t.id().to_string()).collect()
}

#[test]
fn saved_toast_uses_configured_defaults() {
    let (mut toasts, _clock) = toasts();
    toasts
        .add_toast(
            "Saved".to_string(),
            ToastOptions::new().appearance(Appearance::Success),
        )
        .expect("add");

    let listed: Vec<_> = toasts.iter().collect();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].appearance(), Appearance::Success);
    assert_eq!(listed[0].auto_dismiss(), ToastSettings::default().auto_dismiss);
    assert_eq!(listed[0].content(), "Saved");
}

#[test]
fn sticky_toast_removed_immediately_never_starts_timer() {
    let (mut toasts, _clock) = toasts();
    let id = toasts
        .add_toast(
            "X".to_string(),
            ToastOptions::new()
                .appearance(Appearance::Info)
                .auto_dismiss(false),
        )
        .expect("add");
    assert_eq!(toasts.timer_state(&id), TimerState::Idle);

    assert!(toasts.remove_toast(&id));
    assert!(toasts.is_empty());
    assert!(!toasts.has_running_timers());
    assert!(!toasts
        .drain_events()
        .iter()
        .any(|event| matches!(event, LifecycleEvent::TimerPaused { .. })));
}

#[test]
fn duplicate_id_keeps_first_record() {
    let (mut toasts, _clock) = toasts();
    toasts
        .add_toast("A".to_string(), ToastOptions::new().id("x"))
        .expect("first add");

    let err = toasts
        .add_toast("B".to_string(), ToastOptions::new().id("x"))
        .expect_err("duplicate");
    assert_eq!(err, Error::DuplicateId(ToastId::from("x")));
    assert_eq!(toasts.len(), 1);
    assert_eq!(
        toasts.get(&ToastId::from("x")).map(|t| t.content().as_str()),
        Some("A")
    );
}

#[test]
fn order_survives_interleaved_removals() {
    let (mut toasts, _clock) = toasts();
    for name in ["a", "b", "c", "d"] {
        toasts
            .add_toast(name.to_string(), ToastOptions::new().id(name))
            .expect("add");
    }
    toasts.remove_toast(&ToastId::from("b"));
    toasts
        .add_toast("e".to_string(), ToastOptions::new().id("e"))
        .expect("add");
    toasts.remove_toast(&ToastId::from("a"));

    assert_eq!(ids(&toasts), vec!["c", "d", "e"]);
    let orders: Vec<u64> = toasts.iter().map(|t| t.created_order()).collect();
    assert!(orders.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn expires_at_timeout_and_not_before() {
    let (mut toasts, clock) = toasts();
    let dismissed = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&dismissed);
    toasts
        .add_toast(
            "bye".to_string(),
            timed(3000).on_dismiss(move |_| *sink.borrow_mut() += 1),
        )
        .expect("add");

    clock.advance(Duration::from_millis(2999));
    assert!(toasts.tick_now().is_empty());
    assert_eq!(toasts.len(), 1);

    clock.advance(Duration::from_millis(1));
    assert_eq!(toasts.tick_now().len(), 1);
    assert!(toasts.is_empty());

    clock.advance(Duration::from_secs(10));
    assert!(toasts.tick_now().is_empty());
    assert_eq!(*dismissed.borrow(), 1);
}

#[test]
fn hovered_toast_never_expires_but_can_be_removed() {
    let (mut toasts, clock) = toasts();
    let id = toasts.add_toast("held".to_string(), timed(1000)).expect("add");

    clock.advance(Duration::from_millis(400));
    assert!(toasts.pointer_entered(&id));
    clock.advance(Duration::from_secs(60));
    assert!(toasts.tick_now().is_empty());
    assert_eq!(
        toasts.timer_state(&id),
        TimerState::Paused {
            remaining: Duration::from_millis(600)
        }
    );

    assert!(toasts.remove_toast(&id));
    assert!(toasts.is_empty());
}

#[test]
fn manual_dismiss_before_expiry_fires_callback_once() {
    let (mut toasts, clock) = toasts();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let id = toasts
        .add_toast(
            "race".to_string(),
            timed(1000).on_dismiss(move |id| sink.borrow_mut().push(id.clone())),
        )
        .expect("add");

    clock.advance(Duration::from_millis(999));
    assert!(toasts.remove_toast(&id));
    assert!(!toasts.remove_toast(&id));
    clock.advance(Duration::from_millis(5));
    assert!(toasts.tick_now().is_empty());

    assert_eq!(*calls.borrow(), vec![id]);
}

#[test]
fn removal_events_carry_reason() {
    let (mut toasts, clock) = toasts();
    let timed_id = toasts.add_toast("t".to_string(), timed(100)).expect("add");
    let manual_id = toasts.add_toast("m".to_string(), ToastOptions::new()).expect("add");
    toasts.drain_events();

    clock.advance(Duration::from_millis(100));
    toasts.tick_now();
    toasts.remove_toast(&manual_id);

    assert_eq!(
        toasts.drain_events(),
        vec![
            LifecycleEvent::Removed {
                id: timed_id,
                reason: RemovalReason::Expired
            },
            LifecycleEvent::Removed {
                id: manual_id,
                reason: RemovalReason::Dismissed
            },
        ]
    );
}

#[test]
fn enabling_auto_dismiss_later_starts_countdown() {
    let (mut toasts, clock) = toasts();
    let id = toasts
        .add_toast("later".to_string(), ToastOptions::new().auto_dismiss(false))
        .expect("add");

    toasts
        .update_toast(
            &id,
            ToastUpdate::new()
                .auto_dismiss(true)
                .auto_dismiss_timeout(Duration::from_millis(500)),
        )
        .expect("update");
    clock.advance(Duration::from_millis(500));
    assert_eq!(toasts.tick_now(), vec![id]);
}

#[test]
fn stacked_heights_produce_increasing_offsets() {
    let (mut toasts, _clock) = toasts();
    let gap = toasts.settings().gap;
    let mut created = Vec::new();
    for height in [50.0, 60.0, 40.0] {
        let id = toasts.add_toast(format!("{height}"), ToastOptions::new()).expect("add");
        toasts.report_extent(&id, Size::new(300.0, height));
        created.push((id, height));
    }

    let placements: Vec<_> = created
        .iter()
        .map(|(id, _)| toasts.placement(id).expect("placed").clone())
        .collect();
    assert_eq!(toasts.layout().side, Side::Bottom);
    for (pair, (_, height)) in placements.windows(2).zip(&created) {
        let delta = pair[1].main_offset - pair[0].main_offset;
        assert!((delta - (height + gap)).abs() < 1e-3);
        assert!(pair[0].bounds().y + pair[0].size.height <= pair[1].bounds().y);
    }
    assert!(toasts.layout().overflow.is_none());
}

#[test]
fn removal_closes_gap_in_stack() {
    let (mut toasts, _clock) = toasts();
    let mut created = Vec::new();
    for _ in 0..3 {
        let id = toasts.add_toast("t".to_string(), ToastOptions::new()).expect("add");
        toasts.report_extent(&id, Size::new(300.0, 50.0));
        created.push(id);
    }
    let first_y = toasts.placement(&created[0]).expect("placed").position.y;

    toasts.remove_toast(&created[0]);
    let second_y = toasts.placement(&created[1]).expect("placed").position.y;
    assert!((second_y - first_y).abs() < 1e-3);
}

#[test]
fn handle_without_provider_reports_no_context() {
    let provider: ToastProvider<String> = ToastProvider::default();
    let handle = provider.handle();
    drop(provider);

    let err = handle
        .add_toast("late".to_string(), ToastOptions::new())
        .expect_err("provider gone");
    assert_eq!(err, Error::NoContext);
    assert!(!err.is_recoverable());
}
