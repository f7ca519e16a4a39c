// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions that feed the toast orchestrator.
//!
//! - a 100 ms tick while any countdown is running
//! - Enter and Escape presses not captured by another widget
//! - clicks outside any widget, which take focus away from a toast
//! - window resizes, which move the viewport the stack is placed in

use crate::toast::{ToastKey, Toasts};
use iced::keyboard::{self, key::Named, Key};
use iced::{event, mouse, time, window, Event, Point, Rectangle, Size, Subscription};
use std::time::{Duration, Instant};

/// Interval between countdown checks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Tick(Instant),
    Key(ToastKey),
    /// A click landed outside every widget.
    Blur,
    Resized(Size),
}

/// Periodic tick, active only while a countdown is running.
pub fn tick<T>(toasts: &Toasts<T>) -> Subscription<Message> {
    if toasts.has_running_timers() {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Keyboard, mouse and window events relevant to toasts.
pub fn events() -> Subscription<Message> {
    event::listen_with(|event, status, _window| route(&event, status))
}

fn route(event: &Event, status: event::Status) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::Resized(*size)),
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. })
            if status == event::Status::Ignored =>
        {
            match key {
                Key::Named(Named::Enter) => Some(Message::Key(ToastKey::Enter)),
                Key::Named(Named::Escape) => Some(Message::Key(ToastKey::Escape)),
                _ => None,
            }
        }
        Event::Mouse(mouse::Event::ButtonPressed(_)) if status == event::Status::Ignored => {
            Some(Message::Blur)
        }
        _ => None,
    }
}

/// Applies a subscription message to the orchestrator.
pub fn update<T>(toasts: &mut Toasts<T>, message: Message) {
    match message {
        Message::Tick(now) => {
            toasts.tick(now);
        }
        Message::Key(key) => {
            toasts.key_pressed(key);
        }
        Message::Blur => {
            if let Some(id) = toasts.focused().cloned() {
                toasts.blur(&id);
            }
        }
        Message::Resized(size) => {
            toasts.set_viewport(Rectangle::new(Point::ORIGIN, size));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ManualClock, ToastOptions, ToastSettings};

    #[test]
    fn resize_is_routed_regardless_of_status() {
        let event = Event::Window(window::Event::Resized(Size::new(640.0, 480.0)));
        assert_eq!(
            route(&event, event::Status::Captured),
            Some(Message::Resized(Size::new(640.0, 480.0)))
        );
    }

    #[test]
    fn only_uncaptured_clicks_blur() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert_eq!(route(&event, event::Status::Ignored), Some(Message::Blur));
        assert_eq!(route(&event, event::Status::Captured), None);
    }

    #[test]
    fn blur_resumes_focused_countdown() {
        let clock = ManualClock::new();
        let mut toasts: Toasts<String> =
            Toasts::with_clock(ToastSettings::default(), clock.clone());
        let id = toasts
            .add_toast(
                "x".into(),
                ToastOptions::new()
                    .auto_dismiss(true)
                    .auto_dismiss_timeout(Duration::from_secs(1)),
            )
            .expect("add");
        toasts.focus(&id);
        assert!(!toasts.has_running_timers());

        update(&mut toasts, Message::Blur);
        assert!(toasts.focused().is_none());
        assert!(toasts.has_running_timers());

        clock.advance(Duration::from_secs(1));
        assert_eq!(toasts.tick_now(), vec![id]);
    }

    #[test]
    fn resize_updates_viewport_and_layout() {
        let mut toasts: Toasts<String> =
            Toasts::with_clock(ToastSettings::default(), ManualClock::new());
        let id = toasts
            .add_toast("x".into(), ToastOptions::new())
            .expect("add");
        toasts.report_extent(&id, Size::new(300.0, 50.0));

        update(&mut toasts, Message::Resized(Size::new(800.0, 600.0)));
        let placement = toasts.placement(&id).expect("placed");
        assert!(placement.bounds().y >= 0.0);
        assert!(placement.bounds().y + placement.size.height <= 600.0);
    }

    #[test]
    fn enter_key_message_removes_focused_toast() {
        let mut toasts: Toasts<String> =
            Toasts::with_clock(ToastSettings::default(), ManualClock::new());
        let id = toasts
            .add_toast("x".into(), ToastOptions::new())
            .expect("add");
        toasts.focus(&id);

        update(&mut toasts, Message::Key(ToastKey::Enter));
        assert!(toasts.is_empty());
    }
}
