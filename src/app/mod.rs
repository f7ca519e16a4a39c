// SPDX-License-Identifier: MPL-2.0
//! Demo application showing the toast stack inside an iced window.
//!
//! A header strip at the top of the window holds the controls and doubles as
//! the anchor for stacks placed above or below it. Stacks placed to the left
//! or right grow from the middle of the area under the header instead.

mod message;
mod view;

pub use message::{Flags, Message};

use crate::config::{
    self, DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_AUTO_DISMISS_TIMEOUT_MS,
    MIN_AUTO_DISMISS_TIMEOUT_MS,
};
use crate::diagnostics::{BufferCapacity, DiagnosticsCollector};
use crate::toast::{Appearance, Side, ToastOptions, Toasts};
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::{subscription, toast};
use iced::{window, Element, Point, Rectangle, Size, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::Duration;

pub const WINDOW_DEFAULT_WIDTH: f32 = 800.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 600.0;

/// Height of the control strip: three rows of buttons.
pub const HEADER_HEIGHT: f32 = 3.0 * sizing::BUTTON_HEIGHT + 2.0 * spacing::XS + 2.0 * spacing::SM;

const DIAGNOSTICS_FILE: &str = "diagnostics.json";

pub struct App {
    toasts: Toasts<String>,
    diagnostics: DiagnosticsCollector,
    config_dir: Option<PathBuf>,
    shown: usize,
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot function; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window::Settings {
            size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            ..window::Settings::default()
        })
        .subscription(App::subscription)
        .run()
}

/// Anchor rectangle for a window of `size` and a stack growing towards `side`.
///
/// Vertical stacks use a toast-wide slot centred in the header strip.
/// Horizontal stacks use a zero-width line down the middle of the area below
/// the header, so they never cover the controls. At the default window width
/// only one card fits on either side; further cards are reported as overflow.
#[must_use]
pub fn anchor_for(size: Size, side: Side) -> Rectangle {
    let header = HEADER_HEIGHT.min(size.height);
    if side.is_vertical() {
        let width = sizing::TOAST_WIDTH.min(size.width);
        Rectangle {
            x: ((size.width - width) / 2.0).max(0.0),
            y: 0.0,
            width,
            height: header,
        }
    } else {
        Rectangle {
            x: size.width / 2.0,
            y: header,
            width: 0.0,
            height: size.height - header,
        }
    }
}

/// Demo text for a toast of the given appearance.
fn sample_text(appearance: Appearance, n: usize) -> String {
    let text = match appearance {
        Appearance::Info => "A new version is available",
        Appearance::Success => "Saved",
        Appearance::Warning => "Disk space is running low",
        Appearance::Error => "Upload failed: connection reset by peer",
        Appearance::Plain => "Hello",
    };
    format!("{text} (#{n})")
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());

        let mut settings = config.toasts.settings();
        if let Some(side) = flags.placement {
            settings.placement = side;
        }
        if let Some(ms) = flags.timeout_ms {
            settings.auto_dismiss_timeout = Duration::from_millis(
                ms.clamp(MIN_AUTO_DISMISS_TIMEOUT_MS, MAX_AUTO_DISMISS_TIMEOUT_MS),
            );
        }

        let capacity = config
            .diagnostics
            .buffer_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        let diagnostics = DiagnosticsCollector::new(BufferCapacity::new(capacity));

        let mut toasts = Toasts::new(settings);
        toasts.set_diagnostics(diagnostics.handle());
        let size = Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT);
        toasts.set_viewport(Rectangle::new(Point::ORIGIN, size));
        toasts.set_anchor(anchor_for(size, toasts.settings().placement));

        let mut app = App {
            toasts,
            diagnostics,
            config_dir,
            shown: 0,
        };

        if let Some(warning) = config_warning {
            app.notify(Appearance::Warning, warning, false);
        }
        app.diagnostics.process_pending();

        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.toasts.len() {
            0 => "Toasts".to_string(),
            n => format!("Toasts ({n})"),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::tick(&self.toasts).map(Message::Toasts),
            subscription::events().map(Message::Toasts),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Show(appearance, auto_dismiss) => {
                self.shown += 1;
                let content = sample_text(appearance, self.shown);
                self.notify(appearance, content, auto_dismiss);
            }
            Message::Toast(message) => self.handle_toast(message),
            Message::Toasts(message) => {
                if let subscription::Message::Resized(size) = message {
                    let side = self.toasts.settings().placement;
                    self.toasts.set_anchor(anchor_for(size, side));
                }
                subscription::update(&mut self.toasts, message);
            }
            Message::SetPlacement(side) => {
                let size = self.toasts.viewport().size();
                self.toasts.set_anchor(anchor_for(size, side));
                self.toasts.set_placement(side);
            }
            Message::ClearAll => {
                self.toasts.clear();
            }
            Message::ExportDiagnostics => self.export_diagnostics(),
        }

        self.diagnostics.process_pending();
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(&self.toasts)
    }

    fn handle_toast(&mut self, message: toast::Message) {
        match message {
            toast::Message::Dismiss(id) => {
                self.toasts.remove_toast(&id);
            }
            toast::Message::PointerEntered(id) => {
                self.toasts.pointer_entered(&id);
            }
            toast::Message::PointerLeft(id) => {
                self.toasts.pointer_left(&id);
            }
            toast::Message::Focus(id) => {
                self.toasts.focus(&id);
            }
            toast::Message::Resized(id, size) => {
                self.toasts.report_extent(&id, size);
            }
        }
    }

    /// Shows `content` with an estimated size so it is placed at once. The
    /// card reports its real size after its first layout.
    fn notify(&mut self, appearance: Appearance, content: String, auto_dismiss: bool) {
        let size = toast::estimate_size(&content, auto_dismiss);
        let options = ToastOptions::new()
            .appearance(appearance)
            .auto_dismiss(auto_dismiss);
        if let Ok(id) = self.toasts.add_toast(content, options) {
            self.toasts.report_extent(&id, size);
        }
    }

    fn export_diagnostics(&mut self) {
        self.diagnostics.process_pending();
        let path = config::config_dir_with_override(self.config_dir.clone())
            .unwrap_or_default()
            .join(DIAGNOSTICS_FILE);

        match self.diagnostics.export_to_file(&path) {
            Ok(path) => self.notify(
                Appearance::Success,
                format!("Diagnostics written to {}", path.display()),
                true,
            ),
            Err(err) => self.notify(Appearance::Error, err.to_string(), false),
        }
    }
}
