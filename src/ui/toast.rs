// SPDX-License-Identifier: MPL-2.0
//! Toast card widget.
//!
//! A card shows the caller's content, a close control and, for toasts that
//! dismiss themselves, a countdown bar. Pointer and click activity on the
//! card is reported back so the orchestrator can pause the countdown and
//! track focus.

use super::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use super::measure::measure;
use super::style;
use crate::toast::{Appearance, Countdown, RenderedToast, ToastId};
use iced::widget::{button, container, mouse_area, text, Column, Container, Row, Space};
use iced::{alignment, Background, Border, Color, Element, Length, Size, Theme};

/// Interaction reported by a toast card.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The close control was pressed.
    Dismiss(ToastId),
    PointerEntered(ToastId),
    PointerLeft(ToastId),
    /// The card was clicked and takes keyboard focus.
    Focus(ToastId),
    /// The card was laid out at a new size.
    Resized(ToastId, Size),
}

impl Message {
    #[must_use]
    pub fn id(&self) -> &ToastId {
        match self {
            Message::Dismiss(id)
            | Message::PointerEntered(id)
            | Message::PointerLeft(id)
            | Message::Focus(id)
            | Message::Resized(id, _) => id,
        }
    }
}

/// Renders one toast around already-built `body` content.
pub fn view<'a, T>(toast: &RenderedToast<'_, T>, body: Element<'a, Message>) -> Element<'a, Message> {
    let id = toast.id.clone();
    let appearance = toast.appearance;
    let focused = toast.focused;

    let close = button(text("×").size(typography::BODY))
        .on_press(Message::Dismiss(id.clone()))
        .padding(0)
        .width(Length::Fixed(sizing::CLOSE_BUTTON))
        .height(Length::Fixed(sizing::CLOSE_BUTTON))
        .style(close_button_style);

    let header = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Top)
        .push(
            Container::new(body)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(close);

    let mut column = Column::new().push(Container::new(header).padding(spacing::SM));
    if let Some(countdown) = toast.countdown {
        column = column.push(countdown_bar(appearance, countdown));
    }

    let card = Container::new(column)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .style(move |theme: &Theme| card_style(theme, appearance, focused));

    let area = mouse_area(card)
        .on_enter(Message::PointerEntered(id.clone()))
        .on_exit(Message::PointerLeft(id.clone()))
        .on_press(Message::Focus(id.clone()));

    measure(area, move |size| Message::Resized(id.clone(), size)).into()
}

/// Plain text body in the card's text color.
pub fn text_body<'a>(content: &str) -> Element<'a, Message> {
    text(content.to_owned())
        .size(typography::BODY)
        .style(|_theme: &Theme| text::Style {
            color: Some(palette::GRAY_900),
        })
        .into()
}

/// Estimates the rendered size of a card holding `content`.
///
/// Used only until the card reports its laid-out size. Text wraps at word
/// boundaries within the card's inner width; every source line takes at
/// least one rendered line.
#[must_use]
pub fn estimate_size(content: &str, auto_dismiss: bool) -> Size {
    let inner_width =
        sizing::TOAST_WIDTH - 2.0 * spacing::SM - sizing::CLOSE_BUTTON - spacing::XS;
    let glyph_width = typography::BODY * typography::GLYPH_WIDTH_RATIO;
    let per_line = ((inner_width / glyph_width).floor() as usize).max(1);

    let lines: usize = content
        .lines()
        .map(|line| wrapped_lines(line, per_line))
        .sum::<usize>()
        .max(1);

    let text_height = (lines as f32 * typography::BODY * typography::LINE_HEIGHT_RATIO)
        .max(sizing::CLOSE_BUTTON);
    let countdown = if auto_dismiss {
        sizing::COUNTDOWN_HEIGHT
    } else {
        0.0
    };
    Size::new(sizing::TOAST_WIDTH, text_height + 2.0 * spacing::SM + countdown)
}

/// Lines `line` takes when greedily wrapped at `per_line` characters.
/// A word that does not fit starts a new line; words longer than a line are
/// broken across lines.
fn wrapped_lines(line: &str, per_line: usize) -> usize {
    let mut lines = 1;
    let mut used = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= per_line {
            used = needed;
        } else {
            if used > 0 {
                lines += 1;
            }
            lines += (len - 1) / per_line;
            used = (len - 1) % per_line + 1;
        }
    }
    lines
}

/// Card background for an appearance.
#[must_use]
pub fn background(appearance: Appearance) -> Color {
    match appearance {
        Appearance::Info => palette::INFO_100,
        Appearance::Success => palette::SUCCESS_100,
        Appearance::Warning => palette::WARNING_100,
        Appearance::Error => palette::ERROR_100,
        Appearance::Plain => palette::WHITE,
    }
}

/// Countdown and focus-ring color for an appearance.
#[must_use]
pub fn accent(appearance: Appearance) -> Color {
    match appearance {
        Appearance::Info => palette::INFO_500,
        Appearance::Success => palette::SUCCESS_500,
        Appearance::Warning => palette::WARNING_500,
        Appearance::Error => palette::ERROR_500,
        Appearance::Plain => palette::GRAY_400,
    }
}

fn countdown_bar<'a>(appearance: Appearance, countdown: Countdown) -> Element<'a, Message> {
    let keyframes = style::countdown_keyframes();
    let width = sizing::TOAST_WIDTH * keyframes.sample(1.0 - countdown.fraction());
    let color = accent(appearance);

    Container::new(
        Space::new()
            .width(Length::Fixed(width))
            .height(Length::Fixed(sizing::COUNTDOWN_HEIGHT)),
    )
    .style(move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        ..Default::default()
    })
    .into()
}

fn card_style(_theme: &Theme, appearance: Appearance, focused: bool) -> container::Style {
    let border = if focused {
        Border {
            color: accent(appearance),
            width: border::WIDTH_MD,
            radius: radius::SM.into(),
        }
    } else {
        Border {
            color: palette::GRAY_200,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        }
    };

    container::Style {
        background: Some(Background::Color(background(appearance))),
        border,
        shadow: shadow::MD,
        text_color: Some(palette::GRAY_900),
        ..Default::default()
    }
}

fn close_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let hover = |alpha: f32| {
        Some(Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        }))
    };
    let background = match status {
        button::Status::Active | button::Status::Disabled => None,
        button::Status::Hovered => hover(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover(opacity::OVERLAY_MEDIUM),
    };

    button::Style {
        background,
        text_color: palette::GRAY_700,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn card_style_uses_appearance_background() {
        let style = card_style(&Theme::Light, Appearance::Success, false);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::SUCCESS_100))
        );
        assert_eq!(style.border.width, border::WIDTH_SM);
    }

    #[test]
    fn focused_card_gets_accent_ring() {
        let style = card_style(&Theme::Light, Appearance::Error, true);
        assert_eq!(style.border.color, palette::ERROR_500);
        assert_eq!(style.border.width, border::WIDTH_MD);
    }

    #[test]
    fn estimate_grows_with_text() {
        let short = estimate_size("Saved", false);
        let long = estimate_size(&"word ".repeat(60), false);
        assert_eq!(short.width, sizing::TOAST_WIDTH);
        assert!(long.height > short.height);
    }

    #[test]
    fn estimate_wraps_at_word_boundaries() {
        assert_eq!(wrapped_lines(&"a".repeat(32), 32), 1);
        assert_eq!(wrapped_lines("aaaa bbbb", 4), 2);

        let two = "aaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbb";
        let four = "aaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbb ccccccccccccccccc ddddddddddddddddd";
        assert_eq!(wrapped_lines(four, 32), 4);
        assert_abs_diff_eq!(
            estimate_size(four, false).height - estimate_size(two, false).height,
            2.0 * typography::BODY * typography::LINE_HEIGHT_RATIO,
            epsilon = 1e-3
        );
    }

    #[test]
    fn long_word_breaks_across_lines() {
        assert_eq!(wrapped_lines(&"x".repeat(70), 32), 3);
        assert_eq!(wrapped_lines(&format!("ab {}", "x".repeat(40)), 32), 3);
    }

    #[test]
    fn estimate_reserves_countdown_bar() {
        let plain = estimate_size("Saved", false);
        let timed = estimate_size("Saved", true);
        assert_abs_diff_eq!(
            timed.height - plain.height,
            sizing::COUNTDOWN_HEIGHT,
            epsilon = 1e-4
        );
    }

    #[test]
    fn message_exposes_id() {
        let id = ToastId::from("a");
        assert_eq!(Message::Focus(id.clone()).id(), &id);
    }
}
