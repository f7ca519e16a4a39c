// SPDX-License-Identifier: MPL-2.0
//! Control strip plus the toast overlay.

use super::{Message, HEADER_HEIGHT};
use crate::toast::{Appearance, Side, Toasts};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::{overlay, toast};
use iced::widget::{button, text, Column, Container, Row, Stack};
use iced::{alignment, Element, Length};

const SIDES: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

pub fn view(toasts: &Toasts<String>) -> Element<'_, Message> {
    let controls = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(appearance_row("Show", false))
        .push(appearance_row("Timed", true))
        .push(placement_row(toasts));

    let header = Container::new(controls)
        .padding(spacing::SM)
        .width(Length::Fill)
        .height(Length::Fixed(HEADER_HEIGHT))
        .align_x(alignment::Horizontal::Center);

    let stack_layer = overlay::view(toasts, |content| toast::text_body(content)).map(Message::Toast);

    Stack::new()
        .push(
            Container::new(header)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(stack_layer)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn appearance_row<'a>(label: &'a str, auto_dismiss: bool) -> Element<'a, Message> {
    let caption = text(label).size(typography::CAPTION).width(Length::Fixed(48.0));
    Appearance::ALL
        .iter()
        .fold(
            Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(caption),
            |row, &appearance| {
                row.push(
                    button(text(appearance.label()).size(typography::BODY))
                        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                        .on_press(Message::Show(appearance, auto_dismiss)),
                )
            },
        )
        .into()
}

fn placement_row(toasts: &Toasts<String>) -> Element<'_, Message> {
    let current = toasts.settings().placement;
    let row = SIDES.iter().fold(
        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center),
        |row, &side| {
            let style = if side == current {
                button::primary
            } else {
                button::secondary
            };
            row.push(
                button(text(side.as_str()).size(typography::BODY))
                    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                    .style(style)
                    .on_press(Message::SetPlacement(side)),
            )
        },
    );

    row.push(
        button(text("clear").size(typography::BODY))
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(button::danger)
            .on_press_maybe((!toasts.is_empty()).then_some(Message::ClearAll)),
    )
    .push(
        button(text("export").size(typography::BODY))
            .height(Length::Fixed(sizing::BUTTON_HEIGHT))
            .style(button::secondary)
            .on_press(Message::ExportDiagnostics),
    )
    .into()
}
