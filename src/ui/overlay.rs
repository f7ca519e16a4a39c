// SPDX-License-Identifier: MPL-2.0
//! Full-window layer that draws every measured toast at its computed position.

use super::toast::{self, Message};
use crate::toast::Toasts;
use iced::widget::{Container, Stack};
use iced::{Element, Length, Padding};

/// Renders the stack of active toasts.
///
/// `render` builds the body of each card from its content. Toasts whose
/// size has not been reported yet are left out until it is.
pub fn view<'a, T>(
    toasts: &'a Toasts<T>,
    render: impl Fn(&'a T) -> Element<'a, Message>,
) -> Element<'a, Message> {
    let layers = toasts
        .rendered()
        .into_iter()
        .filter(|rendered| rendered.measured)
        .map(|rendered| -> Element<'a, Message> {
            let card = toast::view(&rendered, render(rendered.content));
            Container::new(card)
                .padding(Padding {
                    top: rendered.position.y.max(0.0),
                    right: 0.0,
                    bottom: 0.0,
                    left: rendered.position.x.max(0.0),
                })
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        });

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
