// SPDX-License-Identifier: MPL-2.0
//! A wrapper widget that reports the laid-out size of its content.
//!
//! Toast cards are placed from the size the renderer actually gives them.
//! The wrapper checks its bounds on every redraw and publishes a message
//! whenever they differ from the last size it reported.

use iced::advanced::layout::{self, Layout};
use iced::advanced::mouse;
use iced::advanced::overlay;
use iced::advanced::renderer;
use iced::advanced::widget::{self, tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{window, Element, Event, Length, Rectangle, Size};

/// Wraps content and publishes its size after layout.
pub struct Measure<'a, Message, Theme, Renderer> {
    content: Element<'a, Message, Theme, Renderer>,
    on_resize: Box<dyn Fn(Size) -> Message + 'a>,
}

#[derive(Debug, Default)]
struct State {
    reported: Option<Size>,
}

impl<'a, Message, Theme, Renderer> Measure<'a, Message, Theme, Renderer> {
    pub fn new(
        content: impl Into<Element<'a, Message, Theme, Renderer>>,
        on_resize: impl Fn(Size) -> Message + 'a,
    ) -> Self {
        Self {
            content: content.into(),
            on_resize: Box::new(on_resize),
        }
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Measure<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget_mut()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn children(&self) -> Vec<widget::Tree> {
        vec![widget::Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut widget::Tree) {
        tree.diff_children(&[&self.content]);
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            style,
            layout,
            cursor,
            viewport,
        );
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );

        if is_redraw(event) {
            let state = tree.state.downcast_mut::<State>();
            let size = layout.bounds().size();
            if size_changed(state.reported, size) {
                state.reported = Some(size);
                shell.publish((self.on_resize)(size));
            }
        }
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            cursor,
            viewport,
            renderer,
        )
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        self.content
            .as_widget_mut()
            .operate(&mut tree.children[0], layout, renderer, operation);
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut widget::Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: iced::Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        self.content.as_widget_mut().overlay(
            &mut tree.children[0],
            layout,
            renderer,
            viewport,
            translation,
        )
    }
}

impl<'a, Message, Theme, Renderer> From<Measure<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(wrapper: Measure<'a, Message, Theme, Renderer>) -> Self {
        Self::new(wrapper)
    }
}

/// Wraps `content`, calling `on_resize` with its size whenever it changes.
pub fn measure<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
    on_resize: impl Fn(Size) -> Message + 'a,
) -> Measure<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    Measure::new(content, on_resize)
}

fn is_redraw(event: &Event) -> bool {
    matches!(event, Event::Window(window::Event::RedrawRequested(_)))
}

/// Sub-pixel jitter is ignored so a card does not re-layout every frame.
fn size_changed(reported: Option<Size>, current: Size) -> bool {
    reported.is_none_or(|previous| {
        (previous.width - current.width).abs() >= 0.5
            || (previous.height - current.height).abs() >= 0.5
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_layout_is_always_reported() {
        assert!(size_changed(None, Size::new(300.0, 48.0)));
    }

    #[test]
    fn taller_card_is_reported() {
        assert!(size_changed(
            Some(Size::new(300.0, 48.0)),
            Size::new(300.0, 66.0)
        ));
    }

    #[test]
    fn sub_pixel_jitter_is_ignored() {
        assert!(!size_changed(
            Some(Size::new(300.0, 48.0)),
            Size::new(300.0, 48.2)
        ));
    }

    #[test]
    fn redraw_is_detected_and_input_is_not() {
        let redraw = Event::Window(window::Event::RedrawRequested(std::time::Instant::now()));
        let click = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert!(is_redraw(&redraw));
        assert!(!is_redraw(&click));
    }
}
