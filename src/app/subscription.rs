// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window resizes always reach the application. Keyboard shortcuts are only
//! routed while the image viewer is open, and only when no focused widget
//! (e.g. a text editor) captured the key first.

use super::Message;
use crate::config::ANIMATION_TICK_MS;
use crate::ui::image_modal;
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::{event, time, window, Event, Subscription};
use std::time::Duration;

/// Native event routing, depending on whether the viewer is shown.
pub fn create_event_subscription(viewer_open: bool) -> Subscription<Message> {
    if viewer_open {
        event::listen_with(|event, status, _window_id| {
            window_event(&event).or_else(|| match status {
                event::Status::Ignored => viewer_shortcut(&event),
                event::Status::Captured => None,
            })
        })
    } else {
        event::listen_with(|event, _status, _window_id| window_event(&event))
    }
}

/// Animation frames for the viewer, only while a transition is running.
pub fn create_tick_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(Duration::from_millis(ANIMATION_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

fn window_event(event: &Event) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(*size)),
        _ => None,
    }
}

fn viewer_shortcut(event: &Event) -> Option<Message> {
    let Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event else {
        return None;
    };
    shortcut(key.as_ref(), *modifiers).map(Message::ImageModal)
}

/// `+`/`=` zoom in, `-` zooms out, `0` resets and `Escape` closes.
fn shortcut(key: Key<&str>, modifiers: Modifiers) -> Option<image_modal::Message> {
    if modifiers.control() || modifiers.command() || modifiers.alt() {
        return None;
    }
    match key {
        Key::Named(Named::Escape) => Some(image_modal::Message::Close),
        Key::Character("+" | "=") => Some(image_modal::Message::ZoomIn),
        Key::Character("-") => Some(image_modal::Message::ZoomOut),
        Key::Character("0") => Some(image_modal::Message::ResetView),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    fn plain(key: Key<&str>) -> Option<image_modal::Message> {
        shortcut(key, Modifiers::empty())
    }

    #[test]
    fn zoom_keys_map_to_viewer_messages() {
        assert!(matches!(plain(Key::Character("+")), Some(image_modal::Message::ZoomIn)));
        assert!(matches!(plain(Key::Character("=")), Some(image_modal::Message::ZoomIn)));
        assert!(matches!(plain(Key::Character("-")), Some(image_modal::Message::ZoomOut)));
        assert!(matches!(plain(Key::Character("0")), Some(image_modal::Message::ResetView)));
        assert!(matches!(plain(Key::Named(Named::Escape)), Some(image_modal::Message::Close)));
    }

    #[test]
    fn other_keys_and_chords_are_ignored() {
        assert!(plain(Key::Character("a")).is_none());
        assert!(shortcut(Key::Character("+"), Modifiers::CTRL).is_none());
        assert!(shortcut(Key::Character("0"), Modifiers::ALT).is_none());
    }

    #[test]
    fn resize_is_forwarded() {
        let event = Event::Window(window::Event::Resized(Size::new(800.0, 600.0)));
        assert!(matches!(
            window_event(&event),
            Some(Message::WindowResized(size)) if size == Size::new(800.0, 600.0)
        ));
    }
}
