// SPDX-License-Identifier: MPL-2.0
//! Compose form for a new card: a message body and an optional image.

use crate::domain::card::{Author, NewCard, ValidationError};
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use iced::widget::{button, column, row, text, text_editor, Column};
use iced::{Element, Length};
use std::path::PathBuf;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub author: &'a Author,
}

#[derive(Debug, Clone)]
pub enum Message {
    Edit(text_editor::Action),
    PickImage,
    ImagePicked(Option<PathBuf>),
    ClearImage,
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Open a file dialog; the answer comes back as [`Message::ImagePicked`].
    PickImage,
    /// A validated card, plus a local image to upload before storing it.
    Submit {
        card: NewCard,
        image: Option<PathBuf>,
    },
}

#[derive(Default)]
pub struct State {
    content: text_editor::Content,
    image: Option<PathBuf>,
    error: Option<ValidationError>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("content", &self.content.text())
            .field("image", &self.image)
            .field("error", &self.error)
            .finish()
    }
}

impl State {
    pub fn handle(&mut self, message: Message, author: &Author) -> Effect {
        match message {
            Message::Edit(action) => {
                if action.is_edit() {
                    self.error = None;
                }
                self.content.perform(action);
            }
            Message::PickImage => return Effect::PickImage,
            Message::ImagePicked(path) => {
                if path.is_some() {
                    self.image = path;
                }
            }
            Message::ClearImage => self.image = None,
            Message::Submit => {
                match NewCard::compose(author, &self.content.text(), None) {
                    Ok(card) => {
                        let image = self.image.take();
                        self.content = text_editor::Content::new();
                        self.error = None;
                        return Effect::Submit { card, image };
                    }
                    Err(err) => self.error = Some(err),
                }
            }
        }
        Effect::None
    }

    /// Puts a failed submission back into the form.
    pub fn restore(&mut self, content: &str, image: Option<PathBuf>) {
        self.content = text_editor::Content::with_text(content);
        self.image = image;
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.content.text()
    }

    #[must_use]
    pub fn image(&self) -> Option<&PathBuf> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let editor = text_editor(&self.content)
            .placeholder(i18n.tr("compose-placeholder"))
            .on_action(Message::Edit)
            .height(Length::Fixed(sizing::CARD_EDITOR_HEIGHT))
            .padding(spacing::XS);

        let attachment: Element<'a, Message> = match &self.image {
            Some(path) => row![
                text(
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default()
                )
                .size(typography::CAPTION),
                button(text(i18n.tr("compose-remove-image")).size(typography::CAPTION))
                    .style(button::text)
                    .on_press(Message::ClearImage),
            ]
            .spacing(spacing::XS)
            .align_y(iced::Alignment::Center)
            .into(),
            None => button(text(i18n.tr("compose-attach-image")).size(typography::BODY))
                .style(button::secondary)
                .on_press(Message::PickImage)
                .into(),
        };

        let mut form: Column<'a, Message> = column![
            text(i18n.tr_with_args("compose-title", &[("name", ctx.author.name())]))
                .size(typography::TITLE_SM),
            editor,
            attachment,
        ]
        .spacing(spacing::XS)
        .width(Length::Fill);

        if let Some(err) = self.error {
            form = form.push(
                text(super::validation_text(i18n, err))
                    .size(typography::BODY)
                    .color(palette::ERROR_500),
            );
        }

        form.push(button(text(i18n.tr("compose-submit"))).on_press(Message::Submit))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author::sign_in("Ana", "ana@example.org").expect("valid")
    }

    #[test]
    fn empty_body_is_refused() {
        let mut state = State::default();
        assert_eq!(state.handle(Message::Submit, &author()), Effect::None);
        assert_eq!(state.error(), Some(ValidationError::EmptyContent));
    }

    #[test]
    fn submit_clears_body_and_takes_image() {
        let mut state = State::default();
        state.restore("Bon voyage", None);
        state.handle(
            Message::ImagePicked(Some(PathBuf::from("/tmp/us.png"))),
            &author(),
        );

        let effect = state.handle(Message::Submit, &author());
        let Effect::Submit { card, image } = effect else {
            panic!("expected submit effect");
        };
        assert_eq!(card.content, "Bon voyage");
        assert_eq!(card.name, "Ana");
        assert_eq!(image, Some(PathBuf::from("/tmp/us.png")));
        assert!(state.text().trim().is_empty());
        assert!(state.image().is_none());
    }

    #[test]
    fn cancelled_pick_keeps_previous_image() {
        let mut state = State::default();
        state.handle(
            Message::ImagePicked(Some(PathBuf::from("/tmp/a.png"))),
            &author(),
        );
        state.handle(Message::ImagePicked(None), &author());
        assert_eq!(state.image(), Some(&PathBuf::from("/tmp/a.png")));
    }

    #[test]
    fn restore_puts_draft_back() {
        let mut state = State::default();
        state.restore("Draft", Some(PathBuf::from("/tmp/a.png")));
        assert_eq!(state.text().trim(), "Draft");
        assert!(state.image().is_some());
    }
}
