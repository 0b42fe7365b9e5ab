// SPDX-License-Identifier: MPL-2.0
//! Sign-in form: a display name and an optional email.
//!
//! The email is never verified. It only links a visitor to the cards they
//! wrote so they can edit or delete them later.

use crate::domain::card::{Author, ValidationError};
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use iced::widget::{button, column, row, text, text_input, Column};
use iced::{Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    EmailChanged(String),
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SignedIn(Author),
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    name: String,
    email: String,
    error: Option<ValidationError>,
}

impl State {
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::NameChanged(name) => {
                self.name = name;
                self.error = None;
            }
            Message::EmailChanged(email) => {
                self.email = email;
                self.error = None;
            }
            Message::Submit => match Author::sign_in(&self.name, &self.email) {
                Ok(author) => {
                    *self = Self::default();
                    return Effect::SignedIn(author);
                }
                Err(err) => self.error = Some(err),
            },
            Message::Cancel => {
                self.error = None;
                return Effect::Cancelled;
            }
        }
        Effect::None
    }

    #[must_use]
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let name = text_input(&i18n.tr("auth-name-placeholder"), &self.name)
            .on_input(Message::NameChanged)
            .on_submit(Message::Submit)
            .padding(spacing::XS);
        let email = text_input(&i18n.tr("auth-email-placeholder"), &self.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::Submit)
            .padding(spacing::XS);

        let mut form: Column<'a, Message> = column![
            text(i18n.tr("auth-title")).size(typography::TITLE_MD),
            text(i18n.tr("auth-name-label")).size(typography::BODY),
            name,
            text(i18n.tr("auth-email-label")).size(typography::BODY),
            email,
            text(i18n.tr("auth-email-hint"))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        ]
        .spacing(spacing::XS)
        .width(Length::Fixed(sizing::FORM_WIDTH));

        if let Some(err) = self.error {
            form = form.push(
                text(super::validation_text(i18n, err))
                    .size(typography::BODY)
                    .color(palette::ERROR_500),
            );
        }

        form.push(
            row![
                button(text(i18n.tr("auth-submit"))).on_press(Message::Submit),
                button(text(i18n.tr("auth-cancel")))
                    .style(button::secondary)
                    .on_press(Message::Cancel),
            ]
            .spacing(spacing::XS),
        )
        .into()
    }
}
