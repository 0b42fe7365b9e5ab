// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen and, when an image is open, layers the viewer
//! over it.

use super::{Message, Screen, Status};
use crate::application::board::Board;
use crate::domain::card::Author;
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{auth_form, board as board_ui, card_form, image_modal};
use iced::widget::{button, center, column, container, row, scrollable, text, Space, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub board: &'a Board,
    pub board_ui: &'a board_ui::State,
    pub author: Option<&'a Author>,
    pub auth_form: &'a auth_form::State,
    pub card_form: &'a card_form::State,
    pub image_modal: &'a image_modal::State,
    pub status: Option<&'a Status>,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Board => view_board(&ctx),
        Screen::SignIn => center(
            ctx.auth_form
                .view(auth_form::ViewContext { i18n: ctx.i18n })
                .map(Message::AuthForm),
        )
        .into(),
    };

    if !ctx.image_modal.is_open() {
        return current_view;
    }

    let modal = ctx
        .image_modal
        .view(image_modal::ViewContext { i18n: ctx.i18n })
        .map(Message::ImageModal);

    Stack::new()
        .push(current_view)
        .push(modal)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_board<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let board_ctx = board_ui::ViewContext {
        i18n: ctx.i18n,
        board: ctx.board,
        author: ctx.author,
    };

    let mut page = column![ctx.board_ui.header(&board_ctx).map(Message::Board)]
        .spacing(spacing::LG)
        .width(Length::Fixed(sizing::BOARD_WIDTH));

    if let Some(status) = ctx.status {
        page = page.push(status_line(ctx.i18n, status));
    }

    if let Some(author) = ctx.author {
        page = page.push(
            ctx.card_form
                .view(card_form::ViewContext {
                    i18n: ctx.i18n,
                    author,
                })
                .map(Message::CardForm),
        );
    }

    page = page.push(ctx.board_ui.list(&board_ctx).map(Message::Board));

    scrollable(
        container(page)
            .padding(spacing::LG)
            .center_x(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn status_line<'a>(i18n: &I18n, status: &Status) -> Element<'a, Message> {
    let color = if status.is_error {
        palette::ERROR_500
    } else {
        palette::SUCCESS_500
    };

    row![
        text(status.text(i18n)).size(typography::BODY).color(color),
        Space::new().width(Length::Fill),
        button(text("×").size(typography::BODY))
            .style(button::text)
            .on_press(Message::DismissStatus),
    ]
    .align_y(iced::Alignment::Center)
    .into()
}
