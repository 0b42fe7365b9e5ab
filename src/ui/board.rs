// SPDX-License-Identifier: MPL-2.0
//! The card list: header, per-card edit sessions, thumbnails and delete.

use crate::application::board::Board;
use crate::config::CARD_THUMBNAIL_HEIGHT;
use crate::domain::card::{Author, Card, CardId, EditOutcome, EditSession, ValidationError};
use crate::domain::ImageSource;
use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, image, mouse_area, row, text, text_editor, Column, Row, Space,
};
use iced::{Border, ContentFit, Element, Length, Theme};
use std::collections::{HashMap, HashSet};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub board: &'a Board,
    pub author: Option<&'a Author>,
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenImage(CardId),
    BeginEdit(CardId),
    EditAction(CardId, text_editor::Action),
    SaveEdit(CardId),
    CancelEdit(CardId),
    RequestDelete(CardId),
    SignIn,
    SignOut,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    OpenImage {
        source: ImageSource,
        author_name: String,
    },
    Update {
        id: CardId,
        content: String,
    },
    ConfirmDelete(CardId),
    SignIn,
    SignOut,
}

struct CardEditor {
    session: EditSession,
    draft: text_editor::Content,
    error: Option<ValidationError>,
}

/// Per-card UI state that is not part of the card data.
#[derive(Default)]
pub struct State {
    editors: HashMap<CardId, CardEditor>,
    thumbnails: HashMap<ImageSource, Handle>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("editing", &self.editors.keys().collect::<Vec<_>>())
            .field("thumbnails", &self.thumbnails.len())
            .finish()
    }
}

impl State {
    pub fn handle(&mut self, message: Message, board: &Board, author: Option<&Author>) -> Effect {
        match message {
            Message::OpenImage(id) => {
                if let Some(card) = board.get(id) {
                    if let Some(source) = &card.image {
                        return Effect::OpenImage {
                            source: source.clone(),
                            author_name: card.name.clone(),
                        };
                    }
                }
            }
            Message::BeginEdit(id) => {
                let Some(card) = board
                    .get(id)
                    .filter(|card| can_edit(author, card) && !board.is_pending(card.id))
                else {
                    return Effect::None;
                };
                let mut session = EditSession::default();
                session.begin(&card.content);
                self.editors.insert(
                    id,
                    CardEditor {
                        session,
                        draft: text_editor::Content::with_text(&card.content),
                        error: None,
                    },
                );
            }
            Message::EditAction(id, action) => {
                if let Some(editor) = self.editors.get_mut(&id) {
                    if action.is_edit() {
                        editor.error = None;
                    }
                    editor.draft.perform(action);
                }
            }
            Message::SaveEdit(id) => {
                let Some(editor) = self.editors.get_mut(&id) else {
                    return Effect::None;
                };
                match editor.session.save(&editor.draft.text()) {
                    EditOutcome::Unchanged => {
                        self.editors.remove(&id);
                    }
                    EditOutcome::Changed(content) => {
                        self.editors.remove(&id);
                        return Effect::Update { id, content };
                    }
                    EditOutcome::Invalid(err) => editor.error = Some(err),
                }
            }
            Message::CancelEdit(id) => {
                self.editors.remove(&id);
            }
            Message::RequestDelete(id) => {
                if !board.is_pending(id) && board.get(id).is_some_and(|card| can_edit(author, card)) {
                    return Effect::ConfirmDelete(id);
                }
            }
            Message::SignIn => return Effect::SignIn,
            Message::SignOut => {
                self.editors.clear();
                return Effect::SignOut;
            }
        }
        Effect::None
    }

    #[must_use]
    pub fn is_editing(&self, id: CardId) -> bool {
        self.editors
            .get(&id)
            .is_some_and(|editor| editor.session.is_editing())
    }

    /// Drops edit sessions of cards that are gone.
    pub fn retain_cards(&mut self, board: &Board) {
        self.editors.retain(|id, _| board.get(*id).is_some());
    }

    /// Sources that have no thumbnail yet.
    #[must_use]
    pub fn missing_thumbnails(&self, board: &Board) -> Vec<ImageSource> {
        let mut seen = HashSet::new();
        board
            .cards()
            .iter()
            .filter_map(|card| card.image.clone())
            .filter(|source| !self.thumbnails.contains_key(source))
            .filter(|source| seen.insert(source.clone()))
            .collect()
    }

    pub fn set_thumbnail(&mut self, source: ImageSource, bytes: Vec<u8>) {
        self.thumbnails.insert(source, Handle::from_bytes(bytes));
    }

    #[must_use]
    pub fn has_thumbnail(&self, source: &ImageSource) -> bool {
        self.thumbnails.contains_key(source)
    }

    /// Header with the title, card count and sign-in controls.
    pub fn header<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;
        let count = ctx.board.len().to_string();

        let account: Element<'a, Message> = match ctx.author {
            Some(author) => row![
                text(i18n.tr_with_args("board-signed-in-as", &[("name", author.name())]))
                    .size(typography::BODY),
                button(text(i18n.tr("board-sign-out")).size(typography::BODY))
                    .style(button::secondary)
                    .on_press(Message::SignOut),
            ]
            .spacing(spacing::XS)
            .align_y(iced::Alignment::Center)
            .into(),
            None => button(text(i18n.tr("board-sign-in")).size(typography::BODY))
                .on_press(Message::SignIn)
                .into(),
        };

        row![
            column![
                text(i18n.tr("board-title")).size(typography::TITLE_LG),
                text(i18n.tr_with_args("board-count", &[("count", count.as_str())]))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            ],
            Space::new().width(Length::Fill),
            account,
        ]
        .align_y(iced::Alignment::Center)
        .width(Length::Fill)
        .into()
    }

    /// The cards, oldest first, or the empty-state line.
    pub fn list<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        if ctx.board.is_empty() {
            return container(
                text(ctx.i18n.tr("board-empty"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
            .padding(spacing::LG)
            .center_x(Length::Fill)
            .into();
        }

        ctx.board
            .cards()
            .iter()
            .fold(Column::new().spacing(spacing::MD), |list, card| {
                list.push(self.card_view(ctx, card))
            })
            .width(Length::Fixed(sizing::BOARD_WIDTH))
            .into()
    }

    fn card_view<'a>(&'a self, ctx: &ViewContext<'a>, card: &'a Card) -> Element<'a, Message> {
        let i18n = ctx.i18n;
        let editable = can_edit(ctx.author, card);

        let mut body = Column::new().spacing(spacing::XS).push(
            text(card.name.as_str())
                .size(typography::TITLE_SM)
                .color(palette::ROSE_500),
        );

        if let Some(editor) = self.editors.get(&card.id) {
            body = body.push(
                text_editor(&editor.draft)
                    .on_action(move |action| Message::EditAction(card.id, action))
                    .height(Length::Fixed(sizing::CARD_EDITOR_HEIGHT)),
            );
            if let Some(err) = editor.error {
                body = body.push(
                    text(super::validation_text(i18n, err))
                        .size(typography::CAPTION)
                        .color(palette::ERROR_500),
                );
            }
            body = body.push(
                row![
                    button(text(i18n.tr("card-save")).size(typography::BODY))
                        .on_press(Message::SaveEdit(card.id)),
                    button(text(i18n.tr("card-cancel")).size(typography::BODY))
                        .style(button::secondary)
                        .on_press(Message::CancelEdit(card.id)),
                ]
                .spacing(spacing::XS),
            );
        } else {
            body = body.push(text(card.content.as_str()).size(typography::BODY));
        }

        if let Some(source) = &card.image {
            body = body.push(self.thumbnail(ctx, card.id, source));
        }

        let mut footer = Row::new()
            .spacing(spacing::XS)
            .align_y(iced::Alignment::Center)
            .push(
                text(card.created_at.format("%Y-%m-%d %H:%M").to_string())
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            )
            .push(Space::new().width(Length::Fill));

        if editable && !self.is_editing(card.id) {
            // Disabled until the store has confirmed the card.
            let settled = !ctx.board.is_pending(card.id);
            footer = footer
                .push(
                    button(text(i18n.tr("card-edit")).size(typography::CAPTION))
                        .style(button::text)
                        .on_press_maybe(settled.then_some(Message::BeginEdit(card.id))),
                )
                .push(
                    button(text(i18n.tr("card-delete")).size(typography::CAPTION))
                        .style(button::danger)
                        .on_press_maybe(settled.then_some(Message::RequestDelete(card.id))),
                );
        }

        container(body.push(footer))
            .padding(spacing::MD)
            .width(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(palette::ROSE_100.into()),
                border: Border {
                    radius: radius::LG.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into()
    }

    fn thumbnail<'a>(
        &'a self,
        ctx: &ViewContext<'a>,
        id: CardId,
        source: &ImageSource,
    ) -> Element<'a, Message> {
        let content: Element<'a, Message> = match self.thumbnails.get(source) {
            Some(handle) => image(handle.clone())
                .height(Length::Fixed(CARD_THUMBNAIL_HEIGHT))
                .content_fit(ContentFit::Contain)
                .into(),
            None => text(ctx.i18n.tr("card-image-loading"))
                .size(typography::CAPTION)
                .into(),
        };

        mouse_area(
            container(content)
                .style(|_theme: &Theme| container::Style {
                    background: Some(palette::AMBER_100.into()),
                    border: Border {
                        radius: radius::SM.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .padding(spacing::XXS),
        )
        .on_press(Message::OpenImage(id))
        .interaction(iced::mouse::Interaction::Pointer)
        .into()
    }
}

fn can_edit(author: Option<&Author>, card: &Card) -> bool {
    author.is_some_and(|author| author.can_edit(card))
}
