// SPDX-License-Identifier: MPL-2.0
//! Message routing and the background tasks behind store and image calls.
//!
//! Store mutations are optimistic: the board changes first, the blocking
//! store call runs on the tokio pool, and a failure replays the [`Undo`]
//! returned by the board.

use super::{App, Message, Screen, Status};
use crate::application::port::CardStore;
use crate::domain::card::{Card, CardId, NewCard};
use crate::domain::ImageSource;
use crate::error::Error;
use crate::infrastructure::{fetch, LoadedImage};
use crate::ui::{auth_form, board as board_ui, card_form, image_modal};
use chrono::Utc;
use iced::Task;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs a blocking store call off the UI thread and flattens the outcome.
async fn blocking<T, F>(call: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|err| format!("store task failed: {err}"))?
        .map_err(|err| err.to_string())
}

pub(super) fn load_cards(store: Arc<dyn CardStore>) -> Task<Message> {
    Task::perform(
        async move { blocking(move || store.list()).await },
        Message::CardsLoaded,
    )
}

/// Loads `source`, preferring bytes the store serves itself over a fetch.
pub(super) fn load_image(
    store: Arc<dyn CardStore>,
    source: ImageSource,
    to_message: fn(ImageSource, Result<LoadedImage, String>) -> Message,
) -> Task<Message> {
    Task::perform(
        async move {
            let lookup = source.clone();
            let stored = tokio::task::spawn_blocking(move || store.read_image(&lookup))
                .await
                .ok()
                .flatten();
            let result = match stored {
                Some(bytes) => fetch::into_loaded(source.clone(), bytes),
                None => fetch::load_image(source.clone()).await,
            };
            (source, result.map_err(|err| err.to_string()))
        },
        move |(source, result)| to_message(source, result),
    )
}

fn load_thumbnails(app: &App) -> Task<Message> {
    let tasks: Vec<_> = app
        .board_ui
        .missing_thumbnails(&app.board)
        .into_iter()
        .map(|source| {
            load_image(app.store.clone(), source, |source, result| {
                Message::ThumbnailLoaded { source, result }
            })
        })
        .collect();
    Task::batch(tasks)
}

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Board(message) => handle_board(app, message),
        Message::AuthForm(message) => handle_auth_form(app, message),
        Message::CardForm(message) => handle_card_form(app, message),
        Message::ImageModal(message) => handle_image_modal(app, message),
        Message::Tick(now) => handle_image_modal(app, image_modal::Message::Tick(now)),
        Message::CardsLoaded(result) => {
            match result {
                Ok(cards) => {
                    tracing::info!(count = cards.len(), "cards loaded");
                    app.board.replace_all(cards);
                    app.board_ui.retain_cards(&app.board);
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to list cards");
                    app.status = Some(Status::error("status-load-failed"));
                }
            }
            load_thumbnails(app)
        }
        Message::CardCreated {
            temp_id,
            undo,
            content,
            image,
            result,
        } => {
            match result {
                Ok(card) => {
                    tracing::info!(id = %card.id, "card stored");
                    app.board.confirm_create(temp_id, card);
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to store card");
                    app.board.rollback(undo);
                    app.card_form.restore(&content, image);
                    app.status = Some(Status::error("status-create-failed"));
                }
            }
            load_thumbnails(app)
        }
        Message::CardUpdated { undo, result } => {
            match result {
                Ok(card) => app.board.confirm_update(card),
                Err(err) => {
                    tracing::error!(error = %err, "failed to update card");
                    app.board.rollback(undo);
                    app.status = Some(Status::error("status-update-failed"));
                }
            }
            Task::none()
        }
        Message::CardDeleted { undo, result } => {
            if let Err(err) = result {
                tracing::error!(error = %err, "failed to delete card");
                app.board.rollback(undo);
                app.status = Some(Status::error("status-delete-failed"));
            }
            Task::none()
        }
        Message::DeleteConfirmed { id, confirmed } => {
            if confirmed {
                delete_card(app, id)
            } else {
                Task::none()
            }
        }
        Message::ThumbnailLoaded { source, result } => {
            match result {
                Ok(loaded) => app.board_ui.set_thumbnail(source, loaded.bytes),
                Err(err) => tracing::warn!(%source, error = %err, "thumbnail unavailable"),
            }
            Task::none()
        }
        Message::DownloadTargetChosen { path, bytes } => match path {
            Some(path) => Task::perform(
                async move {
                    fetch::save_bytes(path, bytes)
                        .await
                        .map_err(|err| err.to_string())
                },
                Message::DownloadFinished,
            ),
            None => Task::none(),
        },
        Message::DownloadFinished(result) => {
            app.status = Some(match result {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "image saved");
                    Status::info("status-download-saved")
                        .with_arg("path", path.display().to_string())
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to save image");
                    Status::error("status-download-failed")
                }
            });
            Task::none()
        }
        Message::WindowResized(size) => {
            app.window_size = size;
            app.image_modal.set_window_size(size);
            Task::none()
        }
        Message::DismissStatus => {
            app.status = None;
            Task::none()
        }
    }
}

fn handle_board(app: &mut App, message: board_ui::Message) -> Task<Message> {
    match app
        .board_ui
        .handle(message, &app.board, app.author.as_ref())
    {
        board_ui::Effect::None => Task::none(),
        board_ui::Effect::OpenImage {
            source,
            author_name,
        } => {
            let caption = app
                .i18n
                .tr_with_args("image-modal-caption", &[("name", author_name.as_str())]);
            app.open_image(source, Some(caption))
        }
        board_ui::Effect::Update { id, content } => update_card(app, id, content),
        board_ui::Effect::ConfirmDelete(id) => confirm_delete(app, id),
        board_ui::Effect::SignIn => {
            app.screen = Screen::SignIn;
            Task::none()
        }
        board_ui::Effect::SignOut => {
            if let Some(author) = app.author.take() {
                tracing::info!(name = author.name(), "signed out");
            }
            Task::none()
        }
    }
}

fn handle_auth_form(app: &mut App, message: auth_form::Message) -> Task<Message> {
    match app.auth_form.handle(message) {
        auth_form::Effect::None => {}
        auth_form::Effect::SignedIn(author) => {
            tracing::info!(name = author.name(), "signed in");
            app.author = Some(author);
            app.screen = Screen::Board;
        }
        auth_form::Effect::Cancelled => app.screen = Screen::Board,
    }
    Task::none()
}

fn handle_card_form(app: &mut App, message: card_form::Message) -> Task<Message> {
    let Some(author) = app.author.clone() else {
        return Task::none();
    };
    match app.card_form.handle(message, &author) {
        card_form::Effect::None => Task::none(),
        card_form::Effect::PickImage => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .add_filter("image", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            |path| Message::CardForm(card_form::Message::ImagePicked(path)),
        ),
        card_form::Effect::Submit { card, image } => create_card(app, card, image),
    }
}

fn handle_image_modal(app: &mut App, message: image_modal::Message) -> Task<Message> {
    match app.image_modal.handle(message) {
        image_modal::Effect::None | image_modal::Effect::Close => Task::none(),
        image_modal::Effect::Download { file_name, bytes } => Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_file_name(file_name)
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            move |path| Message::DownloadTargetChosen { path, bytes },
        ),
    }
}

/// Shows the card at once; the store upload and insert follow.
fn create_card(app: &mut App, card: NewCard, image: Option<PathBuf>) -> Task<Message> {
    let content = card.content.clone();
    let placeholder = NewCard {
        image: image.clone().map(ImageSource::Path),
        ..card.clone()
    };
    let (temp_id, undo) = app.board.apply_create(placeholder, Utc::now());

    let store = app.store.clone();
    let local = image.clone();
    Task::perform(
        async move {
            blocking(move || store_card(store.as_ref(), card, local.as_deref())).await
        },
        move |result| Message::CardCreated {
            temp_id,
            undo,
            content,
            image,
            result,
        },
    )
}

/// Uploads the picked image, then creates the card pointing at it. The
/// upload is dropped again when the card cannot be created.
fn store_card(
    store: &dyn CardStore,
    mut card: NewCard,
    image: Option<&Path>,
) -> crate::error::Result<Card> {
    let Some(path) = image else {
        return store.create(card);
    };
    let uploaded = upload(store, path)?;
    card.image = Some(uploaded.clone());
    store.create(card).inspect_err(|_| {
        if let Err(err) = store.remove_image(&uploaded) {
            tracing::warn!(error = %err, source = %uploaded, "cannot remove orphaned upload");
        }
    })
}

fn upload(store: &dyn CardStore, path: &Path) -> crate::error::Result<ImageSource> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Image(format!("not a file: {}", path.display())))?;
    store.upload_image(&file_name, &bytes)
}

fn update_card(app: &mut App, id: CardId, content: String) -> Task<Message> {
    let Some(undo) = app.board.apply_update(id, content.clone()) else {
        return Task::none();
    };
    let store = app.store.clone();
    Task::perform(
        async move { blocking(move || store.update_content(id, content)).await },
        move |result: Result<Card, String>| Message::CardUpdated { undo, result },
    )
}

fn confirm_delete(app: &App, id: CardId) -> Task<Message> {
    let title = app.i18n.tr("delete-confirm-title");
    let body = app.i18n.tr("delete-confirm-body");
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title(title)
                .set_description(body)
                .set_buttons(rfd::MessageButtons::YesNo)
                .show()
                .await
        },
        move |answer| Message::DeleteConfirmed {
            id,
            confirmed: matches!(answer, rfd::MessageDialogResult::Yes),
        },
    )
}

fn delete_card(app: &mut App, id: CardId) -> Task<Message> {
    let Some(undo) = app.board.apply_delete(id) else {
        return Task::none();
    };
    app.board_ui.retain_cards(&app.board);
    let store = app.store.clone();
    Task::perform(
        async move { blocking(move || store.delete(id)).await },
        move |result| Message::CardDeleted { undo, result },
    )
}
