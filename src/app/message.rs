// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::board::Undo;
use crate::domain::card::{Card, CardId};
use crate::domain::ImageSource;
use crate::infrastructure::LoadedImage;
use crate::ui::{auth_form, board, card_form, image_modal};
use iced::Size;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. Component messages are
/// forwarded; the rest carry results of background tasks. Errors are
/// flattened to strings since messages must be `Clone`.
#[derive(Debug, Clone)]
pub enum Message {
    Board(board::Message),
    AuthForm(auth_form::Message),
    CardForm(card_form::Message),
    ImageModal(image_modal::Message),
    CardsLoaded(Result<Vec<Card>, String>),
    CardCreated {
        temp_id: CardId,
        undo: Undo,
        content: String,
        image: Option<PathBuf>,
        result: Result<Card, String>,
    },
    CardUpdated {
        undo: Undo,
        result: Result<Card, String>,
    },
    CardDeleted {
        undo: Undo,
        result: Result<(), String>,
    },
    DeleteConfirmed {
        id: CardId,
        confirmed: bool,
    },
    ThumbnailLoaded {
        source: ImageSource,
        result: Result<LoadedImage, String>,
    },
    DownloadTargetChosen {
        path: Option<PathBuf>,
        bytes: Vec<u8>,
    },
    DownloadFinished(Result<PathBuf, String>),
    WindowResized(Size),
    /// Animation frame for the image viewer.
    Tick(Instant),
    DismissStatus,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path or URL to open in the viewer on startup.
    pub file_path: Option<String>,
    /// Optional data directory override (card store).
    /// Takes precedence over `FAREWELL_LENS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FAREWELL_LENS_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Keep cards in memory only.
    pub ephemeral: bool,
}
