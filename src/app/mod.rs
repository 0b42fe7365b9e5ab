// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the board, the forms
//! and the image viewer.
//!
//! The `App` struct wires the components to the card store and turns their
//! effects into background tasks (store calls, image fetches, dialogs).

mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::application::board::Board;
use crate::application::port::CardStore;
use crate::config::{self, Config, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH};
use crate::domain::card::Author;
use crate::domain::ImageSource;
use crate::i18n::I18n;
use crate::infrastructure::{FileStore, MemoryStore};
use crate::ui::{auth_form, board as board_ui, card_form, image_modal};
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    store: Arc<dyn CardStore>,
    board: Board,
    board_ui: board_ui::State,
    author: Option<Author>,
    auth_form: auth_form::State,
    card_form: card_form::State,
    image_modal: image_modal::State,
    status: Option<Status>,
    window_size: Size,
}

/// A transient line shown under the header, kept as an i18n key so it is
/// rendered in the current locale.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Status {
    pub key: String,
    pub args: Vec<(String, String)>,
    pub is_error: bool,
}

impl Status {
    pub(crate) fn info(key: &str) -> Self {
        Self {
            key: key.to_string(),
            args: Vec::new(),
            is_error: false,
        }
    }

    pub(crate) fn error(key: &str) -> Self {
        Self {
            is_error: true,
            ..Self::info(key)
        }
    }

    #[must_use]
    pub(crate) fn with_arg(mut self, name: &str, value: impl Into<String>) -> Self {
        self.args.push((name.to_string(), value.into()));
        self
    }

    pub(crate) fn text(&self, i18n: &I18n) -> String {
        let args: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        i18n.tr_with_args(&self.key, &args)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("cards", &self.board.len())
            .field("signed_in", &self.author.is_some())
            .field("viewer_open", &self.image_modal.is_open())
            .finish_non_exhaustive()
    }
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires a `Fn` boot closure; the flags are consumed on first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the application and the startup tasks (card listing and,
    /// when a path was given on the command line, the first image).
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let data_dir = flags
            .data_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config.storage.data_dir.clone());
        let (store, store_warning) = open_store(flags.ephemeral, data_dir);

        let mut app = Self::with_store(store, i18n, &config);
        app.status = config_warning
            .as_deref()
            .or(store_warning)
            .map(Status::error);

        let mut tasks = vec![update::load_cards(app.store.clone())];
        if let Some(path) = flags.file_path {
            tasks.push(app.open_image(ImageSource::parse(&path), None));
        }

        tracing::info!(locale = %app.i18n.current_locale(), ephemeral = flags.ephemeral, "application started");
        (app, Task::batch(tasks))
    }

    /// Application with an explicit store and no startup tasks.
    pub fn with_store(store: Arc<dyn CardStore>, i18n: I18n, config: &Config) -> Self {
        Self {
            i18n,
            screen: Screen::Board,
            store,
            board: Board::default(),
            board_ui: board_ui::State::default(),
            author: None,
            auth_form: auth_form::State::default(),
            card_form: card_form::State::default(),
            image_modal: image_modal::State::new(config.viewer.zoom_bounds()),
            status: None,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(self.image_modal.is_open()),
            subscription::create_tick_subscription(self.image_modal.is_animating()),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            board: &self.board,
            board_ui: &self.board_ui,
            author: self.author.as_ref(),
            auth_form: &self.auth_form,
            card_form: &self.card_form,
            image_modal: &self.image_modal,
            status: self.status.as_ref(),
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    /// Opens the viewer and starts fetching the image.
    fn open_image(&mut self, source: ImageSource, caption: Option<String>) -> Task<Message> {
        self.image_modal.set_window_size(self.window_size);
        self.image_modal.open(source.clone(), caption);
        update::load_image(self.store.clone(), source, |source, result| {
            Message::ImageModal(image_modal::Message::Loaded { source, result })
        })
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    #[must_use]
    pub fn image_modal(&self) -> &image_modal::State {
        &self.image_modal
    }
}

/// Picks the card store; a file store that cannot be opened degrades to an
/// in-memory one with a warning key.
fn open_store(
    ephemeral: bool,
    data_dir: Option<PathBuf>,
) -> (Arc<dyn CardStore>, Option<&'static str>) {
    if ephemeral {
        return (Arc::new(MemoryStore::default()), None);
    }
    match FileStore::open(data_dir) {
        Ok(store) => (Arc::new(store), None),
        Err(err) => {
            tracing::error!(error = %err, "cannot open card store, keeping cards in memory");
            (
                Arc::new(MemoryStore::default()),
                Some("status-store-unavailable"),
            )
        }
    }
}
