// SPDX-License-Identifier: MPL-2.0
//! Modal image viewer.
//!
//! Hosts a [`ViewportController`] and turns pointer, wheel and toolbar input
//! into controller calls. The displayed transform follows the controller
//! through a [`TransformAnimator`], ticked by the application while
//! [`State::is_animating`] is true.
//!
//! The image bytes are fetched by the application; the result comes back as
//! [`Message::Loaded`] and is dropped if another image was opened meanwhile.

mod canvas;

use crate::config::{MODAL_VIEWPORT_FRACTION, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH};
use crate::domain::viewport::{TransformAnimator, Vector2, ViewportController, ZoomBounds};
use crate::domain::ImageSource;
use crate::i18n::I18n;
use crate::infrastructure::LoadedImage;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use canvas::ImageCanvas;
use iced::widget::image::Handle;
use iced::widget::{button, center, container, mouse_area, opaque, row, text, Canvas, Column, Stack};
use iced::{mouse, Color, Element, Length, Point, Size};
use std::time::Instant;

/// Contextual data needed to render the viewer.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        source: ImageSource,
        result: Result<LoadedImage, String>,
    },
    ZoomIn,
    ZoomOut,
    ResetView,
    Download,
    Close,
    CursorMoved(Point),
    PointerPressed,
    PointerReleased,
    PointerExited,
    Wheel(mouse::ScrollDelta),
    Tick(Instant),
}

/// Requests for the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Close,
    Download { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone)]
struct DisplayedImage {
    handle: Handle,
    natural: Vector2,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct State {
    controller: ViewportController,
    animator: TransformAnimator,
    image: Option<DisplayedImage>,
    caption: Option<String>,
    load_failed: bool,
    cursor: Option<Vector2>,
    viewport: Vector2,
}

impl Default for State {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl State {
    #[must_use]
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            controller: ViewportController::new(bounds),
            animator: TransformAnimator::default(),
            image: None,
            caption: None,
            load_failed: false,
            cursor: None,
            viewport: Vector2::new(
                WINDOW_DEFAULT_WIDTH * MODAL_VIEWPORT_FRACTION,
                WINDOW_DEFAULT_HEIGHT * MODAL_VIEWPORT_FRACTION,
            ),
        }
    }

    /// Shows the viewer for `source`. The caller starts the fetch.
    pub fn open(&mut self, source: ImageSource, caption: Option<String>) {
        self.controller.open(source);
        self.animator.snap(self.controller.transform());
        self.image = None;
        self.caption = caption;
        self.load_failed = false;
    }

    pub fn close(&mut self) {
        self.controller.close();
        self.animator.snap(self.controller.transform());
        self.image = None;
        self.caption = None;
        self.load_failed = false;
        self.cursor = None;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.controller.source().is_some()
    }

    #[must_use]
    pub fn source(&self) -> Option<&ImageSource> {
        self.controller.source()
    }

    #[must_use]
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Area left to the image once the panel padding, toolbar and caption
    /// are laid out.
    fn stage_size(&self) -> Vector2 {
        let mut chrome = 2.0 * spacing::XS + spacing::XS + sizing::VIEWER_TOOLBAR_HEIGHT;
        if self.caption.is_some() {
            chrome += spacing::XS + sizing::VIEWER_CAPTION_HEIGHT;
        }
        Vector2::new(
            (self.viewport.x - 2.0 * spacing::XS).max(1.0),
            (self.viewport.y - chrome).max(1.0),
        )
    }

    /// Updates the viewport from the window size. Only affects later fits.
    pub fn set_window_size(&mut self, size: Size) {
        self.viewport = Vector2::new(
            size.width * MODAL_VIEWPORT_FRACTION,
            size.height * MODAL_VIEWPORT_FRACTION,
        );
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        let now = Instant::now();
        match message {
            Message::Loaded { source, result } => {
                if self.controller.source() != Some(&source) {
                    tracing::debug!(%source, "dropping stale image load");
                    return Effect::None;
                }
                self.on_loaded(result, now);
            }
            Message::ZoomIn => {
                self.controller.zoom_in();
                self.sync(now);
            }
            Message::ZoomOut => {
                self.controller.zoom_out();
                self.sync(now);
            }
            Message::ResetView => {
                self.controller.reset_view();
                self.sync(now);
            }
            Message::Wheel(delta) => {
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y.signum(),
                };
                self.controller.wheel(lines);
                self.sync(now);
            }
            Message::CursorMoved(point) => {
                let pointer = Vector2::new(point.x, point.y);
                self.cursor = Some(pointer);
                if self.controller.is_dragging() {
                    self.controller.continue_drag(pointer);
                    self.sync(now);
                }
            }
            Message::PointerPressed => {
                if let Some(pointer) = self.cursor {
                    self.controller.begin_drag(pointer);
                    self.sync(now);
                }
            }
            Message::PointerReleased | Message::PointerExited => {
                self.controller.end_drag();
                self.sync(now);
            }
            Message::Tick(now) => self.animator.tick(now),
            Message::Download => {
                if let (Some(image), Some(source)) = (&self.image, self.controller.source()) {
                    return Effect::Download {
                        file_name: source.suggested_file_name(),
                        bytes: image.bytes.clone(),
                    };
                }
            }
            Message::Close => {
                self.close();
                return Effect::Close;
            }
        }
        Effect::None
    }

    fn on_loaded(&mut self, result: Result<LoadedImage, String>, now: Instant) {
        let loaded = match result {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load image");
                self.load_failed = true;
                return;
            }
        };

        let natural = Vector2::new(loaded.width as f32, loaded.height as f32);
        let stage = self.stage_size();
        if !self
            .controller
            .on_natural_size_known(natural.x, natural.y, stage.x, stage.y)
        {
            self.load_failed = true;
            return;
        }

        self.image = Some(DisplayedImage {
            handle: Handle::from_bytes(loaded.bytes.clone()),
            natural,
            bytes: loaded.bytes,
        });
        self.animator.snap(self.controller.transform());
        self.sync(now);
    }

    fn sync(&mut self, now: Instant) {
        self.animator
            .retarget(self.controller.transform(), self.controller.transition(), now);
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let stage_size = self.stage_size();
        let stage = self.stage(&ctx);

        let mut panel = Column::new()
            .spacing(spacing::XS)
            .width(Length::Fill)
            .height(Length::Fill)
            .push(
                container(stage)
                    .width(Length::Fixed(stage_size.x))
                    .height(Length::Fixed(stage_size.y)),
            )
            .push(self.toolbar(&ctx));

        if let Some(caption) = &self.caption {
            panel = panel.push(
                text(caption)
                    .size(typography::BODY)
                    .color(palette::WHITE)
                    .width(Length::Fill)
                    .height(Length::Fixed(sizing::VIEWER_CAPTION_HEIGHT))
                    .center(),
            );
        }

        let backdrop = mouse_area(
            container(text(""))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::Style {
                    background: Some(
                        Color {
                            a: opacity::BACKDROP,
                            ..palette::BLACK
                        }
                        .into(),
                    ),
                    ..Default::default()
                }),
        )
        .on_press(Message::Close);

        let panel = container(panel)
            .width(Length::Fixed(self.viewport.x))
            .height(Length::Fixed(self.viewport.y))
            .padding(spacing::XS);

        Stack::new()
            .push(backdrop)
            .push(center(opaque(panel)))
            .into()
    }

    fn stage<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let Some(image) = &self.image else {
            let label = if self.load_failed {
                ctx.i18n.tr("image-modal-load-error")
            } else {
                ctx.i18n.tr("image-modal-loading")
            };
            return center(text(label).size(typography::BODY).color(palette::WHITE)).into();
        };

        let canvas = Canvas::new(ImageCanvas {
            handle: image.handle.clone(),
            natural: image.natural,
            transform: self.animator.current(),
            opacity: self.controller.opacity(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        let interaction = if self.controller.is_dragging() {
            mouse::Interaction::Grabbing
        } else if self.controller.can_pan() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        };

        mouse_area(canvas)
            .on_move(Message::CursorMoved)
            .on_press(Message::PointerPressed)
            .on_release(Message::PointerReleased)
            .on_exit(Message::PointerExited)
            .on_scroll(Message::Wheel)
            .interaction(interaction)
            .into()
    }

    fn toolbar<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let loaded = self.controller.is_loaded();
        let zoom_label = format!("{:.0}%", self.controller.zoom_factor() * 100.0);

        let button_height = Length::Fixed(sizing::BUTTON_HEIGHT);
        let controls = row![
            button(text("−").size(typography::TITLE_SM))
                .height(button_height)
                .on_press_maybe((loaded && self.controller.can_zoom_out()).then_some(Message::ZoomOut)),
            text(zoom_label).size(typography::BODY).color(palette::WHITE),
            button(text("+").size(typography::TITLE_SM))
                .height(button_height)
                .on_press_maybe((loaded && self.controller.can_zoom_in()).then_some(Message::ZoomIn)),
            button(text(ctx.i18n.tr("image-modal-reset")).size(typography::BODY))
                .height(button_height)
                .on_press_maybe(loaded.then_some(Message::ResetView)),
            button(text(ctx.i18n.tr("image-modal-download")).size(typography::BODY))
                .height(button_height)
                .on_press_maybe(self.image.is_some().then_some(Message::Download)),
            button(text(ctx.i18n.tr("image-modal-close")).size(typography::BODY))
                .height(button_height)
                .style(button::secondary)
                .on_press(Message::Close),
        ]
        .spacing(spacing::XS)
        .align_y(iced::Alignment::Center);

        container(controls)
            .padding(spacing::XS)
            .height(Length::Fixed(sizing::VIEWER_TOOLBAR_HEIGHT))
            .center_x(Length::Fill)
            .style(|_| container::Style {
                background: Some(palette::GRAY_700.into()),
                border: iced::Border {
                    radius: radius::MD.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;

    fn loaded(source: &ImageSource, width: u32, height: u32) -> Message {
        Message::Loaded {
            source: source.clone(),
            result: Ok(LoadedImage {
                source: source.clone(),
                bytes: vec![0; 4],
                width,
                height,
            }),
        }
    }

    fn open_state(source: &ImageSource) -> State {
        let mut state = State::default();
        state.set_window_size(Size::new(1000.0, 800.0));
        state.open(source.clone(), Some("caption".into()));
        state
    }

    #[test]
    fn load_fits_image_into_modal_viewport() {
        let source = ImageSource::parse("https://example.org/a.png");
        let mut state = open_state(&source);

        state.handle(loaded(&source, 1868, 400));

        // 95% of 1000 = 950 wide, less the panel padding: half the natural width.
        assert_abs_diff_eq!(state.controller().zoom_factor(), 0.5);
        assert!(state.controller().is_loaded());
    }

    #[test]
    fn tall_image_fits_above_toolbar_and_caption() {
        let source = ImageSource::parse("/tmp/tall.png");
        let mut state = open_state(&source);

        state.handle(loaded(&source, 400, 4000));

        let modal_height = 800.0 * MODAL_VIEWPORT_FRACTION;
        let chrome = 2.0 * spacing::XS
            + sizing::VIEWER_TOOLBAR_HEIGHT
            + spacing::XS
            + sizing::VIEWER_CAPTION_HEIGHT
            + spacing::XS;
        let fitted_height = 4000.0 * state.controller().zoom_factor();
        assert!(fitted_height + chrome <= modal_height + 0.01);
        assert_abs_diff_eq!(fitted_height + chrome, modal_height, epsilon = 0.01);
    }

    #[test]
    fn stage_grows_without_caption() {
        let source = ImageSource::parse("/tmp/a.png");
        let mut state = open_state(&source);
        let with_caption = state.stage_size();

        state.open(source, None);
        let without_caption = state.stage_size();

        assert_abs_diff_eq!(
            without_caption.y - with_caption.y,
            spacing::XS + sizing::VIEWER_CAPTION_HEIGHT
        );
        assert_abs_diff_eq!(without_caption.x, with_caption.x);
    }

    #[test]
    fn stale_load_is_ignored() {
        let first = ImageSource::parse("/tmp/first.png");
        let second = ImageSource::parse("/tmp/second.png");
        let mut state = open_state(&first);
        state.open(second.clone(), None);

        state.handle(loaded(&first, 10, 10));
        assert!(!state.controller().is_loaded());

        state.handle(loaded(&second, 10, 10));
        assert!(state.controller().is_loaded());
    }

    #[test]
    fn failed_load_stays_unloaded() {
        let source = ImageSource::parse("/tmp/missing.png");
        let mut state = open_state(&source);
        state.handle(Message::Loaded {
            source: source.clone(),
            result: Err("not found".into()),
        });
        assert!(state.load_failed());
        assert!(!state.controller().is_loaded());
        assert_eq!(state.handle(Message::Download), Effect::None);
    }

    #[test]
    fn drag_pans_only_when_magnified() {
        let source = ImageSource::parse("/tmp/a.png");
        let mut state = open_state(&source);
        state.handle(loaded(&source, 100, 100));

        state.handle(Message::CursorMoved(Point::new(100.0, 100.0)));
        state.handle(Message::PointerPressed);
        assert!(!state.controller().is_dragging());

        state.handle(Message::ZoomIn);
        state.handle(Message::ZoomIn);
        state.handle(Message::ZoomIn);
        state.handle(Message::ZoomIn);
        assert_abs_diff_eq!(state.controller().zoom_factor(), 2.0);

        state.handle(Message::PointerPressed);
        state.handle(Message::CursorMoved(Point::new(150.0, 130.0)));
        state.handle(Message::PointerReleased);

        let offset = state.controller().pan_offset();
        assert_abs_diff_eq!(offset.x, 50.0);
        assert_abs_diff_eq!(offset.y, 30.0);
        assert!(!state.controller().is_dragging());
    }

    #[test]
    fn dragging_moves_displayed_image_immediately() {
        let source = ImageSource::parse("/tmp/a.png");
        let mut state = open_state(&source);
        state.handle(loaded(&source, 100, 100));
        for _ in 0..4 {
            state.handle(Message::ZoomIn);
        }
        state.handle(Message::Tick(Instant::now() + Duration::from_secs(1)));

        state.handle(Message::CursorMoved(Point::new(0.0, 0.0)));
        state.handle(Message::PointerPressed);
        state.handle(Message::CursorMoved(Point::new(20.0, 0.0)));

        assert!(!state.is_animating());
        assert_abs_diff_eq!(state.animator.current().screen_offset().x, 20.0);
    }

    #[test]
    fn zoom_animates_toward_target() {
        let source = ImageSource::parse("/tmp/a.png");
        let mut state = open_state(&source);
        state.handle(loaded(&source, 100, 100));

        state.handle(Message::ZoomIn);
        assert!(state.is_animating());

        state.handle(Message::Tick(Instant::now() + Duration::from_secs(1)));
        assert!(!state.is_animating());
        assert_abs_diff_eq!(state.animator.current().scale, 1.25);
    }

    #[test]
    fn wheel_zooms_in_and_out() {
        let source = ImageSource::parse("/tmp/a.png");
        let mut state = open_state(&source);
        state.handle(loaded(&source, 100, 100));

        state.handle(Message::Wheel(mouse::ScrollDelta::Lines { x: 0.0, y: 1.0 }));
        assert_abs_diff_eq!(state.controller().zoom_factor(), 1.25);
        state.handle(Message::Wheel(mouse::ScrollDelta::Pixels { x: 0.0, y: -40.0 }));
        assert_abs_diff_eq!(state.controller().zoom_factor(), 1.0);
    }

    #[test]
    fn download_offers_fetched_bytes() {
        let source = ImageSource::parse("https://example.org/photos/cake.jpg?size=large");
        let mut state = open_state(&source);
        state.handle(loaded(&source, 10, 10));

        assert_eq!(
            state.handle(Message::Download),
            Effect::Download {
                file_name: "cake.jpg".into(),
                bytes: vec![0; 4],
            }
        );
    }

    #[test]
    fn close_resets_and_reports() {
        let source = ImageSource::parse("/tmp/a.png");
        let mut state = open_state(&source);
        state.handle(loaded(&source, 10, 10));
        state.handle(Message::ZoomIn);

        assert_eq!(state.handle(Message::Close), Effect::Close);
        assert!(!state.is_open());
        assert_abs_diff_eq!(state.controller().zoom_factor(), 1.0);
        assert!(!state.controller().is_loaded());
    }
}
