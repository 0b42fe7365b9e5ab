// SPDX-License-Identifier: MPL-2.0
//! Zoom and pan state machine for a single displayed image.
//!
//! [`ViewportController`] owns the zoom factor, pan offset, drag state and
//! loaded flag of the image viewer. It reacts to explicit calls from the host
//! (open, natural size known, pointer events, zoom buttons) and never touches
//! the toolkit, the window or the network, which keeps every transition
//! testable on its own.
//!
//! ```text
//!            open / close
//!  ┌──────────────────────────────┐
//!  ▼                              │
//! Unloaded ── natural size ──▶ Loaded ── begin_drag (zoom > 1) ──▶ Dragging
//!                                ▲                                   │
//!                                └──────── end_drag ─────────────────┘
//! ```

pub mod transition;
pub mod vector;
pub mod zoom;

pub use transition::{ImageTransform, Placement, Transition, TransformAnimator};
pub use vector::Vector2;
pub use zoom::{fit_zoom, ZoomBounds};

use crate::config::{DEFAULT_ZOOM_FACTOR, TRANSFORM_TRANSITION_MS};
use crate::domain::image_source::ImageSource;
use std::time::Duration;

/// Interactive zoom and pan state for one image.
#[derive(Debug, Clone)]
pub struct ViewportController {
    bounds: ZoomBounds,
    source: Option<ImageSource>,
    zoom: f32,
    offset: Vector2,
    dragging: bool,
    drag_anchor: Vector2,
    loaded: bool,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            bounds,
            source: None,
            zoom: DEFAULT_ZOOM_FACTOR,
            offset: Vector2::ZERO,
            dragging: false,
            drag_anchor: Vector2::ZERO,
            loaded: false,
        }
    }

    /// Starts a fresh session for `source`.
    ///
    /// The image itself is loaded by the host, which reports back through
    /// [`ViewportController::on_natural_size_known`].
    pub fn open(&mut self, source: ImageSource) {
        self.reset_session();
        self.source = Some(source);
    }

    /// Ends the session; a later `open` starts clean.
    pub fn close(&mut self) {
        self.reset_session();
        self.source = None;
    }

    /// Computes the initial fit once the intrinsic image size and the
    /// viewport size are known.
    ///
    /// Returns `false` and leaves the state untouched when a dimension is
    /// not strictly positive.
    pub fn on_natural_size_known(
        &mut self,
        width: f32,
        height: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> bool {
        let Some(initial) = fit_zoom(width, height, viewport_width, viewport_height) else {
            tracing::debug!(width, height, viewport_width, viewport_height, "ignoring degenerate image size");
            return false;
        };

        tracing::debug!(initial, "fit image to viewport");
        self.zoom = initial;
        self.loaded = true;
        true
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.bounds.zoom_in(self.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.bounds.zoom_out(self.zoom);
    }

    /// Mouse wheel: positive deltas zoom in, negative zoom out.
    pub fn wheel(&mut self, delta: f32) {
        if delta > 0.0 {
            self.zoom_in();
        } else if delta < 0.0 {
            self.zoom_out();
        }
    }

    /// Back to natural size, centered. Drag and loaded flags are kept.
    pub fn reset_view(&mut self) {
        self.zoom = DEFAULT_ZOOM_FACTOR;
        self.offset = Vector2::ZERO;
    }

    /// Starts panning; ignored unless the image is magnified.
    pub fn begin_drag(&mut self, pointer: Vector2) {
        if !self.can_pan() {
            return;
        }
        self.dragging = true;
        // Anchor relative to the current offset so moves yield absolute offsets.
        self.drag_anchor = pointer - self.offset;
    }

    pub fn continue_drag(&mut self, pointer: Vector2) {
        if !self.dragging || !self.can_pan() {
            return;
        }
        self.offset = pointer - self.drag_anchor;
    }

    /// Stops panning. Safe to call at any time (pointer up or pointer leave).
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    fn reset_session(&mut self) {
        self.zoom = DEFAULT_ZOOM_FACTOR;
        self.offset = Vector2::ZERO;
        self.dragging = false;
        self.drag_anchor = Vector2::ZERO;
        self.loaded = false;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn zoom_factor(&self) -> f32 {
        self.zoom
    }

    #[must_use]
    pub fn pan_offset(&self) -> Vector2 {
        self.offset
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Anchor of the drag in progress, if any.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<Vector2> {
        self.dragging.then_some(self.drag_anchor)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Panning only makes sense once the image is magnified.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.zoom > 1.0
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.bounds.max()
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.bounds.min()
    }

    // ------------------------------------------------------------------
    // Rendering contract
    // ------------------------------------------------------------------

    /// Scale by the zoom factor, translate by `offset / zoom` in image space.
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        ImageTransform {
            scale: self.zoom,
            translate: self.offset / self.zoom,
        }
    }

    /// Hidden until the initial fit has run.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.loaded {
            1.0
        } else {
            0.0
        }
    }

    /// Transform changes follow the pointer directly while dragging.
    #[must_use]
    pub fn transition(&self) -> Transition {
        if self.dragging {
            Transition::Immediate
        } else {
            Transition::Smooth(Duration::from_millis(TRANSFORM_TRANSITION_MS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn source() -> ImageSource {
        ImageSource::parse("https://example.org/cake.png")
    }

    fn magnified(zoom: f32) -> ViewportController {
        let mut controller = ViewportController::default();
        controller.open(source());
        controller.on_natural_size_known(100.0, 100.0, 1000.0, 1000.0);
        while controller.zoom_factor() < zoom {
            controller.zoom_in();
        }
        controller
    }

    #[test]
    fn open_starts_unloaded_at_natural_size() {
        let mut controller = ViewportController::default();
        controller.open(source());

        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
        assert_eq!(controller.pan_offset(), Vector2::ZERO);
        assert!(!controller.is_dragging());
        assert!(!controller.is_loaded());
        assert_eq!(controller.source(), Some(&source()));
    }

    #[test]
    fn open_resets_a_previous_session() {
        let mut controller = magnified(3.0);
        controller.begin_drag(Vector2::new(10.0, 10.0));
        controller.continue_drag(Vector2::new(40.0, 20.0));
        assert_abs_diff_eq!(controller.zoom_factor(), 3.0);
        assert!(controller.is_loaded());

        controller.open(ImageSource::parse("/tmp/other.jpg"));

        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
        assert_eq!(controller.pan_offset(), Vector2::ZERO);
        assert!(!controller.is_dragging());
        assert!(!controller.is_loaded());
    }

    #[test]
    fn close_resets_and_forgets_source() {
        let mut controller = magnified(2.0);
        controller.begin_drag(Vector2::new(5.0, 5.0));
        controller.close();

        assert!(controller.source().is_none());
        assert!(!controller.is_loaded());
        assert!(!controller.is_dragging());
        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
    }

    #[test]
    fn natural_size_fits_large_images() {
        let mut controller = ViewportController::default();
        controller.open(source());

        assert!(controller.on_natural_size_known(4000.0, 3000.0, 1000.0, 1000.0));
        assert_abs_diff_eq!(controller.zoom_factor(), 0.25);
        assert!(controller.is_loaded());
    }

    #[test]
    fn natural_size_never_magnifies_small_images() {
        let mut controller = ViewportController::default();
        controller.open(source());

        controller.on_natural_size_known(320.0, 200.0, 1920.0, 1080.0);
        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
    }

    #[test]
    fn zero_natural_size_is_ignored() {
        let mut controller = ViewportController::default();
        controller.open(source());

        assert!(!controller.on_natural_size_known(0.0, 200.0, 800.0, 600.0));
        assert!(!controller.is_loaded());
        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
    }

    #[test]
    fn zoom_in_then_out_round_trips() {
        let mut controller = ViewportController::default();
        controller.zoom_in();
        controller.zoom_out();
        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
    }

    #[test]
    fn zoom_round_trip_is_lossy_only_at_bounds() {
        let bounds = ZoomBounds::default();
        let mut controller = ViewportController::default();
        for _ in 0..20 {
            controller.zoom_in();
        }
        assert_abs_diff_eq!(controller.zoom_factor(), bounds.max());

        controller.zoom_in();
        controller.zoom_out();
        assert_abs_diff_eq!(controller.zoom_factor(), bounds.max() - bounds.step());
    }

    #[test]
    fn zoom_stays_within_bounds_for_any_sequence() {
        let bounds = ZoomBounds::default();
        let mut controller = ViewportController::default();
        // Deterministic pseudo-random walk.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 2 == 0 {
                controller.zoom_in();
            } else {
                controller.zoom_out();
            }
            let zoom = controller.zoom_factor();
            assert!(zoom >= bounds.min() - f32::EPSILON);
            assert!(zoom <= bounds.max() + f32::EPSILON);
        }
    }

    #[test]
    fn wheel_maps_direction_to_zoom() {
        let mut controller = ViewportController::default();
        controller.wheel(1.0);
        assert_abs_diff_eq!(controller.zoom_factor(), 1.25);
        controller.wheel(-1.0);
        controller.wheel(-1.0);
        assert_abs_diff_eq!(controller.zoom_factor(), 0.75);
        controller.wheel(0.0);
        assert_abs_diff_eq!(controller.zoom_factor(), 0.75);
    }

    #[test]
    fn reset_view_restores_zoom_and_offset_only() {
        let mut controller = magnified(2.0);
        controller.begin_drag(Vector2::new(0.0, 0.0));
        controller.continue_drag(Vector2::new(30.0, 30.0));

        controller.reset_view();

        assert_abs_diff_eq!(controller.zoom_factor(), 1.0);
        assert_eq!(controller.pan_offset(), Vector2::ZERO);
        assert!(controller.is_dragging());
        assert!(controller.is_loaded());
    }

    #[test]
    fn begin_drag_at_natural_size_is_ignored() {
        let mut controller = ViewportController::default();
        controller.begin_drag(Vector2::new(10.0, 10.0));
        assert!(!controller.is_dragging());
        assert!(controller.drag_anchor().is_none());
    }

    #[test]
    fn drag_round_trip_moves_offset() {
        let mut controller = magnified(2.0);
        assert_abs_diff_eq!(controller.zoom_factor(), 2.0);

        controller.begin_drag(Vector2::new(100.0, 100.0));
        assert_eq!(controller.drag_anchor(), Some(Vector2::new(100.0, 100.0)));

        controller.continue_drag(Vector2::new(150.0, 130.0));
        assert_eq!(controller.pan_offset(), Vector2::new(50.0, 30.0));

        controller.end_drag();
        assert!(!controller.is_dragging());
        assert_eq!(controller.pan_offset(), Vector2::new(50.0, 30.0));
    }

    #[test]
    fn second_drag_continues_from_existing_offset() {
        let mut controller = magnified(2.0);
        controller.begin_drag(Vector2::new(100.0, 100.0));
        controller.continue_drag(Vector2::new(150.0, 130.0));
        controller.end_drag();

        controller.begin_drag(Vector2::new(10.0, 10.0));
        assert_eq!(controller.drag_anchor(), Some(Vector2::new(-40.0, -20.0)));
        controller.continue_drag(Vector2::new(20.0, 0.0));
        assert_eq!(controller.pan_offset(), Vector2::new(60.0, 20.0));
    }

    #[test]
    fn continue_drag_without_begin_is_ignored() {
        let mut controller = magnified(2.0);
        controller.continue_drag(Vector2::new(70.0, 70.0));
        assert_eq!(controller.pan_offset(), Vector2::ZERO);
    }

    #[test]
    fn continue_drag_after_zooming_back_out_is_ignored() {
        let mut controller = magnified(2.0);
        controller.begin_drag(Vector2::new(0.0, 0.0));
        controller.reset_view();
        controller.continue_drag(Vector2::new(70.0, 70.0));
        assert_eq!(controller.pan_offset(), Vector2::ZERO);
    }

    #[test]
    fn end_drag_without_begin_is_a_no_op() {
        let mut controller = ViewportController::default();
        controller.end_drag();
        assert!(!controller.is_dragging());
    }

    #[test]
    fn transform_divides_offset_by_zoom() {
        let mut controller = magnified(2.0);
        controller.begin_drag(Vector2::new(100.0, 100.0));
        controller.continue_drag(Vector2::new(150.0, 130.0));

        let transform = controller.transform();
        assert_abs_diff_eq!(transform.scale, 2.0);
        assert_eq!(transform.translate, Vector2::new(25.0, 15.0));
        assert_eq!(transform.screen_offset(), Vector2::new(50.0, 30.0));
    }

    #[test]
    fn image_is_hidden_until_loaded() {
        let mut controller = ViewportController::default();
        controller.open(source());
        assert_abs_diff_eq!(controller.opacity(), 0.0);

        controller.on_natural_size_known(10.0, 10.0, 100.0, 100.0);
        assert_abs_diff_eq!(controller.opacity(), 1.0);
    }

    #[test]
    fn transition_is_immediate_only_while_dragging() {
        let mut controller = magnified(2.0);
        assert!(matches!(controller.transition(), Transition::Smooth(_)));

        controller.begin_drag(Vector2::ZERO);
        assert_eq!(controller.transition(), Transition::Immediate);

        controller.end_drag();
        assert!(matches!(controller.transition(), Transition::Smooth(_)));
    }
}
