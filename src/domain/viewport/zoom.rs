// SPDX-License-Identifier: MPL-2.0
//! Zoom bounds and the fit-to-viewport computation.

use crate::config::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_STEP, MAX_ZOOM_STEP};

/// Zoom range and step, guaranteed valid by construction.
///
/// Invariants: `0 < min <= 1 <= max` and `0 < step <= MAX_ZOOM_STEP`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f32,
    max: f32,
    step: f32,
}

impl ZoomBounds {
    /// Builds bounds from raw values, returning `None` when they break the invariants.
    #[must_use]
    pub fn new(min: f32, max: f32, step: f32) -> Option<Self> {
        let finite = min.is_finite() && max.is_finite() && step.is_finite();
        if finite && min > 0.0 && min <= 1.0 && max >= 1.0 && step > 0.0 && step <= MAX_ZOOM_STEP
        {
            Some(Self { min, max, step })
        } else {
            None
        }
    }

    /// Like [`ZoomBounds::new`], but any missing or invalid component falls back to its default.
    #[must_use]
    pub fn from_optional(min: Option<f32>, max: Option<f32>, step: Option<f32>) -> Self {
        let defaults = Self::default();
        let min = min
            .filter(|&v| Self::new(v, defaults.max, defaults.step).is_some())
            .unwrap_or(defaults.min);
        let max = max
            .filter(|&v| Self::new(defaults.min, v, defaults.step).is_some())
            .unwrap_or(defaults.max);
        let step = step
            .filter(|&v| Self::new(defaults.min, defaults.max, v).is_some())
            .unwrap_or(defaults.step);

        Self { min, max, step }
    }

    #[must_use]
    pub fn min(self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f32 {
        self.max
    }

    #[must_use]
    pub fn step(self) -> f32 {
        self.step
    }

    /// Next zoom level when zooming in from `current`.
    #[must_use]
    pub fn zoom_in(self, current: f32) -> f32 {
        (current + self.step).min(self.max)
    }

    /// Next zoom level when zooming out from `current`.
    ///
    /// A fit zoom below `min` never grows on zoom out.
    #[must_use]
    pub fn zoom_out(self, current: f32) -> f32 {
        (current - self.step).max(self.min.min(current))
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

/// Zoom that shows the whole image inside the viewport without magnifying it.
///
/// Returns `min(viewport_w / image_w, viewport_h / image_h, 1.0)`, or `None`
/// when any dimension is non-positive or not finite.
#[must_use]
pub fn fit_zoom(image_width: f32, image_height: f32, viewport_width: f32, viewport_height: f32) -> Option<f32> {
    let dims = [image_width, image_height, viewport_width, viewport_height];
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return None;
    }

    let scale_x = viewport_width / image_width;
    let scale_y = viewport_height / image_height;
    Some(scale_x.min(scale_y).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_bounds_match_config() {
        let bounds = ZoomBounds::default();
        assert_abs_diff_eq!(bounds.min(), DEFAULT_MIN_ZOOM);
        assert_abs_diff_eq!(bounds.max(), DEFAULT_MAX_ZOOM);
        assert_abs_diff_eq!(bounds.step(), DEFAULT_ZOOM_STEP);
    }

    #[test]
    fn new_rejects_inverted_or_degenerate_ranges() {
        assert!(ZoomBounds::new(0.0, 3.0, 0.25).is_none());
        assert!(ZoomBounds::new(1.5, 3.0, 0.25).is_none());
        assert!(ZoomBounds::new(0.5, 0.8, 0.25).is_none());
        assert!(ZoomBounds::new(0.5, 3.0, 0.0).is_none());
        assert!(ZoomBounds::new(0.5, 3.0, f32::NAN).is_none());
        assert!(ZoomBounds::new(0.1, 3.0, 0.25).is_some());
    }

    #[test]
    fn from_optional_keeps_valid_parts() {
        let bounds = ZoomBounds::from_optional(Some(0.1), Some(-4.0), None);
        assert_abs_diff_eq!(bounds.min(), 0.1);
        assert_abs_diff_eq!(bounds.max(), DEFAULT_MAX_ZOOM);
        assert_abs_diff_eq!(bounds.step(), DEFAULT_ZOOM_STEP);
    }

    #[test]
    fn zoom_in_and_out_clamp() {
        let bounds = ZoomBounds::default();
        assert_abs_diff_eq!(bounds.zoom_in(2.9), DEFAULT_MAX_ZOOM);
        assert_abs_diff_eq!(bounds.zoom_out(0.6), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn zoom_out_below_min_does_not_grow() {
        let bounds = ZoomBounds::default();
        assert_abs_diff_eq!(bounds.zoom_out(0.2), 0.2);
    }

    #[test]
    fn fit_zoom_shrinks_large_images_on_the_tighter_axis() {
        // 4000x1000 into 1000x1000: width is the constraint.
        assert_eq!(fit_zoom(4000.0, 1000.0, 1000.0, 1000.0), Some(0.25));
        // 1000x4000 into 1000x1000: height is the constraint.
        assert_eq!(fit_zoom(1000.0, 4000.0, 1000.0, 1000.0), Some(0.25));
    }

    #[test]
    fn fit_zoom_never_magnifies() {
        assert_eq!(fit_zoom(100.0, 50.0, 1920.0, 1080.0), Some(1.0));
    }

    #[test]
    fn fit_zoom_guards_zero_dimensions() {
        assert_eq!(fit_zoom(0.0, 100.0, 800.0, 600.0), None);
        assert_eq!(fit_zoom(100.0, 0.0, 800.0, 600.0), None);
        assert_eq!(fit_zoom(100.0, 100.0, 0.0, 600.0), None);
        assert_eq!(fit_zoom(100.0, 100.0, 800.0, -1.0), None);
    }

    #[test]
    fn fit_zoom_is_positive_and_at_most_one_over_a_grid() {
        let sizes = [1.0, 37.0, 640.0, 1920.0, 12000.0];
        for iw in sizes {
            for ih in sizes {
                for vw in sizes {
                    for vh in sizes {
                        let zoom = fit_zoom(iw, ih, vw, vh).expect("all sizes positive");
                        let expected = (vw / iw).min(vh / ih).min(1.0);
                        assert_abs_diff_eq!(zoom, expected);
                        assert!(zoom > 0.0 && zoom <= 1.0);
                    }
                }
            }
        }
    }
}
