// SPDX-License-Identifier: MPL-2.0
//! Image transform derived from the viewport state, and its animation.
//!
//! The transform is expressed in the image's own coordinate space: the image
//! is scaled by `scale` and translated by `translate`, so the on-screen shift
//! is `translate * scale`. Easing runs on explicit `Instant`s supplied by the
//! host, keeping it testable without a clock.

use super::vector::Vector2;
use std::time::{Duration, Instant};

/// Scale and image-space translation applied to the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    pub scale: f32,
    pub translate: Vector2,
}

impl ImageTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vector2::ZERO,
    };

    /// Translation in screen pixels.
    #[must_use]
    pub fn screen_offset(self) -> Vector2 {
        self.translate * self.scale
    }

    /// Where an image of the given natural size lands inside a viewport,
    /// centered and then shifted by the screen offset.
    #[must_use]
    pub fn placement(self, natural: Vector2, viewport: Vector2) -> Placement {
        let size = natural * self.scale;
        let origin = (viewport - size) / 2.0 + self.screen_offset();
        Placement { origin, size }
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            translate: self.translate.lerp(other.translate, t),
        }
    }
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Screen rectangle occupied by the transformed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Vector2,
    pub size: Vector2,
}

/// How a transform change reaches the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Apply on the next frame, no easing (used while dragging).
    Immediate,
    /// Ease toward the new transform over the given duration.
    Smooth(Duration),
}

/// Eases the displayed transform toward the latest target.
#[derive(Debug, Clone)]
pub struct TransformAnimator {
    from: ImageTransform,
    to: ImageTransform,
    current: ImageTransform,
    started: Option<Instant>,
    duration: Duration,
}

impl Default for TransformAnimator {
    fn default() -> Self {
        Self {
            from: ImageTransform::IDENTITY,
            to: ImageTransform::IDENTITY,
            current: ImageTransform::IDENTITY,
            started: None,
            duration: Duration::ZERO,
        }
    }
}

impl TransformAnimator {
    /// Jumps to `transform` and cancels any running animation.
    pub fn snap(&mut self, transform: ImageTransform) {
        self.from = transform;
        self.to = transform;
        self.current = transform;
        self.started = None;
    }

    /// Points the animation at a new target.
    ///
    /// A smooth retarget starts from whatever is currently displayed, so
    /// interrupting an animation never jumps.
    pub fn retarget(&mut self, target: ImageTransform, transition: Transition, now: Instant) {
        match transition {
            Transition::Immediate => self.snap(target),
            Transition::Smooth(duration) => {
                if target == self.to {
                    return;
                }
                if duration.is_zero() {
                    self.snap(target);
                    return;
                }
                self.from = self.current;
                self.to = target;
                self.duration = duration;
                self.started = Some(now);
            }
        }
    }

    /// Advances the animation to `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(started) = self.started else {
            return;
        };

        let elapsed = now.saturating_duration_since(started);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);

        if t >= 1.0 {
            self.current = self.to;
            self.started = None;
        } else {
            self.current = self.from.lerp(self.to, ease_out_cubic(t));
        }
    }

    #[must_use]
    pub fn current(&self) -> ImageTransform {
        self.current
    }

    #[must_use]
    pub fn target(&self) -> ImageTransform {
        self.to
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
