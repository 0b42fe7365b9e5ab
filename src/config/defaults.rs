// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Viewer zoom factor bounds and step
//! - **Animation**: Transform easing for the image viewer
//! - **Layout**: Window and modal sizing
//! - **Messages**: Card content limits

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom factor applied when an image is opened (1.0 = natural size).
pub const DEFAULT_ZOOM_FACTOR: f32 = 1.0;

/// Minimum zoom factor reachable with zoom out.
pub const DEFAULT_MIN_ZOOM: f32 = 0.5;

/// Maximum zoom factor reachable with zoom in.
pub const DEFAULT_MAX_ZOOM: f32 = 3.0;

/// Zoom factor added or removed by one zoom in/out step.
pub const DEFAULT_ZOOM_STEP: f32 = 0.25;

/// Largest step accepted from the settings file.
pub const MAX_ZOOM_STEP: f32 = 2.0;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Duration of a smooth transform transition, in milliseconds.
pub const TRANSFORM_TRANSITION_MS: u64 = 200;

/// Interval between animation ticks while a transition runs, in milliseconds.
pub const ANIMATION_TICK_MS: u64 = 16;

// ==========================================================================
// Layout Defaults
// ==========================================================================

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Share of the window, per axis, given to the image modal viewport.
pub const MODAL_VIEWPORT_FRACTION: f32 = 0.95;

/// Height of the thumbnail shown on each card.
pub const CARD_THUMBNAIL_HEIGHT: f32 = 160.0;

// ==========================================================================
// Message Defaults
// ==========================================================================

/// Maximum number of characters in a card body.
pub const MAX_CONTENT_CHARS: usize = 2000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_MIN_ZOOM > 0.0);
    assert!(DEFAULT_MIN_ZOOM <= DEFAULT_ZOOM_FACTOR);
    assert!(DEFAULT_MAX_ZOOM >= DEFAULT_ZOOM_FACTOR);
    assert!(DEFAULT_ZOOM_STEP > 0.0);
    assert!(DEFAULT_ZOOM_STEP <= MAX_ZOOM_STEP);

    assert!(TRANSFORM_TRANSITION_MS > 0);
    assert!(ANIMATION_TICK_MS > 0);

    assert!(MODAL_VIEWPORT_FRACTION > 0.0);
    assert!(MODAL_VIEWPORT_FRACTION <= 1.0);
    assert!(WINDOW_DEFAULT_WIDTH >= MIN_WINDOW_WIDTH);
    assert!(WINDOW_DEFAULT_HEIGHT >= MIN_WINDOW_HEIGHT);

    assert!(MAX_CONTENT_CHARS > 0);
};
