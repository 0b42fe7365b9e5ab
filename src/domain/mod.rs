// SPDX-License-Identifier: MPL-2.0
//! Domain layer: pure types and state machines with no toolkit or I/O.
//!
//! - [`viewport`]: zoom and pan state of the image viewer
//! - [`card`]: farewell cards, authors and edit rules
//! - [`image_source`]: where an attached image lives

pub mod card;
pub mod image_source;
pub mod viewport;

pub use image_source::ImageSource;
