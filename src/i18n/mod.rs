// SPDX-License-Identifier: MPL-2.0
//! Localization with Fluent.
//!
//! Translation files live in `assets/i18n/<locale>.ftl` and are embedded at
//! compile time. The active locale is picked from the `--lang` flag, then
//! `[general] language` in the settings, then the OS locale, then `en-US`.
//! Keys missing from the active locale fall back to `en-US`.

pub mod fluent;

pub use fluent::I18n;
