// SPDX-License-Identifier: MPL-2.0
//! Iced components. Each exposes `State`, `Message`, an `Effect` returned by
//! `handle` for the application to act on, and a `view`.

pub mod auth_form;
pub mod board;
pub mod card_form;
pub mod design_tokens;
pub mod image_modal;

use crate::domain::card::ValidationError;
use crate::i18n::I18n;

/// Localized text for a form validation failure.
#[must_use]
pub fn validation_text(i18n: &I18n, err: ValidationError) -> String {
    match err {
        ValidationError::ContentTooLong { max } => {
            i18n.tr_with_args(err.i18n_key(), &[("max", max.to_string().as_str())])
        }
        _ => i18n.tr(err.i18n_key()),
    }
}
