// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and sample data.
//!
//! Re-exports the `approx` crate's assertion macros, which handle
//! floating-point precision issues that `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::domain::card::{Card, CardId};
use chrono::{TimeZone, Utc};

/// Card with a fixed timestamp `minute` minutes after a reference date.
pub fn sample_card(name: &str, email: Option<&str>, content: &str, minute: u32) -> Card {
    Card {
        id: CardId::new_v4(),
        name: name.to_string(),
        content: content.to_string(),
        email: email.map(str::to_string),
        image: None,
        created_at: Utc
            .with_ymd_and_hms(2025, 6, 30, 12, minute, 0)
            .single()
            .expect("valid timestamp"),
        allows_editing: true,
    }
}
