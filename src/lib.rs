// SPDX-License-Identifier: MPL-2.0
//! `farewell_lens` is a farewell message board built with the Iced GUI framework.
//!
//! Visitors sign in with a name and an optional email, leave a message with
//! an optional picture, and can open any picture in a zoomable, pannable
//! viewer. Messages live in a pluggable card store (a CBOR file by default).

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
