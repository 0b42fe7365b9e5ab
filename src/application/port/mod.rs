// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! These traits use only domain types, so the application layer stays
//! independent of concrete storage.
//!
//! # Design Notes
//!
//! - No `async fn`: callers wrap calls in Iced `Task`s and `spawn_blocking`
//! - Methods return the crate `Result`

pub mod store;

pub use store::CardStore;
