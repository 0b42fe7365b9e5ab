// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! - [`store`]: [`CardStore`] implementations (in-memory and CBOR file)
//! - [`fetch`]: image bytes from local paths or `http(s)` URLs
//!
//! [`CardStore`]: crate::application::port::CardStore

pub mod fetch;
pub mod store;

pub use fetch::LoadedImage;
pub use store::{FileStore, MemoryStore};
