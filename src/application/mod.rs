// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`board`]: The on-screen card list and its optimistic mutations
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use farewell_lens::application::{board::Board, port::CardStore};
//! use farewell_lens::infrastructure::store::MemoryStore;
//!
//! let store = MemoryStore::default();
//! let mut board = Board::default();
//! board.replace_all(store.list()?);
//! ```

pub mod board;
pub mod port;
