// SPDX-License-Identifier: MPL-2.0
//! [`CardStore`](crate::application::port::CardStore) adapters.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use uuid::Uuid;

/// Object name for an upload: a fresh UUID followed by the sanitized
/// original name, so repeated uploads of `photo.jpg` never collide.
fn unique_object_name(file_name: &str) -> String {
    let base = std::path::Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = if sanitized.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        sanitized
    };
    format!("{}-{}", Uuid::new_v4(), sanitized)
}
