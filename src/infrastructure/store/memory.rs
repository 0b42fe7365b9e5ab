// SPDX-License-Identifier: MPL-2.0
//! Volatile card store, used with `--ephemeral` and in tests.

use crate::application::port::CardStore;
use crate::domain::card::{Card, CardId, NewCard};
use crate::domain::ImageSource;
use crate::error::{Error, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

const MEMORY_SCHEME: &str = "memory://";

#[derive(Debug, Default)]
struct Inner {
    cards: Vec<Card>,
    images: HashMap<String, Vec<u8>>,
}

/// Keeps cards in memory. Uploaded images are addressed as `memory://<name>`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Store pre-filled with `cards`.
    #[must_use]
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                cards,
                images: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Store("memory store lock poisoned".into()))
    }
}

impl CardStore for MemoryStore {
    fn list(&self) -> Result<Vec<Card>> {
        let mut cards = self.lock()?.cards.clone();
        cards.sort_by_key(|c| c.created_at);
        Ok(cards)
    }

    fn create(&self, card: NewCard) -> Result<Card> {
        let card = Card::from_new(card, CardId::new_v4(), Utc::now());
        self.lock()?.cards.push(card.clone());
        Ok(card)
    }

    fn update_content(&self, id: CardId, content: String) -> Result<Card> {
        let mut inner = self.lock()?;
        let card = inner
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;
        card.content = content;
        Ok(card.clone())
    }

    fn delete(&self, id: CardId) -> Result<()> {
        let mut inner = self.lock()?;
        let index = inner
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = inner.cards.remove(index);
        if let Some(name) = removed.image.as_ref().and_then(object_name) {
            inner.images.remove(name);
        }
        Ok(())
    }

    fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<ImageSource> {
        let name = super::unique_object_name(file_name);
        self.lock()?.images.insert(name.clone(), bytes.to_vec());
        Ok(ImageSource::Url(format!("{MEMORY_SCHEME}{name}")))
    }

    fn remove_image(&self, source: &ImageSource) -> Result<()> {
        if let Some(name) = object_name(source) {
            self.lock()?.images.remove(name);
        }
        Ok(())
    }

    fn read_image(&self, source: &ImageSource) -> Option<Vec<u8>> {
        let name = object_name(source)?;
        self.lock().ok()?.images.get(name).cloned()
    }
}

fn object_name(source: &ImageSource) -> Option<&str> {
    match source {
        ImageSource::Url(url) => url.strip_prefix(MEMORY_SCHEME),
        ImageSource::Path(_) => None,
    }
}
