// SPDX-License-Identifier: MPL-2.0
//! Card store persisted as CBOR in the application data directory.
//!
//! # Layout
//!
//! ```text
//! <data dir>/
//! ├── cards.cbor      all cards, rewritten on every change
//! └── images/         uploaded images, UUID-prefixed names
//! ```

use crate::app::paths;
use crate::application::port::CardStore;
use crate::domain::card::{Card, CardId, NewCard};
use crate::domain::ImageSource;
use crate::error::{Error, Result};
use chrono::Utc;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const CARDS_FILE: &str = "cards.cbor";
const IMAGES_DIR: &str = "images";

/// File-backed store. Cards are cached in memory and written through.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    cards: Mutex<Vec<Card>>,
}

impl FileStore {
    /// Opens the store in the resolved data directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when no data directory can be determined,
    /// otherwise see [`FileStore::open_at`].
    pub fn open(base_dir: Option<PathBuf>) -> Result<Self> {
        let root = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::Store("no data directory available".into()))?;
        Self::open_at(root)
    }

    /// Opens (or creates) the store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created or an existing
    /// `cards.cbor` cannot be decoded.
    pub fn open_at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(IMAGES_DIR))?;

        let path = root.join(CARDS_FILE);
        let cards: Vec<Card> = if path.exists() {
            let reader = BufReader::new(fs::File::open(&path)?);
            ciborium::from_reader(reader)?
        } else {
            Vec::new()
        };
        tracing::info!(path = %root.display(), count = cards.len(), "opened card store");

        Ok(Self {
            root,
            cards: Mutex::new(cards),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Card>>> {
        self.cards
            .lock()
            .map_err(|_| Error::Store("file store lock poisoned".into()))
    }

    /// Path of `source` when it is an upload of this store.
    fn owned_image<'a>(&self, source: &'a ImageSource) -> Option<&'a Path> {
        let path = source.as_path()?;
        (path.parent() == Some(self.root.join(IMAGES_DIR).as_path())).then_some(path)
    }

    /// Writes to a sibling temp file first so a crash never leaves a
    /// truncated `cards.cbor`.
    fn persist(&self, cards: &[Card]) -> Result<()> {
        let path = self.root.join(CARDS_FILE);
        let tmp = path.with_extension("cbor.tmp");
        {
            let writer = BufWriter::new(fs::File::create(&tmp)?);
            ciborium::into_writer(&cards, writer)?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl CardStore for FileStore {
    fn list(&self) -> Result<Vec<Card>> {
        let mut cards = self.lock()?.clone();
        cards.sort_by_key(|c| c.created_at);
        Ok(cards)
    }

    fn create(&self, card: NewCard) -> Result<Card> {
        let card = Card::from_new(card, CardId::new_v4(), Utc::now());
        let mut cards = self.lock()?;
        cards.push(card.clone());
        if let Err(err) = self.persist(&cards) {
            cards.pop();
            return Err(err);
        }
        Ok(card)
    }

    fn update_content(&self, id: CardId, content: String) -> Result<Card> {
        let mut cards = self.lock()?;
        let index = cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;
        let previous = std::mem::replace(&mut cards[index].content, content);
        if let Err(err) = self.persist(&cards) {
            cards[index].content = previous;
            return Err(err);
        }
        Ok(cards[index].clone())
    }

    fn delete(&self, id: CardId) -> Result<()> {
        let mut cards = self.lock()?;
        let index = cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = cards.remove(index);
        if let Err(err) = self.persist(&cards) {
            cards.insert(index, removed);
            return Err(err);
        }
        if let Some(source) = &removed.image {
            if let Err(err) = self.remove_image(source) {
                tracing::warn!(error = %err, %source, "card deleted but its image was kept");
            }
        }
        Ok(())
    }

    fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<ImageSource> {
        let path = self
            .root
            .join(IMAGES_DIR)
            .join(super::unique_object_name(file_name));
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "stored uploaded image");
        Ok(ImageSource::Path(path))
    }

    fn remove_image(&self, source: &ImageSource) -> Result<()> {
        let Some(path) = self.owned_image(source) else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed uploaded image");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
