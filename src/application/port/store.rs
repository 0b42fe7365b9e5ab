// SPDX-License-Identifier: MPL-2.0
//! Card storage port definition.
//!
//! The hosted backend the board talks to (record CRUD plus binary uploads
//! that come back as a retrievable location) is reached only through
//! [`CardStore`]. Infrastructure adapters implement it.

use crate::domain::card::{Card, CardId, NewCard};
use crate::domain::ImageSource;
use crate::error::Result;

/// Port for persisting cards and their images.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the application shares one store
/// as `Arc<dyn CardStore>` across background tasks.
///
/// # Example
///
/// ```ignore
/// use farewell_lens::application::port::CardStore;
///
/// fn count_by(store: &impl CardStore, email: &str) -> usize {
///     store
///         .list()
///         .map(|cards| cards.iter().filter(|c| c.email.as_deref() == Some(email)).count())
///         .unwrap_or(0)
/// }
/// ```
pub trait CardStore: Send + Sync {
    /// All cards, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn list(&self) -> Result<Vec<Card>>;

    /// Stores a new card, assigning its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the card cannot be written.
    fn create(&self, card: NewCard) -> Result<Card>;

    /// Replaces the body of an existing card.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::NotFound`] for an unknown id.
    fn update_content(&self, id: CardId, content: String) -> Result<Card>;

    /// Removes a card together with the image it uploaded, if any.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::NotFound`] for an unknown id.
    fn delete(&self, id: CardId) -> Result<()>;

    /// Stores image bytes and returns where they can be fetched from.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be written.
    fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<ImageSource>;

    /// Drops an object returned by [`CardStore::upload_image`]. Sources this
    /// store did not hand out, and objects already gone, are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing object cannot be removed.
    fn remove_image(&self, source: &ImageSource) -> Result<()>;

    /// Bytes for a source this store handed out, when it cannot be fetched
    /// by path or URL. `None` means "fetch it normally".
    fn read_image(&self, _source: &ImageSource) -> Option<Vec<u8>> {
        None
    }
}
