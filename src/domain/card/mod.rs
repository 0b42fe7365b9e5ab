// SPDX-License-Identifier: MPL-2.0
//! Farewell cards and the rules around who may change them.

mod edit;
mod validation;

pub use edit::{EditOutcome, EditSession};
pub use validation::{validate_content, ValidationError};

use crate::domain::image_source::ImageSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned card identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A message left on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSource>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_allows_editing")]
    pub allows_editing: bool,
}

fn default_allows_editing() -> bool {
    true
}

impl Card {
    /// Builds a stored card from a new card and store-assigned fields.
    #[must_use]
    pub fn from_new(new: NewCard, id: CardId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            content: new.content,
            email: new.email,
            image: new.image,
            created_at,
            allows_editing: new.allows_editing,
        }
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// A validated card that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub name: String,
    pub content: String,
    pub email: Option<String>,
    pub image: Option<ImageSource>,
    pub allows_editing: bool,
}

impl NewCard {
    /// Validates `content` and attributes it to `author`.
    pub fn compose(
        author: &Author,
        content: &str,
        image: Option<ImageSource>,
    ) -> Result<Self, ValidationError> {
        let content = validate_content(content)?;
        Ok(Self {
            name: author.name().to_string(),
            content,
            email: author.email().map(str::to_string),
            image,
            allows_editing: true,
        })
    }
}

/// The visitor currently signed in. No verification takes place: the email
/// only acts as the key that unlocks editing of the visitor's own cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
    email: Option<String>,
}

impl Author {
    /// Validates sign-in input. An empty email means "no email".
    pub fn sign_in(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let email = email.trim();
        let email = if email.is_empty() {
            None
        } else if is_plausible_email(email) {
            Some(email.to_string())
        } else {
            return Err(ValidationError::InvalidEmail);
        };

        Ok(Self {
            name: name.to_string(),
            email,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Whether this author may edit or delete `card`.
    #[must_use]
    pub fn can_edit(&self, card: &Card) -> bool {
        match (self.email(), card.email.as_deref()) {
            (Some(mine), Some(theirs)) => {
                card.allows_editing && mine.trim().eq_ignore_ascii_case(theirs.trim())
            }
            _ => false,
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(' ')
        }
        None => false,
    }
}
