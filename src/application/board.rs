// SPDX-License-Identifier: MPL-2.0
//! Local view of the card board with optimistic mutations.
//!
//! Every change is applied to [`Board`] immediately and returns an
//! [`Undo`] token. Once the store answers, the caller either confirms the
//! change (replacing placeholders with stored records) or hands the token
//! back to [`Board::rollback`].
//!
//! Placeholders stay pending until the store confirms or rejects them and
//! cannot be edited or deleted in the meantime: the store does not know
//! their temporary id yet.

use crate::domain::card::{Card, CardId, NewCard};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Reverts one optimistic change.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Undo {
    /// Remove a placeholder that was never stored.
    RemovePlaceholder(CardId),
    /// Put back the card as it was before an edit, unless a later edit
    /// already replaced `applied`.
    Restore { previous: Card, applied: String },
    /// Re-insert a card that was optimistically removed.
    Reinsert(Card),
}

/// Cards currently on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<Card>,
    pending: HashSet<CardId>,
}

impl Board {
    /// Replaces the whole board with a fresh listing. Pending placeholders
    /// are kept.
    pub fn replace_all(&mut self, mut cards: Vec<Card>) {
        let pending = &self.pending;
        cards.extend(self.cards.drain(..).filter(|c| pending.contains(&c.id)));
        cards.sort_by_key(|c| c.created_at);
        self.cards = cards;
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Whether `id` is a placeholder the store has not confirmed yet.
    #[must_use]
    pub fn is_pending(&self, id: CardId) -> bool {
        self.pending.contains(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Shows `new` right away under a temporary id.
    ///
    /// Returns the placeholder id, to be passed to [`Board::confirm_create`].
    pub fn apply_create(&mut self, new: NewCard, now: DateTime<Utc>) -> (CardId, Undo) {
        let temp_id = CardId::new_v4();
        self.pending.insert(temp_id);
        self.insert_sorted(Card::from_new(new, temp_id, now));
        (temp_id, Undo::RemovePlaceholder(temp_id))
    }

    /// Swaps the placeholder for the stored card.
    pub fn confirm_create(&mut self, temp_id: CardId, stored: Card) {
        self.pending.remove(&temp_id);
        self.cards.retain(|c| c.id != temp_id && c.id != stored.id);
        self.insert_sorted(stored);
    }

    /// Replaces the card body. Returns `None` when the id is unknown or
    /// still pending.
    pub fn apply_update(&mut self, id: CardId, content: String) -> Option<Undo> {
        if self.is_pending(id) {
            return None;
        }
        let card = self.cards.iter_mut().find(|c| c.id == id)?;
        let previous = card.clone();
        card.content.clone_from(&content);
        Some(Undo::Restore {
            previous,
            applied: content,
        })
    }

    /// Takes the store's version of an edited card.
    pub fn confirm_update(&mut self, stored: Card) {
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == stored.id) {
            *card = stored;
        }
    }

    /// Removes the card. Returns `None` when the id is unknown or still
    /// pending.
    pub fn apply_delete(&mut self, id: CardId) -> Option<Undo> {
        if self.is_pending(id) {
            return None;
        }
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(Undo::Reinsert(self.cards.remove(index)))
    }

    pub fn rollback(&mut self, undo: Undo) {
        match undo {
            Undo::RemovePlaceholder(id) => {
                self.pending.remove(&id);
                self.cards.retain(|c| c.id != id);
            }
            Undo::Restore { previous, applied } => {
                if let Some(card) = self
                    .cards
                    .iter_mut()
                    .find(|c| c.id == previous.id && c.content == applied)
                {
                    *card = previous;
                }
            }
            Undo::Reinsert(card) => {
                if self.get(card.id).is_none() {
                    self.insert_sorted(card);
                }
            }
        }
    }

    fn insert_sorted(&mut self, card: Card) {
        let index = self
            .cards
            .partition_point(|c| c.created_at <= card.created_at);
        self.cards.insert(index, card);
    }
}
