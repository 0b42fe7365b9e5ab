// SPDX-License-Identifier: MPL-2.0
//! Two-state edit toggle of a card (viewing / editing).

use super::validation::{validate_content, ValidationError};

/// Result of leaving edit mode with a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text is identical to the original; nothing to send.
    Unchanged,
    /// New, validated text to send to the store.
    Changed(String),
    /// Text was refused; the session stays in edit mode.
    Invalid(ValidationError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing {
        original: String,
    },
}

impl EditSession {
    pub fn begin(&mut self, original: &str) {
        *self = Self::Editing {
            original: original.to_string(),
        };
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Leaves edit mode if `edited` is valid.
    pub fn save(&mut self, edited: &str) -> EditOutcome {
        let Self::Editing { original } = self else {
            return EditOutcome::Unchanged;
        };

        let outcome = match validate_content(edited) {
            Ok(text) if text == original.trim() => EditOutcome::Unchanged,
            Ok(text) => EditOutcome::Changed(text),
            Err(err) => return EditOutcome::Invalid(err),
        };
        *self = Self::Viewing;
        outcome
    }

    /// Leaves edit mode, returning the original text to restore.
    pub fn cancel(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Editing { original } => Some(original),
            Self::Viewing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_without_changes_is_unchanged() {
        let mut session = EditSession::default();
        session.begin("See you soon");
        assert_eq!(session.save("See you soon\n"), EditOutcome::Unchanged);
        assert!(!session.is_editing());
    }

    #[test]
    fn save_with_changes_returns_new_text() {
        let mut session = EditSession::default();
        session.begin("See you soon");
        assert_eq!(
            session.save("See you very soon"),
            EditOutcome::Changed("See you very soon".into())
        );
        assert!(!session.is_editing());
    }

    #[test]
    fn invalid_save_keeps_editing() {
        let mut session = EditSession::default();
        session.begin("See you soon");
        assert_eq!(
            session.save("   "),
            EditOutcome::Invalid(ValidationError::EmptyContent)
        );
        assert!(session.is_editing());
    }

    #[test]
    fn cancel_restores_original() {
        let mut session = EditSession::default();
        session.begin("See you soon");
        assert_eq!(session.cancel().as_deref(), Some("See you soon"));
        assert_eq!(session, EditSession::Viewing);
        assert_eq!(session.cancel(), None);
    }

    #[test]
    fn save_while_viewing_does_nothing() {
        let mut session = EditSession::default();
        assert_eq!(session.save("anything"), EditOutcome::Unchanged);
    }
}
