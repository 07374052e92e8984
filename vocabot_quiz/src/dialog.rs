//! Input checks for the two steps of adding a word.

use vocabot_core::{is_source_script, is_target_script};

use crate::messages::{CANCEL, CONFIRM};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceWordCheck {
    Cancelled,
    EmptyRejected,
    NotCyrillicRejected,
    Accepted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationCheck {
    Cancelled,
    Confirmed(String),
    EmptyRejected,
    NotLatinRejected,
    ManualTranslation(String),
}

/// Classify the word a user typed after pressing "add word".
///
/// Empty input is rejected before the script check, which would accept it.
#[must_use]
pub fn check_source_word(text: &str) -> SourceWordCheck {
    if text.trim() == CANCEL {
        SourceWordCheck::Cancelled
    } else if text.is_empty() {
        SourceWordCheck::EmptyRejected
    } else if !is_source_script(text) {
        SourceWordCheck::NotCyrillicRejected
    } else {
        SourceWordCheck::Accepted(text.to_string())
    }
}

/// Classify the reply to a proposed translation.
///
/// `Confirm` only counts when there is a candidate to confirm.
#[must_use]
pub fn check_confirmation(text: &str, candidate: Option<&str>) -> ConfirmationCheck {
    if text.trim() == CANCEL {
        return ConfirmationCheck::Cancelled;
    }
    if let Some(candidate) = candidate.filter(|_| text.trim() == CONFIRM) {
        return ConfirmationCheck::Confirmed(candidate.to_string());
    }
    if text.is_empty() {
        ConfirmationCheck::EmptyRejected
    } else if !is_target_script(text) {
        ConfirmationCheck::NotLatinRejected
    } else {
        ConfirmationCheck::ManualTranslation(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_word_steps() {
        assert_eq!(check_source_word(CANCEL), SourceWordCheck::Cancelled);
        assert_eq!(check_source_word(""), SourceWordCheck::EmptyRejected);
        assert_eq!(
            check_source_word("hello"),
            SourceWordCheck::NotCyrillicRejected
        );
        assert_eq!(
            check_source_word("два слова"),
            SourceWordCheck::NotCyrillicRejected
        );
        assert_eq!(
            check_source_word("окно"),
            SourceWordCheck::Accepted("окно".to_string())
        );
    }

    #[test]
    fn confirmation_steps() {
        assert_eq!(
            check_confirmation(CANCEL, Some("window")),
            ConfirmationCheck::Cancelled
        );
        assert_eq!(
            check_confirmation(CONFIRM, Some("window")),
            ConfirmationCheck::Confirmed("window".to_string())
        );
        assert_eq!(
            check_confirmation("", Some("window")),
            ConfirmationCheck::EmptyRejected
        );
        assert_eq!(
            check_confirmation("окно", None),
            ConfirmationCheck::NotLatinRejected
        );
        assert_eq!(
            check_confirmation("casement", Some("window")),
            ConfirmationCheck::ManualTranslation("casement".to_string())
        );
    }

    #[test]
    fn confirm_without_candidate_is_not_latin() {
        assert_eq!(
            check_confirmation(CONFIRM, None),
            ConfirmationCheck::NotLatinRejected
        );
    }
}
