//! Transition table from (phase, input) to engine action.

use crate::messages::{ADD_WORD, CANCEL, CONFIRM, DELETE_WORD, NEXT};
use crate::session::Phase;

/// Recognised kinds of inbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Start,
    Help,
    AddMe,
    Next,
    AddWord,
    DeleteWord,
    Cancel,
    Confirm,
    Text,
}

impl Input {
    pub const ALL: [Self; 9] = [
        Self::Start,
        Self::Help,
        Self::AddMe,
        Self::Next,
        Self::AddWord,
        Self::DeleteWord,
        Self::Cancel,
        Self::Confirm,
        Self::Text,
    ];

    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if text.starts_with('/') {
            // Drop a bot mention, e.g. "/start@vocabot"
            let command = text.split('@').next().unwrap_or(text).to_lowercase();
            return match command.as_str() {
                "/start" | "/cards" => Self::Start,
                "/help" => Self::Help,
                "/addme" => Self::AddMe,
                _ => Self::Text,
            };
        }

        match text {
            NEXT => Self::Next,
            ADD_WORD => Self::AddWord,
            DELETE_WORD => Self::DeleteWord,
            CANCEL => Self::Cancel,
            CONFIRM => Self::Confirm,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextCard,
    Help,
    Greet,
    BeginAddWord,
    DeleteCurrentWord,
    SubmitAnswer,
    ReceiveSourceWord,
    ReceiveConfirmation,
}

/// Pick the engine action for an input in the given phase.
///
/// Inside the add-word steps every input except the card commands is handed
/// to the step itself, which recognises cancel and confirm on its own.
#[must_use]
pub const fn route(phase: Phase, input: Input) -> Action {
    match (phase, input) {
        (_, Input::Start | Input::Next) => Action::NextCard,
        (_, Input::Help) => Action::Help,
        (_, Input::AddMe) => Action::Greet,

        (Phase::Idle | Phase::AwaitingAnswer, Input::AddWord) => Action::BeginAddWord,
        (
            Phase::Idle,
            Input::DeleteWord | Input::Cancel | Input::Confirm | Input::Text,
        ) => Action::NextCard,

        (Phase::AwaitingAnswer, Input::DeleteWord) => Action::DeleteCurrentWord,
        (Phase::AwaitingAnswer, Input::Cancel | Input::Confirm | Input::Text) => {
            Action::SubmitAnswer
        }

        (
            Phase::AwaitingSourceWord,
            Input::AddWord | Input::DeleteWord | Input::Cancel | Input::Confirm | Input::Text,
        ) => Action::ReceiveSourceWord,

        (
            Phase::AwaitingTranslationConfirmation,
            Input::AddWord | Input::DeleteWord | Input::Cancel | Input::Confirm | Input::Text,
        ) => Action::ReceiveConfirmation,
    }
}
