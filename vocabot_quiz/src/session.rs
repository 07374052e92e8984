//! Per-chat quiz state.
//!
//! Every chat owns one [`SessionState`] behind its own mutex, so events for
//! one chat are handled one at a time while different chats proceed in
//! parallel.

use rand::seq::SliceRandom;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use vocabot_core::{ChatId, WordPair};

use crate::messages::{self, TRIED_WRONG_MARK};

/// Step of the per-chat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    AwaitingAnswer,
    AwaitingSourceWord,
    AwaitingTranslationConfirmation,
}

impl Phase {
    pub const ALL: [Self; 4] = [
        Self::Idle,
        Self::AwaitingAnswer,
        Self::AwaitingSourceWord,
        Self::AwaitingTranslationConfirmation,
    ];
}

/// One quiz round: the word to guess and the options shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub target_word: String,
    pub target_translation: String,
    pub distractors: Vec<String>,
    /// Display order of `target_word` and the distractors.
    pub options: Vec<String>,
    pub tried_wrong: BTreeSet<String>,
}

impl Card {
    /// Build a card with the options in a uniformly random order.
    #[must_use]
    pub fn new(target: WordPair, distractors: Vec<String>) -> Self {
        let mut options = distractors.clone();
        options.push(target.source_text.clone());
        options.shuffle(&mut rand::rng());

        Self {
            target_word: target.source_text,
            target_translation: target.translated_text,
            distractors,
            options,
            tried_wrong: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        normalize_answer(answer) == self.target_word
    }

    /// Remember a wrong pick if it is one of the displayed options.
    pub fn mark_wrong(&mut self, answer: &str) -> bool {
        let answer = normalize_answer(answer);
        if self.options.iter().any(|o| o == answer) {
            self.tried_wrong.insert(answer.to_string())
        } else {
            false
        }
    }

    /// Options as they appear on the keyboard, wrong picks marked.
    #[must_use]
    pub fn rendered_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| {
                if self.tried_wrong.contains(o) {
                    format!("{o}{TRIED_WRONG_MARK}")
                } else {
                    o.clone()
                }
            })
            .collect()
    }
}

/// Strip the wrong-pick marker a user may send back by pressing a marked option.
#[must_use]
pub fn normalize_answer(text: &str) -> &str {
    text.trim().trim_end_matches(TRIED_WRONG_MARK)
}

/// What the chat is currently waiting for, with the data that step needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Idle,
    Quiz(Card),
    AwaitingSourceWord,
    AwaitingTranslation {
        source: String,
        candidate: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub dialog: Dialog,
    /// Bumped on every committed change.
    pub(crate) generation: u64,
}

impl SessionState {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.dialog {
            Dialog::Idle => Phase::Idle,
            Dialog::Quiz(_) => Phase::AwaitingAnswer,
            Dialog::AwaitingSourceWord => Phase::AwaitingSourceWord,
            Dialog::AwaitingTranslation { .. } => Phase::AwaitingTranslationConfirmation,
        }
    }

    #[must_use]
    pub fn card(&self) -> Option<&Card> {
        match &self.dialog {
            Dialog::Quiz(card) => Some(card),
            _ => None,
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Keyboard matching the current step.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        match &self.dialog {
            Dialog::Idle => vec![messages::NEXT.to_string(), messages::ADD_WORD.to_string()],
            Dialog::Quiz(card) => card_options(card),
            Dialog::AwaitingSourceWord
            | Dialog::AwaitingTranslation {
                candidate: None, ..
            } => vec![messages::CANCEL.to_string()],
            Dialog::AwaitingTranslation {
                candidate: Some(_), ..
            } => vec![messages::CONFIRM.to_string(), messages::CANCEL.to_string()],
        }
    }
}

/// Card options followed by the command buttons.
#[must_use]
pub fn card_options(card: &Card) -> Vec<String> {
    let mut options = card.rendered_options();
    options.extend(
        [messages::NEXT, messages::ADD_WORD, messages::DELETE_WORD]
            .iter()
            .map(ToString::to_string),
    );
    options
}

#[derive(Debug)]
pub(crate) struct SessionEntry {
    pub(crate) state: SessionState,
    last_active: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            state: SessionState::default(),
            last_active: Instant::now(),
        }
    }

    pub(crate) fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// Replace the state if it changed.
    pub(crate) fn commit(&mut self, mut state: SessionState) {
        if state != self.state {
            state.generation = self.state.generation + 1;
            self.state = state;
        }
    }
}

pub(crate) type SessionSlot = Arc<Mutex<SessionEntry>>;

/// Session slots keyed by chat id.
///
/// The map lock is only held long enough to fetch or create a slot.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<ChatId, SessionSlot>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn slot(&self, chat_id: ChatId) -> SessionSlot {
        let mut slots = self.slots.lock().await;
        Arc::clone(
            slots
                .entry(chat_id)
                .or_insert_with(|| Arc::new(Mutex::new(SessionEntry::new()))),
        )
    }

    /// Copy of the chat's current state, waiting for any in-flight event.
    pub async fn snapshot(&self, chat_id: ChatId) -> Option<SessionState> {
        let slot = self.slots.lock().await.get(&chat_id).cloned()?;
        let entry = slot.lock().await;
        Some(entry.state.clone())
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }

    /// Drop sessions idle for at least `max_idle`.
    ///
    /// Slots that are locked or referenced by an in-flight event are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut slots = self.slots.lock().await;
        let before = slots.len();
        slots.retain(|_, slot| {
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            slot.try_lock()
                .map_or(true, |entry| entry.last_active.elapsed() < max_idle)
        });
        before - slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(
            WordPair::new("собака", "dog"),
            vec!["кот".to_string(), "дом".to_string()],
        )
    }

    #[test]
    fn card_options_hold_target_and_distractors() {
        let card = card();
        let shown: BTreeSet<_> = card.options.iter().cloned().collect();
        assert_eq!(card.options.len(), 3);
        assert_eq!(
            shown,
            BTreeSet::from(["собака".to_string(), "кот".to_string(), "дом".to_string()])
        );
    }

    #[test]
    fn wrong_pick_is_marked_once() {
        let mut card = card();
        assert!(card.mark_wrong("кот"));
        assert!(!card.mark_wrong("кот❌"));
        assert!(!card.mark_wrong("самолёт"));
        let rendered = card.rendered_options();
        assert!(rendered.contains(&"кот❌".to_string()));
        assert!(rendered.contains(&"собака".to_string()));
        assert_eq!(card.tried_wrong.len(), 1);
    }

    #[test]
    fn marker_is_ignored_when_answering() {
        let card = card();
        assert!(card.is_correct("собака"));
        assert!(card.is_correct("собака❌"));
        assert!(!card.is_correct("dog"));
    }

    #[test]
    fn phase_follows_dialog() {
        let mut state = SessionState::default();
        assert_eq!(state.phase(), Phase::Idle);
        state.dialog = Dialog::Quiz(card());
        assert_eq!(state.phase(), Phase::AwaitingAnswer);
        assert!(state.card().is_some());
        state.dialog = Dialog::AwaitingTranslation {
            source: "окно".to_string(),
            candidate: None,
        };
        assert_eq!(state.phase(), Phase::AwaitingTranslationConfirmation);
        assert_eq!(state.options(), vec![messages::CANCEL.to_string()]);
    }

    #[test]
    fn commit_bumps_generation_only_on_change() {
        let mut entry = SessionEntry::new();
        entry.commit(SessionState::default());
        assert_eq!(entry.state.generation(), 0);

        let mut next = entry.state.clone();
        next.dialog = Dialog::AwaitingSourceWord;
        entry.commit(next);
        assert_eq!(entry.state.generation(), 1);
    }

    #[tokio::test]
    async fn evicts_only_idle_free_slots() {
        let store = SessionStore::new();
        let _ = store.slot(1).await;
        let held = store.slot(2).await;

        let evicted = store.evict_idle(Duration::ZERO).await;

        assert_eq!(evicted, 1);
        assert_eq!(store.len().await, 1);
        drop(held);
        assert_eq!(store.evict_idle(Duration::from_secs(3600)).await, 0);
    }
}
