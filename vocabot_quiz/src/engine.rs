//! Quiz engine: turns one inbound chat event into one reply.
//!
//! Each event locks its chat's session slot, routes on the current phase and
//! works on a clone of the state. The clone is committed only when the
//! operation succeeded, so a store failure leaves the session as it was.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use vocabot_core::{
    AddWordOutcome, ChatId, DEFAULT_DISTRACTORS, RegisterOutcome, StoreResult, Translator,
    VocabularyStore,
};

use crate::dialog::{ConfirmationCheck, SourceWordCheck, check_confirmation, check_source_word};
use crate::messages;
use crate::router::{Action, Input, route};
use crate::session::{Card, Dialog, SessionSlot, SessionState, SessionStore, card_options};

/// A text message as seen by the engine, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user_id: Option<u64>,
    pub chat_id: ChatId,
    pub name: Option<String>,
    /// Message text; non-text messages arrive as an empty string.
    pub text: String,
}

impl InboundEvent {
    #[must_use]
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            user_id: None,
            chat_id,
            name: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("друг")
    }
}

/// Text to send back plus the reply-keyboard options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub options: Vec<String>,
}

impl Reply {
    #[must_use]
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    /// Put a notice line above the reply text.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.text = format!("{prefix}\n{}", self.text);
        self
    }
}

pub struct QuizEngine {
    store: Arc<dyn VocabularyStore>,
    translator: Arc<dyn Translator>,
    sessions: SessionStore,
    known_users: RwLock<HashSet<ChatId>>,
    distractors: usize,
}

impl QuizEngine {
    /// Create an engine, loading the registered users from the store.
    pub async fn new(
        store: Arc<dyn VocabularyStore>,
        translator: Arc<dyn Translator>,
    ) -> StoreResult<Self> {
        let known_users: HashSet<ChatId> = store.list_users().await?.into_iter().collect();
        info!("Quiz engine started with {} known users", known_users.len());

        Ok(Self {
            store,
            translator,
            sessions: SessionStore::new(),
            known_users: RwLock::new(known_users),
            distractors: DEFAULT_DISTRACTORS,
        })
    }

    /// Set how many wrong options a card shows, capped at `DEFAULT_DISTRACTORS`.
    #[must_use]
    pub const fn with_distractors(mut self, distractors: usize) -> Self {
        self.distractors = if distractors > DEFAULT_DISTRACTORS {
            DEFAULT_DISTRACTORS
        } else {
            distractors
        };
        self
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Drop in-memory sessions idle for at least `max_idle`.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let evicted = self.sessions.evict_idle(max_idle).await;
        if evicted > 0 {
            debug!("Evicted {evicted} idle sessions");
        }
        evicted
    }

    /// Handle one event. Never fails: store errors become a generic reply.
    pub async fn handle_event(&self, event: &InboundEvent) -> Reply {
        match self.dispatch(event).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to handle message from chat {}: {e}", event.chat_id);
                let options = self
                    .sessions
                    .snapshot(event.chat_id)
                    .await
                    .map(|state| state.options())
                    .unwrap_or_default();
                Reply::new(messages::FAILURE, options)
            }
        }
    }

    async fn dispatch(&self, event: &InboundEvent) -> StoreResult<Reply> {
        let chat_id = event.chat_id;
        let slot = self.sessions.slot(chat_id).await;
        let mut entry = slot.lock().await;
        entry.touch();

        let first_contact = self.ensure_registered(chat_id).await?;
        let action = route(entry.state.phase(), Input::parse(&event.text));
        debug!(
            "Chat {chat_id} (user {:?}): {:?} -> {action:?}",
            event.user_id,
            entry.state.phase()
        );

        if action == Action::ReceiveSourceWord {
            if let SourceWordCheck::Accepted(word) = check_source_word(&event.text) {
                let generation = entry.state.generation();
                drop(entry);
                return Ok(self.propose_translation(&slot, generation, word).await);
            }
        }

        let mut state = entry.state.clone();
        let reply = match action {
            Action::NextCard => {
                let reply = self.next_card(chat_id, &mut state).await?;
                if first_contact {
                    reply.with_prefix(&messages::greeting(event.display_name()))
                } else {
                    reply
                }
            }
            Action::Help => Reply::new(messages::HELP, state.options()),
            Action::Greet => {
                let text = if first_contact {
                    messages::remembered(event.display_name())
                } else {
                    messages::already_known(event.display_name())
                };
                Reply::new(text, state.options())
            }
            Action::BeginAddWord => {
                state.dialog = Dialog::AwaitingSourceWord;
                Reply::new(messages::ENTER_SOURCE_WORD, state.options())
            }
            Action::DeleteCurrentWord => self.delete_current_word(chat_id, &mut state).await?,
            Action::SubmitAnswer => match submit_answer(&mut state, &event.text) {
                Some(reply) => reply,
                None => self.next_card(chat_id, &mut state).await?,
            },
            Action::ReceiveSourceWord => match check_source_word(&event.text) {
                SourceWordCheck::Cancelled => self
                    .next_card(chat_id, &mut state)
                    .await?
                    .with_prefix(messages::ADD_CANCELLED),
                SourceWordCheck::EmptyRejected => Reply::new(messages::EMPTY_WORD, state.options()),
                SourceWordCheck::NotCyrillicRejected => {
                    Reply::new(messages::NOT_CYRILLIC, state.options())
                }
                // Accepted words go through `propose_translation` above.
                SourceWordCheck::Accepted(_) => {
                    Reply::new(messages::ENTER_SOURCE_WORD, state.options())
                }
            },
            Action::ReceiveConfirmation => {
                self.receive_confirmation(chat_id, &mut state, &event.text)
                    .await?
            }
        };

        entry.commit(state);
        Ok(reply)
    }

    /// Register unseen chats. Returns `true` only for a new registration.
    async fn ensure_registered(&self, chat_id: ChatId) -> StoreResult<bool> {
        if self.known_users.read().await.contains(&chat_id) {
            return Ok(false);
        }

        let outcome = self.store.register_user(chat_id).await?;
        self.known_users.write().await.insert(chat_id);

        Ok(match outcome {
            RegisterOutcome::Registered { seeded } => {
                info!("New chat {chat_id}, {seeded} words in its dictionary");
                true
            }
            RegisterOutcome::AlreadyRegistered => false,
        })
    }

    async fn next_card(&self, chat_id: ChatId, state: &mut SessionState) -> StoreResult<Reply> {
        let Some(target) = self.store.random_word_for_user(chat_id).await? else {
            state.dialog = Dialog::Idle;
            return Ok(Reply::new(
                messages::EMPTY_POOL,
                vec![messages::ADD_WORD.to_string()],
            ));
        };

        let distractors = self
            .store
            .other_source_words_for_user(chat_id, &target.translated_text, self.distractors)
            .await?;

        let card = Card::new(target, distractors);
        let reply = Reply::new(
            messages::quiz_prompt(&card.target_translation),
            card_options(&card),
        );
        state.dialog = Dialog::Quiz(card);
        Ok(reply)
    }

    async fn delete_current_word(
        &self,
        chat_id: ChatId,
        state: &mut SessionState,
    ) -> StoreResult<Reply> {
        let Some((word, translation)) = state
            .card()
            .map(|c| (c.target_word.clone(), c.target_translation.clone()))
        else {
            return self.next_card(chat_id, state).await;
        };

        let notice = match self
            .store
            .delete_word_for_user(chat_id, &word, &translation)
            .await
        {
            Ok(_) => messages::word_deleted(&word),
            Err(e) if e.is_not_found() => messages::NOT_IN_DICTIONARY.to_string(),
            Err(e) => return Err(e),
        };

        Ok(self.next_card(chat_id, state).await?.with_prefix(&notice))
    }

    /// Look up a candidate translation with the slot unlocked, then apply it
    /// only if the session has not moved on in the meantime.
    async fn propose_translation(&self, slot: &SessionSlot, generation: u64, word: String) -> Reply {
        let candidate = match self.translator.translate(&word).await {
            Ok(t) if !t.is_empty() => Some(t),
            Ok(_) => None,
            Err(e) => {
                warn!("Translation for \"{word}\" unavailable: {e}");
                None
            }
        };

        let mut entry = slot.lock().await;
        entry.touch();
        if entry.state.generation() != generation {
            debug!("Dropping stale translation for \"{word}\"");
            return Reply::new(messages::INPUT_SUPERSEDED, entry.state.options());
        }

        let text = candidate.as_deref().map_or_else(
            || messages::manual_translation_prompt(&word),
            |c| messages::candidate_prompt(&word, c),
        );
        let mut state = entry.state.clone();
        state.dialog = Dialog::AwaitingTranslation {
            source: word,
            candidate,
        };
        let reply = Reply::new(text, state.options());
        entry.commit(state);
        reply
    }

    async fn receive_confirmation(
        &self,
        chat_id: ChatId,
        state: &mut SessionState,
        text: &str,
    ) -> StoreResult<Reply> {
        let Some((source, candidate)) = pending_translation(state) else {
            return self.next_card(chat_id, state).await;
        };

        let translation = match check_confirmation(text, candidate.as_deref()) {
            ConfirmationCheck::Cancelled => {
                return Ok(self
                    .next_card(chat_id, state)
                    .await?
                    .with_prefix(messages::ADD_CANCELLED));
            }
            ConfirmationCheck::EmptyRejected => {
                return Ok(Reply::new(messages::EMPTY_TRANSLATION, state.options()));
            }
            ConfirmationCheck::NotLatinRejected => {
                return Ok(Reply::new(messages::NOT_LATIN, state.options()));
            }
            ConfirmationCheck::Confirmed(t) | ConfirmationCheck::ManualTranslation(t) => t,
        };

        let notice = match self
            .store
            .add_word_for_user(chat_id, &source, &translation)
            .await?
        {
            AddWordOutcome::Created => messages::word_added(&source, &translation),
            AddWordOutcome::AlreadyExists => messages::word_exists(&source),
        };

        Ok(self.next_card(chat_id, state).await?.with_prefix(&notice))
    }
}

fn submit_answer(state: &mut SessionState, answer: &str) -> Option<Reply> {
    let Dialog::Quiz(card) = &mut state.dialog else {
        return None;
    };

    let text = if card.is_correct(answer) {
        messages::success(&card.target_word, &card.target_translation)
    } else {
        card.mark_wrong(answer);
        messages::retry_hint(&card.target_translation)
    };
    Some(Reply::new(text, card_options(card)))
}

fn pending_translation(state: &SessionState) -> Option<(String, Option<String>)> {
    match &state.dialog {
        Dialog::AwaitingTranslation { source, candidate } => {
            Some((source.clone(), candidate.clone()))
        }
        _ => None,
    }
}
