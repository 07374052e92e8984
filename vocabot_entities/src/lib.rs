//! Database entities for the vocabulary store.

pub mod user_words;
pub mod users;
pub mod words;
