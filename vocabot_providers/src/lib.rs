//! Translation providers.

mod retry;
mod yandex;

pub use retry::retry_with_backoff;
pub use yandex::{YandexTranslator, extract_translation};
