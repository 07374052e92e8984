//! User-facing texts and reply-keyboard labels.

pub const NEXT: &str = "Дальше ⏭";
pub const ADD_WORD: &str = "Добавить слово ➕";
pub const DELETE_WORD: &str = "Удалить слово🔙";
pub const CANCEL: &str = "Отмена 🚫";
pub const CONFIRM: &str = "Да ✅";

/// Appended to an option the user already picked wrongly.
pub const TRIED_WRONG_MARK: char = '❌';

pub const EMPTY_POOL: &str =
    "В твоём словаре пока нет слов. Нажми «Добавить слово ➕», чтобы добавить первое!";
pub const ENTER_SOURCE_WORD: &str = "Введи слово на русском языке:";
pub const EMPTY_WORD: &str = "Слово не может быть пустым. Введи слово на русском языке:";
pub const NOT_CYRILLIC: &str =
    "Слово должно состоять только из русских букв. Попробуй ещё раз:";
pub const EMPTY_TRANSLATION: &str = "Перевод не может быть пустым. Введи перевод на английском:";
pub const NOT_LATIN: &str =
    "Перевод должен состоять только из английских букв. Попробуй ещё раз:";
pub const ADD_CANCELLED: &str = "Добавление слова отменено.";
pub const NOT_IN_DICTIONARY: &str = "Этого слова уже нет в твоём словаре.";
pub const INPUT_SUPERSEDED: &str = "Этот ввод уже неактуален, продолжаем.";
pub const FAILURE: &str = "Что-то пошло не так 😔 Попробуй ещё раз чуть позже.";

pub const HELP: &str = r"
📚 Тренажёр английских слов

/start, /cards - показать карточку
/addme - запомнить меня
/help - эта справка

Выбери правильный перевод среди вариантов.
«Дальше ⏭» - следующая карточка
«Добавить слово ➕» - добавить слово в свой словарь
«Удалить слово🔙» - убрать текущее слово из словаря
";

#[must_use]
pub fn greeting(name: &str) -> String {
    format!("Привет, {name}, давай изучать английский...")
}

#[must_use]
pub fn remembered(name: &str) -> String {
    format!("Привет, {name}, я тебя запомнил!")
}

#[must_use]
pub fn already_known(name: &str) -> String {
    format!("Привет, {name}, я тебя уже знаю!")
}

#[must_use]
pub fn quiz_prompt(translation: &str) -> String {
    format!("Выбери перевод слова:\n🇬🇧 {translation}")
}

/// `"{word} -> {translation}"`
#[must_use]
pub fn show_target(word: &str, translation: &str) -> String {
    format!("{word} -> {translation}")
}

#[must_use]
pub fn success(word: &str, translation: &str) -> String {
    format!("Отлично!❤\n{}", show_target(word, translation))
}

#[must_use]
pub fn retry_hint(translation: &str) -> String {
    format!("Допущена ошибка!\nПопробуй ещё раз вспомнить слово 🇬🇧{translation}")
}

#[must_use]
pub fn candidate_prompt(source: &str, candidate: &str) -> String {
    format!(
        "Перевод слова «{source}»: {candidate}\nНажми «{CONFIRM}» или введи свой перевод на английском:"
    )
}

#[must_use]
pub fn manual_translation_prompt(source: &str) -> String {
    format!("Не удалось найти перевод слова «{source}». Введи перевод на английском:")
}

#[must_use]
pub fn word_added(source: &str, translation: &str) -> String {
    format!("Слово {} добавлено ✅", show_target(source, translation))
}

#[must_use]
pub fn word_exists(source: &str) -> String {
    format!("Слово «{source}» уже есть в словаре.")
}

#[must_use]
pub fn word_deleted(source: &str) -> String {
    format!("Слово «{source}» удалено из твоего словаря.")
}
