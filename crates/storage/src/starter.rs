//! Built-in vocabulary for offline drilling.

use vocab_core::model::{Word, WordId};

const STARTER: &[(u64, &str, &str)] = &[
    (1, "apple", "яблоко"),
    (2, "bread", "хлеб"),
    (3, "water", "вода"),
    (4, "house", "дом"),
    (5, "window", "окно"),
    (6, "friend", "друг"),
    (7, "river", "река"),
    (8, "forest", "лес"),
    (9, "city", "город"),
    (10, "street", "улица"),
    (11, "morning", "утро"),
    (12, "evening", "вечер"),
    (13, "book", "книга"),
    (14, "table", "стол"),
    (15, "chair", "стул"),
    (16, "cup", "чашка"),
];

/// Starter word list used when no word service is configured.
#[must_use]
pub fn starter_words() -> Vec<Word> {
    STARTER
        .iter()
        .filter_map(|(id, target, native)| Word::new(WordId::new(*id), *target, *native, "").ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_words_have_unique_ids() {
        let words = starter_words();
        assert_eq!(words.len(), STARTER.len());
        let mut ids: Vec<_> = words.iter().map(Word::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), words.len());
    }
}
