//! Combined-word matcher: collapses phrases like "credit card" into a single
//! token (`c_card`) and maps those tokens back to their instrument kind.

use once_cell::sync::Lazy;
use regex::Regex;
use smsledger_core::AccountType;
use smsledger_core::tables::{COMBINED_WORDS, CombinedWord, combined_words_of};

static COMPILED: Lazy<Vec<(Regex, &'static CombinedWord)>> = Lazy::new(|| {
    COMBINED_WORDS
        .iter()
        .map(|cw| {
            let regex = Regex::new(&format!("(?i){}", cw.pattern))
                .unwrap_or_else(|e| panic!("combined word {}: {e}", cw.word));
            (regex, cw)
        })
        .collect()
});

/// Rewrite every combined phrase in `text`, in table order
pub fn apply(text: &str) -> String {
    COMPILED.iter().fold(text.to_string(), |acc, (regex, cw)| {
        regex.replace_all(&acc, cw.word).into_owned()
    })
}

/// The card-type combined word equal to `token`, if any
pub fn card_word(token: &str) -> Option<&'static CombinedWord> {
    combined_words_of(AccountType::Card).find(|cw| cw.word == token)
}

/// Combined words that denote special accounts (e.g. `niyo`)
pub fn account_words() -> impl Iterator<Item = &'static CombinedWord> {
    combined_words_of(AccountType::Account)
}
