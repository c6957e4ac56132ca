//! Token normalizer: rewrites raw SMS text into a canonical lowercase token
//! sequence.
//!
//! The rewrites run in a fixed order and later steps depend on earlier ones
//! (masking characters must be gone before `ac <number>` can be read, `rs`
//! spacing is settled before the currency marker is canonicalized). Each
//! currency amount ends up as the two tokens `rs.` `<amount>`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::combined;
use crate::text::is_word_char;

static ACCOUNT_ALIASES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bac\b|\bacct\b|\baccount\b").expect("account alias regex"));

/// Normalize `raw` and split it into tokens
pub fn normalize(raw: &str) -> Vec<String> {
    normalize_text(raw)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Normalize `raw` without splitting
pub fn normalize_text(raw: &str) -> String {
    let mut text = raw.to_lowercase();

    // Punctuation folding. `/` is dropped outright so "a/c" reads as "ac".
    text = text.replace('!', "");
    text = text.replace(':', " ");
    text = text.replace('/', "");
    text = text.replace('=', " ");
    text = text.replace(['{', '}'], " ");
    text = text.replace(['\n', '\r'], " ");

    // Masked numbers: "ending 1234", "XX1234", "****1234"
    text = text.replace("ending ", "");
    text.retain(|c| c != 'x' && c != '*');

    text = text.replace("is ", "");
    text = text.replace("with ", "");
    text = text.replace("no. ", "");

    text = ACCOUNT_ALIASES.replace_all(&text, "ac").into_owned();

    // Currency markers: every rs/inr variant becomes "rs. <amount>"
    text = replace_before_word(&text, "rs", "rs. ");
    text = text.replace("rs ", "rs. ");
    text = replace_before_word(&text, "inr", "rs. ");
    text = text.replace("inr ", "rs. ");
    text = text.replace("rs. ", "rs.");
    text = replace_before_word(&text, "rs?", "rs. ");

    text = text.replace("debited", " debited ");
    text = text.replace("credited", " credited ");

    combined::apply(&text)
}

/// Replace each non-overlapping occurrence of `pattern` that is immediately
/// followed by a word character. A `?` in `pattern` matches any character
/// except a newline. The lookahead character itself is kept.
fn replace_before_word(text: &str, pattern: &str, replacement: &str) -> String {
    let pattern: Vec<char> = pattern.chars().collect();
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + replacement.len());

    let mut i = 0;
    while i < chars.len() {
        let end = i + pattern.len();
        let hit = end < chars.len()
            && chars[i..end]
                .iter()
                .zip(&pattern)
                .all(|(c, p)| c == p || (*p == '?' && *c != '\n'))
            && is_word_char(chars[end]);

        if hit {
            out.push_str(replacement);
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}
