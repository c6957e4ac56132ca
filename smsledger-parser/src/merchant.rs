//! Merchant and payment-reference extraction.
//!
//! Runs on a fresh normalization of the raw message. Order of attempts:
//! VPA token, UPI keyword proximity (which may also yield the reference
//! number and falls back to UPI handles), then the positional fallbacks
//! `at X on`, `at X`, `on X`.

use once_cell::sync::Lazy;
use regex::Regex;
use smsledger_core::MerchantInfo;
use smsledger_core::tables::{UPI_HANDLES, UPI_KEYWORDS};
use tracing::trace;

use crate::normalize::normalize;
use crate::text::{is_number, longest_digit_run, non_empty};

static WORD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").expect("word separator regex"));

static UPI_HANDLE: Lazy<Regex> = Lazy::new(|| {
    let handles = UPI_HANDLES.join("|");
    Regex::new(&format!(r"(?i)[a-zA-Z0-9_-]+(?:{handles})")).expect("upi handle regex")
});

/// Positional fallbacks in priority order. `at X` is lazy with no anchor
/// after it, so it captures a single character.
static POSITIONAL_FALLBACKS: Lazy<[(&str, Regex); 3]> = Lazy::new(|| {
    [
        ("at-on", Regex::new(r"(?i)at\s+(.+?)\s+on\s+").expect("at-on regex")),
        ("at", Regex::new(r"(?i)at\s+(.+?)").expect("at regex")),
        ("on", Regex::new(r"(?i)on\s+(.+?)\s").expect("on regex")),
    ]
});

/// Extract the merchant name and UPI reference number from a raw message
pub fn extract_merchant(message: &str) -> MerchantInfo {
    let tokens = normalize(message);
    let text = tokens.join(" ");

    let mut merchant = vpa_merchant(&tokens);
    let mut reference_no = None;

    if let Some(keyword) = upi_keyword(&text) {
        let next = next_word(&text, keyword);
        if is_number(&next) {
            reference_no = Some(next);
        } else if merchant.is_some() {
            reference_no = longest_digit_run(&next).map(str::to_string);
        } else {
            merchant = non_empty(&next);
        }
        trace!(keyword, ?merchant, ?reference_no, "upi keyword");

        if merchant.is_none() {
            merchant = UPI_HANDLE.find(&text).map(|m| m.as_str().to_string());
        }
    }

    if merchant.is_none() {
        merchant = POSITIONAL_FALLBACKS.iter().find_map(|(name, regex)| {
            let found = regex.captures(&text).and_then(|caps| non_empty(&caps[1]))?;
            trace!(fallback = name, merchant = %found, "positional merchant");
            Some(found)
        });
    }

    MerchantInfo {
        merchant,
        reference_no,
    }
}

/// Payee after a `vpa` token, cut at the first parenthesis
fn vpa_merchant(tokens: &[String]) -> Option<String> {
    let idx = tokens.iter().position(|t| t == "vpa")?;
    let next = tokens.get(idx + 1)?;
    let name = next.replace(['(', ')'], " ");
    name.split(' ').next().and_then(non_empty)
}

/// The UPI keyword occurring earliest in `text` (ignoring offset 0); ties go
/// to the keyword listed first.
fn upi_keyword(text: &str) -> Option<&'static str> {
    UPI_KEYWORDS
        .iter()
        .filter_map(|keyword| match text.find(keyword) {
            Some(at) if at > 0 => Some((at, *keyword)),
            _ => None,
        })
        .min_by_key(|(at, _)| *at)
        .map(|(_, keyword)| keyword)
}

/// First alphanumeric word after the first occurrence of `keyword`, looking
/// no further than its second occurrence.
fn next_word(text: &str, keyword: &str) -> String {
    let mut parts = text.splitn(3, keyword);
    parts.next();
    let Some(group) = parts.next() else {
        return String::new();
    };

    WORD_SEPARATOR
        .split(group.trim())
        .next()
        .unwrap_or_default()
        .to_string()
}
