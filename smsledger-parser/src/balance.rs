//! Balance extractor.
//!
//! Two strategies, tried in order:
//! 1. Find the first keyword (in list order) and read the amount after the
//!    next `rs.` marker.
//! 2. No `rs.` after a keyword: regex search for `keyword amount`, then
//!    `amount keyword`.

use once_cell::sync::Lazy;
use regex::Regex;
use smsledger_core::BalanceKeywordType;
use tracing::trace;

use crate::text::pad_currency;

const CURRENCY_MARKER: &str = "rs.";

struct KeywordPatterns {
    keyword_then_amount: Regex,
    amount_then_keyword: Regex,
}

impl KeywordPatterns {
    fn compile(kind: BalanceKeywordType) -> Self {
        // Keywords go in unescaped: "avbl. credit limit" matches any char at `.`
        let keywords = kind.keywords().join("|");
        let amount = r"(\d+\.\d+|\d+)";
        Self {
            keyword_then_amount: Regex::new(&format!(r"(?i)({keywords})\s*{amount}"))
                .expect("keyword-then-amount regex"),
            amount_then_keyword: Regex::new(&format!(r"(?i){amount}\s*({keywords})"))
                .expect("amount-then-keyword regex"),
        }
    }

    fn find(&self, message: &str) -> Option<String> {
        if let Some(caps) = self.keyword_then_amount.captures(message) {
            return Some(caps[2].to_string());
        }
        self.amount_then_keyword
            .captures(message)
            .map(|caps| caps[1].to_string())
    }
}

static AVAILABLE_PATTERNS: Lazy<KeywordPatterns> =
    Lazy::new(|| KeywordPatterns::compile(BalanceKeywordType::Available));
static OUTSTANDING_PATTERNS: Lazy<KeywordPatterns> =
    Lazy::new(|| KeywordPatterns::compile(BalanceKeywordType::Outstanding));

fn patterns(kind: BalanceKeywordType) -> &'static KeywordPatterns {
    match kind {
        BalanceKeywordType::Available => &*AVAILABLE_PATTERNS,
        BalanceKeywordType::Outstanding => &*OUTSTANDING_PATTERNS,
    }
}

/// Extract the balance named by `kind` from normalized tokens, padded to
/// two decimals.
pub fn extract_balance(tokens: &[String], kind: BalanceKeywordType) -> Option<String> {
    let message = tokens.join(" ");

    let marker = keyword_end(&message, kind.keywords())
        .and_then(|start| message[start..].find(CURRENCY_MARKER).map(|at| start + at));

    let raw = match marker {
        Some(at) => {
            trace!(?kind, at, "balance read after currency marker");
            read_amount(&message[at + CURRENCY_MARKER.len()..])
        }
        None => {
            trace!(?kind, "balance falling back to keyword/amount regex");
            patterns(kind).find(&message).unwrap_or_default()
        }
    };

    if raw.is_empty() { None } else { Some(pad_currency(&raw)) }
}

/// Byte offset just past the first keyword found, trying keywords in order
fn keyword_end(message: &str, keywords: &[&str]) -> Option<usize> {
    keywords
        .iter()
        .find_map(|word| message.find(word).map(|at| at + word.len()))
}

/// Read an amount such as `12,435.50`: characters before the first digit
/// are skipped, commas are dropped, one decimal point is kept, anything
/// else ends the amount.
fn read_amount(text: &str) -> String {
    let mut amount = String::new();
    let mut seen_digit = false;
    let mut seen_point = false;

    for c in text.chars() {
        if c.is_ascii_digit() {
            seen_digit = true;
            amount.push(c);
        } else if seen_digit {
            match c {
                ',' => {}
                '.' if !seen_point => {
                    seen_point = true;
                    amount.push('.');
                }
                _ => break,
            }
        }
    }

    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn available(raw: &str) -> Option<String> {
        extract_balance(&normalize(raw), BalanceKeywordType::Available)
    }

    fn outstanding(raw: &str) -> Option<String> {
        extract_balance(&normalize(raw), BalanceKeywordType::Outstanding)
    }

    #[test]
    fn test_keyword_then_currency_marker() {
        assert_eq!(
            available("INR 2000 debited from A/c no. XX3423 on 05-02-19. Avl Bal- INR 2343.23."),
            Some("2343.23".to_string())
        );
        assert_eq!(
            available("Avl Bal: INR 12,435.50"),
            Some("12435.50".to_string())
        );
    }

    #[test]
    fn test_amount_without_fraction_is_padded() {
        assert_eq!(available("Avl bal Rs 500"), Some("500.00".to_string()));
        assert_eq!(available("Avl bal Rs 500.5"), Some("500.50".to_string()));
    }

    #[test]
    fn test_keyword_list_order_beats_text_order() {
        // "avl lmt" is listed before the generic "available"
        assert_eq!(
            available("Available: Rs 10. Avl Lmt: Rs 45,000.00"),
            Some("45000.00".to_string())
        );
    }

    #[test]
    fn test_generic_bal_matches_inside_balance() {
        assert_eq!(
            available("Amazon Pay balance debited by Rs 45"),
            Some("45.00".to_string())
        );
    }

    #[test]
    fn test_amount_before_keyword_fallback() {
        assert_eq!(
            available("Rs 500 debited. 1500.50 available in your a/c 4455"),
            Some("1500.50".to_string())
        );
    }

    #[test]
    fn test_keyword_then_bare_amount_fallback() {
        assert_eq!(available("Bal 700.25 as of today"), Some("700.25".to_string()));
    }

    #[test]
    fn test_marker_without_digits_gives_nothing() {
        assert_eq!(available("Avl bal Rs. n/a"), None);
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(available("Rs 500 debited from a/c 1234"), None);
        assert_eq!(available(""), None);
    }

    #[test]
    fn test_outstanding() {
        assert_eq!(
            outstanding("Avl Lmt: Rs.45,000.00. Outstanding: Rs.5,000"),
            Some("5000.00".to_string())
        );
        assert_eq!(outstanding("Avl Lmt: Rs.45,000.00"), None);
    }

    #[test]
    fn test_read_amount_stops_at_second_point() {
        assert_eq!(read_amount(" 2343.23."), "2343.23");
        assert_eq!(read_amount(" 12,435.50 avl"), "12435.50");
        assert_eq!(read_amount("abc"), "");
        assert_eq!(read_amount(" x 5"), "5");
    }
}
