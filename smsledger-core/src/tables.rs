//! Compiled-in heuristic tables.
//!
//! Order is significant in every list: lookups walk them front to back and
//! stop at the first hit, so specific phrases come before generic ones.

use crate::model::{AccountType, BalanceKeywordType};

/// Phrases that mark an available balance or limit, most specific first
pub const AVAILABLE_BALANCE_KEYWORDS: &[&str] = &[
    "avbl bal",
    "available balance",
    "available limit",
    "available credit limit",
    "avbl. credit limit",
    "limit available",
    "a/c bal",
    "ac bal",
    "available bal",
    "avl bal",
    "updated balance",
    "total balance",
    "new balance",
    "bal",
    "avl lmt",
    "available",
];

pub const OUTSTANDING_BALANCE_KEYWORDS: &[&str] = &["outstanding"];

/// Wallet names as they appear after normalization
pub const WALLETS: &[&str] = &["paytm", "simpl", "lazypay", "amazon_pay"];

/// Markers that precede a UPI reference number (or a payee)
pub const UPI_KEYWORDS: &[&str] = &["upi", "ref no", "upi ref", "upi ref no"];

/// Known UPI handle suffixes. Duplicates are harmless.
pub const UPI_HANDLES: &[&str] = &[
    "@BARODAMPAY",
    "@rbl",
    "@idbi",
    "@upi",
    "@aubank",
    "@axisbank",
    "@bandhan",
    "@dlb",
    "@indus",
    "@kbl",
    "@federal",
    "@sbi",
    "@uco",
    "@citi",
    "@citigold",
    "@dlb",
    "@dbs",
    "@freecharge",
    "@okhdfcbank",
    "@okaxis",
    "@oksbi",
    "@okicici",
    "@yesg",
    "@hsbc",
    "@idbi",
    "@icici",
    "@indianbank",
    "@allbank",
    "@kotak",
    "@ikwik",
    "@unionbankofindia",
    "@uboi",
    "@unionbank",
    "@paytm",
    "@ybl",
    "@axl",
    "@ibl",
    "@sib",
    "@yespay",
];

/// A multi-word phrase collapsed into one token during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedWord {
    /// Case-insensitive regex for the phrase
    pub pattern: &'static str,
    /// Token the phrase is rewritten to
    pub word: &'static str,
    /// Instrument kind the token stands for
    pub kind: AccountType,
}

pub const COMBINED_WORDS: &[CombinedWord] = &[
    CombinedWord {
        pattern: r"credit\scard",
        word: "c_card",
        kind: AccountType::Card,
    },
    CombinedWord {
        pattern: r"amazon\spay",
        word: "amazon_pay",
        kind: AccountType::Wallet,
    },
    CombinedWord {
        pattern: r"uni\scard",
        word: "uni_card",
        kind: AccountType::Card,
    },
    CombinedWord {
        pattern: r"niyo\scard",
        word: "niyo",
        kind: AccountType::Account,
    },
    CombinedWord {
        pattern: r"slice\scard",
        word: "slice_card",
        kind: AccountType::Card,
    },
    CombinedWord {
        pattern: r"one\s*card",
        word: "one_card",
        kind: AccountType::Card,
    },
];

impl BalanceKeywordType {
    /// Keyword list searched for this balance kind
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            BalanceKeywordType::Available => AVAILABLE_BALANCE_KEYWORDS,
            BalanceKeywordType::Outstanding => OUTSTANDING_BALANCE_KEYWORDS,
        }
    }
}

/// Combined words standing for the given instrument kind, in table order
pub fn combined_words_of(kind: AccountType) -> impl Iterator<Item = &'static CombinedWord> {
    COMBINED_WORDS.iter().filter(move |cw| cw.kind == kind)
}
