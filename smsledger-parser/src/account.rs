//! Account extractor: classifies the instrument as CARD / WALLET / ACCOUNT and
//! reads its masked number or name.
//!
//! Strategies are tried in priority order and the first hit wins:
//! 1. `ac <number>` or a bonded token such as `ac1234` (one left-to-right pass)
//! 2. `card <number>` or a card combined word (`c_card 1234`, bare `slice_card`)
//! 3. a known wallet name
//! 4. a special-account combined word (`niyo`)

use smsledger_core::tables::WALLETS;
use smsledger_core::{AccountInfo, AccountType};
use tracing::debug;

use crate::combined;
use crate::text::{is_integer, is_number, trim_non_numeric_ends};

/// Banks show only the last four digits of an identifier
const MASKED_DIGITS: usize = 4;

type Strategy = fn(&[String]) -> Option<AccountInfo>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("account-number", account_number),
    ("card", card),
    ("wallet", wallet),
    ("special-account", special_account),
];

/// Identify the instrument referenced by normalized `tokens`
pub fn extract_account(tokens: &[String]) -> AccountInfo {
    let found = STRATEGIES.iter().find_map(|(name, strategy)| {
        let account = strategy(tokens)?;
        debug!(strategy = name, kind = ?account.kind, "account matched");
        Some(account)
    });

    let mut account = found.unwrap_or_default();
    if let Some(number) = account.number.take() {
        account.number = Some(last_digits(&number));
    }
    account
}

/// Keep only the trailing digits a bank would show, e.g. `4334XXXX4334` -> `4334`
fn last_digits(number: &str) -> String {
    let count = number.chars().count();
    number.chars().skip(count.saturating_sub(MASKED_DIGITS)).collect()
}

fn account_number(tokens: &[String]) -> Option<AccountInfo> {
    for (idx, word) in tokens.iter().enumerate() {
        if word == "ac" {
            let number = tokens
                .get(idx + 1)
                .map(|next| trim_non_numeric_ends(next))
                .filter(|number| is_integer(number));
            if let Some(number) = number {
                return Some(AccountInfo::numbered(AccountType::Account, number));
            }
            // not followed by a number; keep scanning
        } else if word.contains("ac") {
            if let Some(number) = bonded_number(word) {
                return Some(AccountInfo::numbered(AccountType::Account, number));
            }
        }
    }
    None
}

/// `ac1234` -> `1234`
fn bonded_number(word: &str) -> Option<String> {
    let stripped = word.replace("ac", "");
    is_number(&stripped).then_some(stripped)
}

fn card(tokens: &[String]) -> Option<AccountInfo> {
    let (idx, product) = tokens.iter().enumerate().find_map(|(idx, word)| {
        if word == "card" {
            Some((idx, None))
        } else {
            combined::card_word(word).map(|cw| (idx, Some(cw)))
        }
    })?;

    let next = tokens.get(idx + 1)?;
    if is_integer(next) {
        return Some(AccountInfo::numbered(AccountType::Card, next.as_str()));
    }

    // A known card product is still worth reporting without its number
    product.map(|cw| AccountInfo::named(AccountType::Card, cw.word))
}

fn wallet(tokens: &[String]) -> Option<AccountInfo> {
    tokens
        .iter()
        .find(|word| WALLETS.contains(&word.as_str()))
        .map(|word| AccountInfo::named(AccountType::Wallet, word.as_str()))
}

fn special_account(tokens: &[String]) -> Option<AccountInfo> {
    combined::account_words()
        .find(|cw| tokens.iter().any(|word| word == cw.word))
        .map(|cw| AccountInfo::named(cw.kind, cw.word))
}
