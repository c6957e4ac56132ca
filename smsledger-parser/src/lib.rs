//! smsledger-parser: heuristic extraction of account, balance, amount, type
//! and merchant facts from bank/wallet transaction SMS text.
//!
//! Entry point is [`parse`]. The individual extractors are public so each
//! fallback chain can be exercised on its own.

pub mod account;
pub mod balance;
pub mod combined;
pub mod engine;
pub mod merchant;
pub mod normalize;
pub mod text;
pub mod validation;

pub use account::extract_account;
pub use balance::extract_balance;
pub use engine::{classify, extract_amount, parse};
pub use merchant::extract_merchant;
pub use normalize::{normalize, normalize_text};
pub use text::pad_currency;
pub use validation::{Rejection, ValidationRules};

pub use smsledger_core::{
    AccountInfo, AccountType, Balance, BalanceKeywordType, MerchantInfo, Transaction,
    TransactionInfo, TransactionType,
};
