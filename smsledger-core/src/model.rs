//! Structured facts extracted from a single transaction SMS.
//!
//! Every value here is built inside one parse call and handed to the caller.
//! Field names serialize to the dotted shape downstream consumers expect:
//! `account.type`, `balance.available`, `transaction.referenceNo`, ...

use serde::{Deserialize, Serialize};

/// Kind of financial instrument a message refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountType {
    #[serde(rename = "CARD")]
    Card,
    #[serde(rename = "WALLET")]
    Wallet,
    #[serde(rename = "ACCOUNT")]
    Account,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Card => "CARD",
            AccountType::Wallet => "WALLET",
            AccountType::Account => "ACCOUNT",
        }
    }
}

/// Direction of money movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
        }
    }
}

/// Which balance keyword list to search with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BalanceKeywordType {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "OUTSTANDING")]
    Outstanding,
}

/// The instrument referenced by a message.
///
/// CARD and ACCOUNT usually carry `number` (last 4 digits), WALLET carries
/// `name`. A recognised card product with an unreadable number is CARD with
/// only `name` set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountInfo {
    #[serde(rename = "type")]
    pub kind: Option<AccountType>,
    pub number: Option<String>,
    pub name: Option<String>,
}

impl AccountInfo {
    /// Account or card identified by its (possibly unmasked) number
    pub fn numbered(kind: AccountType, number: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            number: Some(number.into()),
            name: None,
        }
    }

    /// Wallet, card product or special account identified by name
    pub fn named(kind: AccountType, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            number: None,
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.number.is_none() && self.name.is_none()
    }
}

/// Balances as two-decimal strings, e.g. `"2343.23"`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub available: Option<String>,
    /// Only looked up for cards
    pub outstanding: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Unset means "not enough evidence", not "not a transaction"
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub amount: Option<String>,
    #[serde(rename = "referenceNo")]
    pub reference_no: Option<String>,
    pub merchant: Option<String>,
}

/// Merchant name and payment reference pulled from a message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MerchantInfo {
    pub merchant: Option<String>,
    #[serde(rename = "referenceNo")]
    pub reference_no: Option<String>,
}

/// Everything extracted from one message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionInfo {
    pub account: AccountInfo,
    pub balance: Balance,
    pub transaction: Transaction,
}

impl TransactionInfo {
    /// True when nothing at all was recognised
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_debit(&self) -> bool {
        self.transaction.kind == Some(TransactionType::Debit)
    }

    pub fn is_credit(&self) -> bool {
        self.transaction.kind == Some(TransactionType::Credit)
    }
}
