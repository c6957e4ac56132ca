//! Post-parse judgement: is a parsed message a spend worth recording?
//!
//! The engine never consults these rules; callers apply them to the
//! engine's output.

use serde::{Deserialize, Serialize};
use smsledger_core::TransactionInfo;
use thiserror::Error;

/// Why a parsed message was not accepted as a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("message is shorter than {min} characters")]
    TooShort { min: usize },

    #[error("message is longer than {max} characters")]
    TooLong { max: usize },

    #[error("credit transactions are not recorded")]
    Credit,

    #[error("message contains denied keyword '{0}'")]
    DeniedKeyword(String),

    #[error("required field {0} is missing")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationRules {
    pub min_length: usize,
    pub max_length: usize,
    /// Matched as lowercase substrings of the raw message
    pub denied_keywords: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 1000,
            denied_keywords: ["failed", "declined", "otp", "secret"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ValidationRules {
    /// Check `info` (parsed from `text`) against the rules, reporting the
    /// first one that fails
    pub fn validate(&self, info: &TransactionInfo, text: &str) -> Result<(), Rejection> {
        let length = text.chars().count();
        if length < self.min_length {
            return Err(Rejection::TooShort {
                min: self.min_length,
            });
        }
        if length > self.max_length {
            return Err(Rejection::TooLong {
                max: self.max_length,
            });
        }

        if info.is_credit() {
            return Err(Rejection::Credit);
        }

        let lowered = text.to_lowercase();
        if let Some(keyword) = self
            .denied_keywords
            .iter()
            .find(|keyword| lowered.contains(&keyword.to_lowercase()))
        {
            return Err(Rejection::DeniedKeyword(keyword.clone()));
        }

        let required = [
            ("account.type", info.account.kind.is_some()),
            ("account.number", info.account.number.is_some()),
            ("transaction.amount", info.transaction.amount.is_some()),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, present)| !present) {
            return Err(Rejection::MissingField(field));
        }

        Ok(())
    }

    pub fn is_valid(&self, info: &TransactionInfo, text: &str) -> bool {
        self.validate(info, text).is_ok()
    }
}
