//! smsledger-core: transaction-SMS data model and the static heuristic tables

pub mod model;
pub mod tables;

pub use model::{
    AccountInfo, AccountType, Balance, BalanceKeywordType, MerchantInfo, Transaction,
    TransactionInfo, TransactionType,
};
pub use tables::CombinedWord;
