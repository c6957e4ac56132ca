//! Transaction engine: runs every extractor over one message and assembles
//! a [`TransactionInfo`].

use once_cell::sync::Lazy;
use regex::Regex;
use smsledger_core::{
    AccountType, Balance, BalanceKeywordType, Transaction, TransactionInfo, TransactionType,
};
use tracing::{debug, trace};

use crate::account::extract_account;
use crate::balance::extract_balance;
use crate::merchant::extract_merchant;
use crate::normalize::normalize;
use crate::text::{is_number, pad_currency};

const CURRENCY_MARKER: &str = "rs.";

/// Signals out of {available, amount, account number} needed before the
/// transaction type is trusted
const MIN_SIGNALS: usize = 2;

/// Checked in order, first match wins. Debit-implying verbs come before the
/// credit class so "payment received" reads as a debit.
static TYPE_CLASSES: Lazy<Vec<(Regex, TransactionType)>> = Lazy::new(|| {
    [
        (r"debited|debit|deducted", TransactionType::Debit),
        (
            r"payment|spent|paid|used\s+at|charged|transaction\son|transaction\sfee|tran|booked|purchased|sent\s+to|purchase\s+of|spent\s+on",
            TransactionType::Debit,
        ),
        (
            r"credited|credit|deposited|added|received|refund|repayment",
            TransactionType::Credit,
        ),
    ]
    .into_iter()
    .map(|(pattern, kind)| {
        let regex = Regex::new(&format!("(?i)(?:{pattern})"))
            .unwrap_or_else(|e| panic!("{kind:?} class regex: {e}"));
        (regex, kind)
    })
    .collect()
});

/// Parse one raw SMS into structured transaction facts.
///
/// Never fails: anything that cannot be extracted is left unset, and an
/// empty message yields an empty [`TransactionInfo`].
pub fn parse(message: &str) -> TransactionInfo {
    if message.is_empty() {
        return TransactionInfo::default();
    }
    debug!(message = %preview(message), "parsing message");

    let tokens = normalize(message);
    trace!(?tokens, "normalized");

    let account = extract_account(&tokens);
    let available = extract_balance(&tokens, BalanceKeywordType::Available);
    let amount = extract_amount(&tokens);

    let signals = [available.is_some(), amount.is_some(), account.number.is_some()]
        .into_iter()
        .filter(|present| *present)
        .count();
    let kind = if signals >= MIN_SIGNALS {
        classify(&tokens)
    } else {
        debug!(signals, "too few signals to classify");
        None
    };

    let outstanding = if account.kind == Some(AccountType::Card) {
        extract_balance(&tokens, BalanceKeywordType::Outstanding)
    } else {
        None
    };

    let merchant = extract_merchant(message);

    let info = TransactionInfo {
        account,
        balance: Balance {
            available,
            outstanding,
        },
        transaction: Transaction {
            kind,
            amount,
            reference_no: merchant.reference_no,
            merchant: merchant.merchant,
        },
    };
    debug!(
        account = ?info.account.kind,
        kind = ?info.transaction.kind,
        amount = ?info.transaction.amount,
        "parsed message"
    );
    info
}

/// Amount following the first `rs.` token. The token right after it is
/// tried first, then the one after that.
pub fn extract_amount(tokens: &[String]) -> Option<String> {
    let idx = tokens.iter().position(|t| t == CURRENCY_MARKER)?;
    tokens[idx + 1..]
        .iter()
        .take(2)
        .map(|token| token.replace(',', ""))
        .find(|candidate| is_number(candidate))
        .map(|amount| pad_currency(&amount))
}

/// Debit or credit, judged from the verbs in the message
pub fn classify(tokens: &[String]) -> Option<TransactionType> {
    let text = tokens.join(" ");
    TYPE_CLASSES
        .iter()
        .find(|(regex, _)| regex.is_match(&text))
        .map(|(_, kind)| *kind)
}

/// First 50 characters, for log lines
fn preview(message: &str) -> String {
    message.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smsledger_core::AccountInfo;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_debit_from_bank_account() {
        let info = parse(
            "INR 2000 debited from A/c no. XX3423 on 05-02-19 07:27:11 IST at ECS PAY. Avl Bal- INR 2343.23.",
        );
        assert_eq!(info.account, AccountInfo::numbered(AccountType::Account, "3423"));
        assert_eq!(info.transaction.amount.as_deref(), Some("2000.00"));
        assert_eq!(info.transaction.kind, Some(TransactionType::Debit));
        assert_eq!(info.balance.available.as_deref(), Some("2343.23"));
        assert_eq!(info.balance.outstanding, None);
        assert_eq!(info.transaction.merchant.as_deref(), Some("e"));
    }

    #[test]
    fn test_credit_to_bank_account() {
        let info = parse(
            "Your a/c no. XX1234 has been credited with INR 5,000.00 on 10-03-23 through NEFT. Avl Bal: INR 12,435.50",
        );
        assert_eq!(info.account.number.as_deref(), Some("1234"));
        assert_eq!(info.transaction.amount.as_deref(), Some("5000.00"));
        assert_eq!(info.transaction.kind, Some(TransactionType::Credit));
        assert_eq!(info.balance.available.as_deref(), Some("12435.50"));
    }

    #[test]
    fn test_wallet_debit_with_single_signal() {
        let info = parse("Your Paytm wallet was debited for Rs. 299.00 for payment to NETFLIX.");
        assert_eq!(info.account, AccountInfo::named(AccountType::Wallet, "paytm"));
        assert_eq!(info.transaction.amount.as_deref(), Some("299.00"));
        // only the amount is present, so the type is not trusted
        assert_eq!(info.transaction.kind, None);
    }

    #[test]
    fn test_card_spend_with_outstanding() {
        let info = parse(
            "Rs.1,250.00 spent on your SBI Credit Card ending 5678 at AMAZON on 12/03/24. Avl Lmt: Rs.45,000.00. Outstanding: Rs.5,000",
        );
        assert_eq!(info.account, AccountInfo::numbered(AccountType::Card, "5678"));
        assert_eq!(info.transaction.amount.as_deref(), Some("1250.00"));
        assert_eq!(info.transaction.kind, Some(TransactionType::Debit));
        assert_eq!(info.balance.available.as_deref(), Some("45000.00"));
        assert_eq!(info.balance.outstanding.as_deref(), Some("5000.00"));
        assert_eq!(info.transaction.merchant.as_deref(), Some("amazon"));
    }

    #[test]
    fn test_outstanding_only_for_cards() {
        let info = parse("Rs 500 debited from A/c 4321. Avl Bal Rs 900. Outstanding Rs 100");
        assert_eq!(info.account.kind, Some(AccountType::Account));
        assert_eq!(info.balance.outstanding, None);
    }

    #[test]
    fn test_wallet_balance_counts_as_signal() {
        let info = parse("Amazon Pay balance debited by Rs 45");
        assert_eq!(info.account, AccountInfo::named(AccountType::Wallet, "amazon_pay"));
        assert_eq!(info.balance.available.as_deref(), Some("45.00"));
        assert_eq!(info.transaction.kind, Some(TransactionType::Debit));
    }

    #[test]
    fn test_bonded_account_number() {
        let info = parse("Your ac1234567890 is debited for INR 300");
        assert_eq!(info.account.number.as_deref(), Some("7890"));
        assert_eq!(info.transaction.amount.as_deref(), Some("300.00"));
        assert_eq!(info.transaction.kind, Some(TransactionType::Debit));
    }

    #[test]
    fn test_otp_is_not_a_transaction() {
        let info = parse("OTP is 123456");
        assert!(info.is_empty());
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(parse(""), TransactionInfo::default());
        assert!(parse("   \n ").is_empty());
        assert!(parse("💸💸💸 खर्च").is_empty());
    }

    #[test]
    fn test_extract_amount() {
        assert_eq!(extract_amount(&tokens(&["rs.", "1,250.00"])), Some("1250.00".into()));
        assert_eq!(extract_amount(&tokens(&["rs.", "-", "75"])), Some("75.00".into()));
        assert_eq!(extract_amount(&tokens(&["rs.", "a", "b", "75"])), None);
        assert_eq!(extract_amount(&tokens(&["rs."])), None);
        assert_eq!(extract_amount(&tokens(&["paid", "500"])), None);
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(classify(&tokens(&["payment", "received"])), Some(TransactionType::Debit));
        assert_eq!(classify(&tokens(&["refund", "credited"])), Some(TransactionType::Credit));
        assert_eq!(classify(&tokens(&["used", "at", "shop"])), Some(TransactionType::Debit));
        assert_eq!(classify(&tokens(&["hello"])), None);
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        let long = "é".repeat(80);
        assert_eq!(preview(&long).chars().count(), 50);
        assert_eq!(preview("short"), "short");
    }
}
