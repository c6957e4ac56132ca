use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use smsledger_core::TransactionInfo;
use smsledger_parser::{ValidationRules, parse};
use std::io::Write;

use crate::config::OutputFormat;
use crate::input::InputRecord;

/// Parse result plus the validity verdict for one message
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub parsed_data: TransactionInfo,
    pub is_valid_transaction: bool,
    pub rejection: Option<String>,
    pub original_text: String,
}

impl ParseReport {
    pub fn new(text: &str, rules: &ValidationRules) -> Self {
        let parsed_data = parse(text);
        let rejection = rules.validate(&parsed_data, text).err();
        Self {
            is_valid_transaction: rejection.is_none(),
            rejection: rejection.map(|r| r.to_string()),
            parsed_data,
            original_text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    pub date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub report: ParseReport,
}

impl BatchRecord {
    pub fn new(input: InputRecord, rules: &ValidationRules) -> Self {
        Self {
            report: ParseReport::new(&input.text, rules),
            date: input.date,
        }
    }
}

/// One CSV row, columns named after the nested JSON fields
#[derive(Debug, Serialize)]
struct FlatRecord<'a> {
    date: Option<String>,
    #[serde(rename = "account.type")]
    account_type: Option<&'static str>,
    #[serde(rename = "account.number")]
    account_number: Option<&'a str>,
    #[serde(rename = "account.name")]
    account_name: Option<&'a str>,
    #[serde(rename = "balance.available")]
    available: Option<&'a str>,
    #[serde(rename = "balance.outstanding")]
    outstanding: Option<&'a str>,
    #[serde(rename = "transaction.type")]
    transaction_type: Option<&'static str>,
    #[serde(rename = "transaction.amount")]
    amount: Option<&'a str>,
    #[serde(rename = "transaction.referenceNo")]
    reference_no: Option<&'a str>,
    #[serde(rename = "transaction.merchant")]
    merchant: Option<&'a str>,
    is_valid_transaction: bool,
    rejection: Option<&'a str>,
    original_text: &'a str,
}

impl<'a> From<&'a BatchRecord> for FlatRecord<'a> {
    fn from(record: &'a BatchRecord) -> Self {
        let info = &record.report.parsed_data;
        Self {
            date: record.date.map(|d| d.to_rfc3339()),
            account_type: info.account.kind.map(|k| k.as_str()),
            account_number: info.account.number.as_deref(),
            account_name: info.account.name.as_deref(),
            available: info.balance.available.as_deref(),
            outstanding: info.balance.outstanding.as_deref(),
            transaction_type: info.transaction.kind.map(|k| k.as_str()),
            amount: info.transaction.amount.as_deref(),
            reference_no: info.transaction.reference_no.as_deref(),
            merchant: info.transaction.merchant.as_deref(),
            is_valid_transaction: record.report.is_valid_transaction,
            rejection: record.report.rejection.as_deref(),
            original_text: &record.report.original_text,
        }
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &ParseReport, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, report)?;
    } else {
        serde_json::to_writer(&mut *out, report)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_batch<W: Write>(
    out: &mut W,
    records: &[BatchRecord],
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, records)?;
            } else {
                serde_json::to_writer(&mut *out, records)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for record in records {
                wtr.serialize(FlatRecord::from(record))
                    .context("write CSV row")?;
            }
            wtr.flush().context("flush CSV")?;
        }
    }
    Ok(())
}
