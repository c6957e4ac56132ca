//! Batch input: one message per line, either plain text or a JSON record
//! `{"text": "...", "date": "..."}`.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub text: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct JsonLine {
    text: String,
    #[serde(default)]
    date: Option<String>,
}

pub fn read_records(path: &Path) -> Result<Vec<InputRecord>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, line) in s.lines().enumerate() {
        let record =
            parse_line(line).with_context(|| format!("{}:{}", path.display(), idx + 1))?;
        records.extend(record);
    }
    Ok(records)
}

/// `None` for blank lines
pub fn parse_line(line: &str) -> Result<Option<InputRecord>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with('{') {
        return Ok(Some(InputRecord {
            text: line.to_string(),
            date: None,
        }));
    }

    let raw: JsonLine = serde_json::from_str(line).context("parse JSON record")?;
    let date = raw.date.as_deref().map(parse_date).transpose()?;
    Ok(Some(InputRecord {
        text: raw.text,
        date,
    }))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`. Dates without
/// an offset are taken as UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Some(dt) = NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt.and_utc());
    }

    bail!("unrecognised date '{value}' (expected RFC 3339 or YYYY-MM-DD)")
}
