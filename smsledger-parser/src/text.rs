//! Small string/number predicates shared by the extractors.

/// True if `s` reads as a floating point number (`12`, `12.5`, `1e3`, `inf`).
pub fn is_number(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok()
}

/// True if `s` reads as an integer: optional sign, then ASCII digits only.
/// Length is unbounded; long card and account numbers must pass.
pub fn is_integer(s: &str) -> bool {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Regex `\w`: letters, digits and underscore
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Drop one leading and one trailing character when that end is not a digit.
///
/// `"1234,"` -> `"1234"`, `"(5678)"` -> `"5678"`, `"a"` -> `""`.
pub fn trim_non_numeric_ends(word: &str) -> &str {
    let mut trimmed = word;
    if let Some(last) = word.chars().last() {
        if !last.is_ascii_digit() {
            trimmed = &trimmed[..trimmed.len() - last.len_utf8()];
        }
    }
    if let Some(first) = word.chars().next() {
        if !first.is_ascii_digit() {
            trimmed = trimmed.get(first.len_utf8()..).unwrap_or("");
        }
    }
    trimmed
}

/// Pad a numeric string to two decimal places.
///
/// `"100"` -> `"100.00"`, `"100.5"` -> `"100.50"`, `"100."` -> `"100.00"`.
/// Longer fractions are kept as they are.
pub fn pad_currency(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value.split_once('.') {
        None => format!("{value}.00"),
        Some((whole, fraction)) => format!("{whole}.{fraction:0<2}"),
    }
}

/// Longest run of ASCII digits in `s`; the first one wins a tie.
pub fn longest_digit_run(s: &str) -> Option<&str> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .rev()
        .max_by_key(|run| run.len())
}

/// `Some(s)` unless `s` is empty after trimming
pub fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
