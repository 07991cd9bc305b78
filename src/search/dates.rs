//! Date and date-time coercion
//!
//! Patterns use the familiar `yyyy-MM-dd HH:mm:ss.SSS` letter notation and are
//! compiled to chrono format strings. A pattern carries time-of-day when it
//! contains `HH`, `mm` or `ss`; date-only patterns resolve to midnight.
//!
//! Raw search values are coerced through a fixed, ordered list of patterns
//! (`DATE_CASCADE`); the first pattern that parses the whole value wins.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};

use super::errors::{SearchError, SearchResult};

/// Accepted input patterns, in priority order
pub const DATE_CASCADE: [&str; 6] = [
    "yyyyMMdd",
    "yyyyMMddHHmmss",
    "yyyy-MM-dd HH:mm:ss",
    "yyyy-MM-dd",
    "yyyy-MM-ddTHH:mm:ss.SSS'Z'",
    "yyyy-MM-ddTHH:mm:ss.SSS",
];

static CASCADE: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    DATE_CASCADE
        .iter()
        .filter_map(|pattern| DatePattern::compile(pattern).ok())
        .collect()
});

/// One position in a pattern's expected layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Exactly this many ASCII digits
    Digits(usize),
    Literal(char),
}

/// A compiled date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    format: String,
    shape: Vec<Slot>,
    has_time: bool,
}

impl DatePattern {
    /// Compiles a letter pattern.
    ///
    /// Supported runs: `yyyy`, `yy`, `MM`, `dd`, `HH`, `mm`, `ss` and `SSS`
    /// (milliseconds, parsed as a dedicated three-digit field). Text inside
    /// single quotes is literal, `''` is a quote, and a bare `T` is accepted
    /// as the ISO separator. Any other letter run is rejected.
    ///
    /// Every numeric field is fixed-width: `2024-1-5` does not match
    /// `yyyy-MM-dd`.
    pub fn compile(pattern: &str) -> SearchResult<Self> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut format = String::with_capacity(pattern.len() * 2);
        let mut shape = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    format.push('\'');
                    shape.push(Slot::Literal('\''));
                    i += 2;
                    continue;
                }
                let close = chars[i + 1..]
                    .iter()
                    .position(|&q| q == '\'')
                    .ok_or_else(|| invalid_pattern(pattern))?;
                for &literal in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut format, literal);
                    shape.push(Slot::Literal(literal));
                }
                i += close + 2;
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut format, c);
                shape.push(Slot::Literal(c));
                i += 1;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&r| r == c).count();
            let (item, slot) = match (c, run) {
                ('y', 4) => ("%Y", Slot::Digits(4)),
                ('y', 2) => ("%y", Slot::Digits(2)),
                ('M', 2) => ("%m", Slot::Digits(2)),
                ('d', 2) => ("%d", Slot::Digits(2)),
                ('H', 2) => ("%H", Slot::Digits(2)),
                ('m', 2) => ("%M", Slot::Digits(2)),
                ('s', 2) => ("%S", Slot::Digits(2)),
                ('S', 3) => ("%3f", Slot::Digits(3)),
                ('T', 1) => ("T", Slot::Literal('T')),
                _ => return Err(invalid_pattern(pattern)),
            };
            format.push_str(item);
            shape.push(slot);
            i += run;
        }

        Ok(Self {
            pattern: pattern.to_string(),
            format,
            shape,
            has_time: has_time(pattern),
        })
    }

    /// The pattern as written
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled chrono format string
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Whether the pattern carries time-of-day
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// Parses the whole value, or returns `None`.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        if !self.matches_shape(value) {
            return None;
        }

        if self.has_time {
            NaiveDateTime::parse_from_str(value, &self.format).ok()
        } else {
            NaiveDate::parse_from_str(value, &self.format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        }
    }

    /// True when every digit run has the pattern's width and every literal
    /// sits where the pattern puts it. chrono alone accepts `2024-1-5`.
    fn matches_shape(&self, value: &str) -> bool {
        let mut chars = value.chars();
        for slot in &self.shape {
            match *slot {
                Slot::Digits(width) => {
                    for _ in 0..width {
                        if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
                            return false;
                        }
                    }
                }
                Slot::Literal(expected) => {
                    if chars.next() != Some(expected) {
                        return false;
                    }
                }
            }
        }
        chars.next().is_none()
    }
}

fn invalid_pattern(pattern: &str) -> SearchError {
    SearchError::InvalidDatePattern {
        pattern: pattern.to_string(),
    }
}

fn push_literal(format: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
}

/// True when the pattern contains `HH`, `mm` or `ss`
pub fn has_time(pattern: &str) -> bool {
    pattern.contains("HH") || pattern.contains("mm") || pattern.contains("ss")
}

/// True when `value` parses completely under `pattern`
pub fn validate_date(value: &str, pattern: &str) -> bool {
    DatePattern::compile(pattern)
        .map(|compiled| compiled.parse(value).is_some())
        .unwrap_or(false)
}

/// Parses `value` under a single pattern
pub fn parse_date_time(value: &str, pattern: &str) -> SearchResult<NaiveDateTime> {
    DatePattern::compile(pattern)?
        .parse(value)
        .ok_or_else(|| SearchError::date_format(value))
}

/// Parses `value` under a single pattern, dropping the time-of-day
pub fn parse_date(value: &str, pattern: &str) -> SearchResult<NaiveDate> {
    parse_date_time(value, pattern).map(|dt| dt.date())
}

/// Tries every pattern in `DATE_CASCADE` and returns the first success.
pub fn coerce_date_time(value: &str) -> SearchResult<NaiveDateTime> {
    CASCADE
        .iter()
        .find_map(|pattern| pattern.parse(value))
        .ok_or_else(|| SearchError::date_format(value))
}

/// Cascading coercion to a calendar date
pub fn coerce_date(value: &str) -> SearchResult<NaiveDate> {
    coerce_date_time(value).map(|dt| dt.date())
}
