//! Regex heuristic extraction of schedule entries from raw syllabus text.
//!
//! A cascade of date patterns is tried per line, first match wins:
//! ISO (`2025-03-03`), numeric (`3/3/2025`, `03-03-25`), then month-name
//! (`March 3, 2025`, `Mar 3rd`). Matched dates must form a real calendar
//! date or the pattern is treated as not matching. Whatever text remains
//! after removing the date becomes the entry title.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use lectern_core::constants::MAX_SCHEDULE_ENTRIES;
use lectern_core::models::syllabus::{ScheduleEntry, SCHEDULE_ENTRY_LESSON};

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})(?:[/-](\d{2,4}))?\b").unwrap());

static MONTH_NAME_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:\s*,\s*(\d{4}))?\b",
    )
    .unwrap()
});

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    let number = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

fn expand_year(raw: Option<u32>, default_year: i32) -> i32 {
    match raw {
        None => default_year,
        Some(y) if y < 100 => 2000 + y as i32,
        Some(y) => y as i32,
    }
}

/// A date match within a line: the normalized date plus the matched span.
struct DateMatch {
    date: NaiveDate,
    start: usize,
    end: usize,
}

fn match_date(line: &str, default_year: i32) -> Option<DateMatch> {
    if let Some(caps) = ISO_DATE.captures(line) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let m = caps.get(0)?;
            return Some(DateMatch { date, start: m.start(), end: m.end() });
        }
    }

    if let Some(caps) = NUMERIC_DATE.captures(line) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps.get(3).and_then(|y| y.as_str().parse().ok()), default_year);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let m = caps.get(0)?;
            return Some(DateMatch { date, start: m.start(), end: m.end() });
        }
    }

    if let Some(caps) = MONTH_NAME_DATE.captures(line) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps.get(3).and_then(|y| y.as_str().parse().ok()), default_year);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let m = caps.get(0)?;
            return Some(DateMatch { date, start: m.start(), end: m.end() });
        }
    }

    None
}

/// Strip the matched date and surrounding punctuation from the line.
/// Returns `None` for header artifacts ("date" column labels).
fn title_from(line: &str, date: &DateMatch) -> Option<String> {
    let mut remaining = String::new();
    remaining.push_str(&line[..date.start]);
    remaining.push(' ');
    remaining.push_str(&line[date.end..]);

    let title = remaining
        .trim_matches(|c: char| c.is_whitespace() || "-–—:;,.()|".contains(c))
        .trim()
        .to_string();

    if title.eq_ignore_ascii_case("date") {
        return None;
    }
    if title.is_empty() {
        return Some("Class Session".to_string());
    }
    Some(title)
}

/// Normalize a loose date string (`"March 3, 2025"`, `"3/3/25"`) to a real
/// calendar date, if one can be derived.
pub fn normalize_date_string(raw: &str, default_year: i32) -> Option<NaiveDate> {
    match_date(raw, default_year).map(|m| m.date)
}

/// Extract schedule entries from raw text, one candidate per line.
///
/// De-duplicated by `(date, title)` and capped at `MAX_SCHEDULE_ENTRIES`.
pub fn extract_schedule_entries(text: &str, default_year: i32) -> Vec<ScheduleEntry> {
    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(date) = match_date(line, default_year) else {
            continue;
        };
        let Some(title) = title_from(line, &date) else {
            continue;
        };
        if !seen.insert((date.date, title.clone())) {
            continue;
        }
        entries.push(ScheduleEntry {
            date: Some(date.date),
            title,
            entry_type: SCHEDULE_ENTRY_LESSON.to_string(),
            details: None,
        });
        if entries.len() >= MAX_SCHEDULE_ENTRIES {
            break;
        }
    }

    entries
}
