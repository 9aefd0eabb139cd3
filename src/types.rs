//! Core types for taskboard.

use serde::{Deserialize, Serialize};

/// A tracked task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    /// Creation time, epoch milliseconds (UTC).
    pub start_dt: i64,
    /// Completion time, epoch milliseconds; present iff the task is
    /// currently marked done.
    pub end_dt: Option<i64>,
    pub done: bool,
    pub archived: bool,
}

/// Listing filter modes. Mutually exclusive; `Active` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// All non-archived tasks (open + done).
    #[default]
    Active,
    /// Non-archived and not done.
    Open,
    /// Non-archived and done.
    Done,
    /// Archived tasks only.
    Archive,
}

impl TaskFilter {
    /// Parse the `f` query parameter. Unknown values fall back to `Active`.
    pub fn parse(s: &str) -> Self {
        match s {
            "open" => TaskFilter::Open,
            "done" => TaskFilter::Done,
            "archive" => TaskFilter::Archive,
            _ => TaskFilter::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::Active => "active",
            TaskFilter::Open => "open",
            TaskFilter::Done => "done",
            TaskFilter::Archive => "archive",
        }
    }
}

/// Title-case a task title: an alphabetic character is uppercased when the
/// preceding character is not alphabetic, lowercased otherwise.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Normalize a submitted title: trim, then title-case. Returns `None` for
/// blank input, which the creation path drops silently.
pub fn normalize_title(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(title_case(trimmed))
    }
}
