//! Field-weighted substring scoring.
//!
//! Each field is checked independently against the lower-cased query and
//! the contributions are summed. A record with score 0 does not match.

use crate::corpus::Record;

/// Query is a prefix of the title
pub const TITLE_PREFIX_WEIGHT: u32 = 10;
/// Query occurs in the title, but not at the start
pub const TITLE_MATCH_WEIGHT: u32 = 5;
pub const CATEGORY_WEIGHT: u32 = 3;
pub const INSTRUCTOR_WEIGHT: u32 = 3;
pub const DESCRIPTION_WEIGHT: u32 = 1;

/// A record paired with its relevance score.
///
/// Lives only inside the engine; results leave as plain [`Record`]s.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoredRecord<'a> {
    pub record: &'a Record,
    pub score: u32,
}

/// Score a record against a query that is already trimmed and lower-cased.
pub fn score_record(record: &Record, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }

    let mut score = 0;

    let title = record.title.to_lowercase();
    if title.starts_with(needle) {
        score += TITLE_PREFIX_WEIGHT;
    } else if title.contains(needle) {
        score += TITLE_MATCH_WEIGHT;
    }

    if contains_ignore_case(&record.category, needle) {
        score += CATEGORY_WEIGHT;
    }
    if contains_ignore_case(&record.instructor, needle) {
        score += INSTRUCTOR_WEIGHT;
    }
    if contains_ignore_case(&record.description, needle) {
        score += DESCRIPTION_WEIGHT;
    }

    score
}

fn contains_ignore_case(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle)
}
