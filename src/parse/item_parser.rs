use chrono::NaiveDate;

use crate::model::{Item, Priority};

/// Parse one todo.txt line into an [`Item`].
///
/// Prefix tokens are consumed left to right, each only together with the
/// single space that follows it: `x `, `(A) `, then one date (completion
/// for done items, creation otherwise) and, on done items, a second date
/// (creation). Whatever remains is kept verbatim as `text`, so malformed
/// lines degrade to an Item with the whole remainder as text instead of
/// failing. The serializer re-emits the consumed tokens in the same order,
/// which is what makes the round-trip exact.
pub fn parse_item(line: &str, line_number: usize) -> Item {
    let mut rest = line;

    let done = match rest.strip_prefix("x ") {
        Some(after) => {
            rest = after;
            true
        }
        None => false,
    };

    let priority = match take_priority(rest) {
        Some((p, after)) => {
            rest = after;
            Some(p)
        }
        None => None,
    };

    let mut completion_date = None;
    let mut creation_date = None;
    if done {
        if let Some((date, after)) = take_date(rest) {
            completion_date = Some(date);
            rest = after;
            if let Some((date, after)) = take_date(rest) {
                creation_date = Some(date);
                rest = after;
            }
        }
    } else if let Some((date, after)) = take_date(rest) {
        creation_date = Some(date);
        rest = after;
    }

    Item {
        priority,
        done,
        completion_date,
        creation_date,
        text: rest.to_string(),
        source_line: line_number,
    }
}

/// Match a `(X) ` prefix with `X` in `A`-`Z`.
fn take_priority(s: &str) -> Option<(Priority, &str)> {
    let mut chars = s.chars();
    if chars.next() != Some('(') {
        return None;
    }
    let letter = chars.next()?;
    let priority = Priority::new(letter).ok()?;
    let rest = s.strip_prefix(&format!("({letter}) "))?;
    Some((priority, rest))
}

/// Match a `YYYY-MM-DD ` prefix. The date must be calendar-valid and must
/// be followed by a space; a date at end of line stays in the text.
fn take_date(s: &str) -> Option<(NaiveDate, &str)> {
    let (candidate, rest) = (s.get(..10)?, s.get(10..)?);
    let rest = rest.strip_prefix(' ')?;
    let date = NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()?;
    Some((date, rest))
}
