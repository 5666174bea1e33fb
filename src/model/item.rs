use chrono::NaiveDate;

use crate::model::priority::Priority;

/// A single task line with its parsed fields and source tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Optional priority `(A)`-`(Z)`.
    pub priority: Option<Priority>,
    /// Completion flag (`x ` prefix).
    pub done: bool,
    /// Completion date; only carried on done items.
    pub completion_date: Option<NaiveDate>,
    /// Creation date, when the line encodes one.
    pub creation_date: Option<NaiveDate>,
    /// Free-form remainder of the line, byte-for-byte.
    pub text: String,
    /// 1-based line number in the backing file at load time.
    /// Unique per load, stable until the next reload.
    pub source_line: usize,
}

impl Item {
    /// `@context` tokens of the text: whitespace-delimited words with the
    /// prefix stripped. Empty names (a bare `@`) are excluded.
    pub fn contexts(&self) -> Vec<&str> {
        tokens_with_prefix(&self.text, '@')
    }

    /// `+project` tokens of the text.
    pub fn projects(&self) -> Vec<&str> {
        tokens_with_prefix(&self.text, '+')
    }
}

fn tokens_with_prefix(text: &str, prefix: char) -> Vec<&str> {
    text.split_whitespace()
        .filter_map(|word| word.strip_prefix(prefix))
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_text(text: &str) -> Item {
        Item {
            priority: None,
            done: false,
            completion_date: None,
            creation_date: None,
            text: text.to_string(),
            source_line: 1,
        }
    }

    #[test]
    fn test_contexts_and_projects() {
        let item = item_with_text("Buy milk @shopping +errands @home");
        assert_eq!(item.contexts(), vec!["shopping", "home"]);
        assert_eq!(item.projects(), vec!["errands"]);
    }

    #[test]
    fn test_bare_sigils_are_not_tokens() {
        let item = item_with_text("odd @ line + markers");
        assert!(item.contexts().is_empty());
        assert!(item.projects().is_empty());
    }

    #[test]
    fn test_mid_word_sigils_are_not_tokens() {
        let item = item_with_text("mail bob@example.com about a+b");
        assert!(item.contexts().is_empty());
        assert!(item.projects().is_empty());
    }
}
