use crate::model::Item;
use crate::parse::serialize_item;

/// One whitespace-separated filter token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// `@name`: the item's context set must contain exactly `name`.
    Context(String),
    /// `+name`: the item's project set must contain exactly `name`.
    Project(String),
    /// Anything else: case-insensitive substring of the rendered line.
    Substring(String),
}

/// A parsed filter expression. Tokens AND together; an empty filter
/// matches everything. Parsing is total — there is no malformed filter
/// text, only tokens that degrade to substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    tokens: Vec<Token>,
}

impl Filter {
    pub fn parse(text: &str) -> Filter {
        let tokens = text
            .split_whitespace()
            .map(|word| match (word.strip_prefix('@'), word.strip_prefix('+')) {
                (Some(name), _) if !name.is_empty() => Token::Context(name.to_string()),
                (_, Some(name)) if !name.is_empty() => Token::Project(name.to_string()),
                _ => Token::Substring(word.to_lowercase()),
            })
            .collect();
        Filter { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.tokens.iter().all(|token| match token {
            Token::Context(name) => item.contexts().contains(&name.as_str()),
            Token::Project(name) => item.projects().contains(&name.as_str()),
            Token::Substring(needle) => serialize_item(item).to_lowercase().contains(needle),
        })
    }
}

/// Indices of the items passing `filter`, in document order.
pub fn visible_indices(items: &[Item], filter: &Filter) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_item;

    fn sample() -> Vec<Item> {
        [
            "(A) Buy milk @shopping",
            "x 2024-01-01 Write report +work",
            "Call mom @family",
            "(B) Review budget +work @home",
        ]
        .iter()
        .enumerate()
        .map(|(i, line)| parse_item(line, i + 1))
        .collect()
    }

    #[test]
    fn test_empty_filter_matches_all_in_order() {
        let items = sample();
        let filter = Filter::parse("");
        assert_eq!(visible_indices(&items, &filter), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_context_token_is_exact() {
        let items = sample();
        assert_eq!(visible_indices(&items, &Filter::parse("@shopping")), vec![0]);
        // "@shop" is not a context of any item, and no substring fallback applies
        assert!(visible_indices(&items, &Filter::parse("@shop")).is_empty());
    }

    #[test]
    fn test_project_token_is_exact() {
        let items = sample();
        assert_eq!(visible_indices(&items, &Filter::parse("+work")), vec![1, 3]);
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let items = sample();
        assert_eq!(visible_indices(&items, &Filter::parse("BUDGET")), vec![3]);
        // Matches against the full rendered line, prefixes included
        assert_eq!(visible_indices(&items, &Filter::parse("2024-01")), vec![1]);
    }

    #[test]
    fn test_tokens_and_together() {
        let items = sample();
        assert_eq!(visible_indices(&items, &Filter::parse("+work review")), vec![3]);
        assert!(visible_indices(&items, &Filter::parse("+work @shopping")).is_empty());
    }

    #[test]
    fn test_bare_sigil_degrades_to_substring() {
        let items = sample();
        // Every item containing a literal '@' matches
        assert_eq!(visible_indices(&items, &Filter::parse("@")), vec![0, 2, 3]);
    }

    #[test]
    fn test_filter_correctness_against_contexts() {
        let items = sample();
        let filter = Filter::parse("@family");
        for (index, item) in items.iter().enumerate() {
            let visible = visible_indices(&items, &filter).contains(&index);
            assert_eq!(visible, item.contexts().contains(&"family"));
        }
    }
}
