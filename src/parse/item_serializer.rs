use crate::model::Item;

/// Serialize an [`Item`] back to one todo.txt line.
///
/// Emits the prefix tokens in the order the parser consumed them, each with
/// its separating space, then the text verbatim. `serialize_item(&parse_item(l, n))`
/// reproduces `l` exactly for any input line, and a priority or done change
/// touches only the prefix.
pub fn serialize_item(item: &Item) -> String {
    let mut line = String::new();

    if item.done {
        line.push_str("x ");
    }
    if let Some(priority) = item.priority {
        line.push_str(&format!("{priority} "));
    }
    if item.done
        && let Some(date) = item.completion_date
    {
        line.push_str(&format!("{} ", date.format("%Y-%m-%d")));
    }
    if let Some(date) = item.creation_date {
        line.push_str(&format!("{} ", date.format("%Y-%m-%d")));
    }
    line.push_str(&item.text);
    line
}
