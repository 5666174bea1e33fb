use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::io::clock::Clock;
use crate::model::{InvalidPriority, Item, Priority};
use crate::parse::{parse_item, serialize_item};

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    InvalidPriority(#[from] InvalidPriority),
}

/// The ordered collection of items backed by one todo.txt file.
///
/// Item order always equals file line order as of the last load. Mutations
/// rewrite exactly one line; everything else round-trips byte-for-byte,
/// including the presence or absence of a trailing newline. The raw lines
/// are kept alongside the parsed items so untouched lines are emitted from
/// their original bytes, never re-serialized.
#[derive(Debug)]
pub struct Document {
    pub path: PathBuf,
    pub items: Vec<Item>,
    raw_lines: Vec<String>,
    trailing_newline: bool,
}

impl Document {
    /// Load a todo.txt file. An empty file yields an empty document; an
    /// unreadable path is the one fatal error of the session.
    pub fn load(path: &Path) -> Result<Document, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Split on '\n' rather than lines() so that any '\r' bytes stay in
        // the line and survive the round trip.
        let mut raw_lines: Vec<String> = content.split('\n').map(|l| l.to_string()).collect();
        let trailing_newline = content.ends_with('\n');
        if trailing_newline || content.is_empty() {
            raw_lines.pop();
        }

        let items = raw_lines
            .iter()
            .enumerate()
            .map(|(index, line)| parse_item(line, index + 1))
            .collect();

        Ok(Document {
            path: path.to_path_buf(),
            items,
            raw_lines,
            trailing_newline,
        })
    }

    /// Re-read the backing file, replacing all items wholesale. The file may
    /// have grown or shrunk arbitrarily since the last load.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        *self = Document::load(&self.path)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Set or unset the priority of the item at `index` (document order) and
    /// persist the change. Writes nothing when the priority already matches.
    pub fn set_priority(
        &mut self,
        index: usize,
        priority: Option<Priority>,
    ) -> Result<(), StoreError> {
        let item = &self.items[index];
        if item.priority == priority {
            return Ok(());
        }
        let updated = Item {
            priority,
            ..item.clone()
        };
        self.commit(index, updated)
    }

    /// Set or clear the done flag of the item at `index` and persist it.
    /// Marking done stamps `clock.today()` as the completion date; an item
    /// that is already done keeps its original stamp. Clearing done removes
    /// the completion date. The creation date is never touched.
    pub fn set_done(
        &mut self,
        index: usize,
        done: bool,
        clock: &dyn Clock,
    ) -> Result<(), StoreError> {
        let item = &self.items[index];
        if item.done == done {
            return Ok(());
        }
        let updated = Item {
            done,
            completion_date: if done { Some(clock.today()) } else { None },
            ..item.clone()
        };
        self.commit(index, updated)
    }

    /// Serialize `updated`, splice it into the line buffer, and write the
    /// file atomically. Memory is only updated after the write succeeds, so
    /// a failed write leaves the in-memory state at the prior value.
    fn commit(&mut self, index: usize, updated: Item) -> Result<(), StoreError> {
        let line_idx = updated.source_line - 1;
        let mut new_lines = self.raw_lines.clone();
        new_lines[line_idx] = serialize_item(&updated);

        self.write_back(&new_lines)?;

        self.raw_lines = new_lines;
        self.items[index] = updated;
        Ok(())
    }

    fn write_back(&self, lines: &[String]) -> Result<(), StoreError> {
        let mut content = lines.join("\n");
        if self.trailing_newline {
            content.push('\n');
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Write via a temp file in the same directory plus rename, so no reader
/// ever observes a half-written file.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::clock::FixedClock;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SAMPLE: &str = "(A) Buy milk @shopping\nx 2024-01-01 Write report +work\nCall mom @family\n";

    fn write_sample(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("todo.txt");
        fs::write(&path, content).unwrap();
        path
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Document::load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_load_empty_file_is_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "");
        let doc = Document::load(&path).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_load_assigns_source_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.len(), 3);
        let lines: Vec<usize> = doc.items.iter().map(|i| i.source_line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_set_priority_rewrites_only_that_line() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let mut doc = Document::load(&path).unwrap();

        doc.set_priority(2, Some(Priority::new('B').unwrap())).unwrap();

        let expected = SAMPLE.replace("Call mom @family", "(B) Call mom @family");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        assert_eq!(doc.items[2].priority, Some(Priority::new('B').unwrap()));
    }

    #[test]
    fn test_set_priority_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let mut doc = Document::load(&path).unwrap();

        doc.set_priority(0, Some(Priority::new('C').unwrap())).unwrap();
        let after_first = fs::read_to_string(&path).unwrap();
        let item_after_first = doc.items[0].clone();

        doc.set_priority(0, Some(Priority::new('C').unwrap())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
        assert_eq!(doc.items[0], item_after_first);
    }

    #[test]
    fn test_unset_priority() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let mut doc = Document::load(&path).unwrap();

        doc.set_priority(0, None).unwrap();

        let expected = SAMPLE.replace("(A) Buy milk @shopping", "Buy milk @shopping");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_set_done_stamps_completion_date() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let mut doc = Document::load(&path).unwrap();

        doc.set_done(2, true, &fixed_clock()).unwrap();

        let expected = SAMPLE.replace("Call mom @family", "x 2024-06-15 Call mom @family");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        assert!(doc.items[2].done);
    }

    #[test]
    fn test_set_done_preserves_priority_and_creation_date() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "(B) 2024-01-05 Plan trip @home\n");
        let mut doc = Document::load(&path).unwrap();

        doc.set_done(0, true, &fixed_clock()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "x (B) 2024-06-15 2024-01-05 Plan trip @home\n"
        );
    }

    #[test]
    fn test_set_done_on_done_item_keeps_stamp() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let mut doc = Document::load(&path).unwrap();

        doc.set_done(1, true, &fixed_clock()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
        assert_eq!(
            doc.items[1].completion_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_clear_done_removes_completion_date() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "x 2024-01-02 2023-12-30 Ship it\n");
        let mut doc = Document::load(&path).unwrap();

        doc.set_done(0, false, &fixed_clock()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2023-12-30 Ship it\n");
        assert_eq!(doc.items[0].completion_date, None);
    }

    #[test]
    fn test_reload_tolerates_shrinking_file() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, SAMPLE);
        let mut doc = Document::load(&path).unwrap();
        assert_eq!(doc.len(), 3);

        fs::write(&path, "Call mom @family\n").unwrap();
        doc.reload().unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.items[0].text, "Call mom @family");
        assert_eq!(doc.items[0].source_line, 1);
    }

    #[test]
    fn test_missing_trailing_newline_preserved() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "(A) first\nsecond");
        let mut doc = Document::load(&path).unwrap();

        doc.set_priority(0, None).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond");
    }

    #[test]
    fn test_blank_lines_become_empty_items() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir, "first\n\nthird\n");
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.items[1].text, "");
        assert_eq!(doc.items[2].source_line, 3);
    }
}
