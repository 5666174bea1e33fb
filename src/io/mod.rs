pub mod clock;
pub mod document;
pub mod watcher;

pub use clock::{Clock, SystemClock};
pub use document::{Document, StoreError};
pub use watcher::FileWatcher;
