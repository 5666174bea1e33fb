pub mod filter;

pub use filter::{Filter, visible_indices};
