//! Common utilities shared across the scanner modules.

mod search;

pub use search::{find_first, find_first_index};
