pub mod browse;
pub mod curated;
pub mod merge;

pub use merge::{dedupe, merge};
