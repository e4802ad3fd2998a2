pub mod extract;
pub mod fetch;

pub use fetch::{FetchStats, RankingSource};
