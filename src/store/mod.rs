pub mod comparisons;
pub mod match_details;

pub use comparisons::ComparisonStore;
pub use match_details::MatchDetailCache;
