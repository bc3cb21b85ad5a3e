//! Case-control matching algorithms for the study workflow
//!
//! This module implements the two pairing strategies used before tabulation:
//!
//! 1. Partitioned greedy matching: every control takes the nearest-aged case
//!    of the same sex, and each case is used at most once
//! 2. Scored greedy matching: arbitrary records are paired by a caller-supplied
//!    score in a single left-to-right pass
//!
//! Both are greedy and deterministic for a given input order.

pub mod criteria;
pub mod partitioned;
pub mod scored;
pub mod scoring;
pub mod types;

// Re-export key types
pub use criteria::{MatchingConfig, MatchingConfigBuilder};
pub use partitioned::PartitionedMatcher;
pub use scored::{InvariantViolation, ScoredMatcher};
pub use types::{ControlCasePair, PartitionedMatch, ScoredMatch, ScoredPair};
