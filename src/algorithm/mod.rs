//! Algorithm implementations for the study workflow
//!
//! Matching pairs controls with cases, statistics summarize the matching
//! quality, and tabulation turns subjects into output tables.

pub mod matching;
pub mod statistics;
pub mod tabulation;
