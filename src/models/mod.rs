//! Domain models for study subjects
//!
//! The subject record and the closed enumerations its clinical fields use.

pub mod subject;
pub mod types;

// Re-export commonly used types
pub use subject::Subject;
pub use types::{Flag, NaRelInt, NaStatus, RelInt, RelKind, Sex};
