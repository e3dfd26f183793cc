//! Heuristic search for the star table
//!
//! # Search Strategy
//!
//! The table has no symbol or pointer leading to it, so a known star name
//! (the landmark) is used as the anchor:
//!
//! ```text
//!  region (committed, private, read-write), highest base first
//! ┌──────────────────────────────────────────────────────────────┐
//! │ ...  │ x │ y │ z │len│ name ...       │ x │ y │ z │len│ ... │
//! │      ◄───────── 48 bytes ─────────────►                      │
//! │      ▲            ▲                                          │
//! │      │            └─ landmark bytes (pattern match)          │
//! │      └─ entry start = match - 14 (anchor)                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! 1. `PatternScanner` finds the landmark bytes
//! 2. `RecordValidator` checks the length field and re-matches the name
//! 3. `ArrayWalker` decodes 48-byte strides until 100 invalid entries in a
//!    row or the region ends
//! 4. A run of more than 1000 stars is the table; anything shorter is a
//!    coincidence and the scan resumes at the next byte

mod config;
mod pattern;
mod session;
mod validator;
mod walker;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use pattern::{PatternScanner, SearchPattern};
pub use session::{ScanOutcome, ScanResult, ScanSession, ScanStats};
pub use validator::{CandidateAnchor, RecordValidator, Rejection};
pub use walker::{ArrayWalker, WalkOutcome, WalkReport, WalkStop};
