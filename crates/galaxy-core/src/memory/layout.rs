//! Memory layout constants for the star table
//!
//! The table is a flat array of fixed-size entries. Coordinates are stored as
//! `f32` even though they only ever hold whole numbers.

/// Memory layout constants for one star entry
pub mod star {
    /// Size of one entry (stride between consecutive stars)
    pub const ENTRY_SIZE: u64 = 48;

    pub const X: u64 = 0;
    pub const Y: u64 = 4;
    pub const Z: u64 = 8;

    /// u16 byte count of the name
    pub const NAME_LENGTH: u64 = 12;
    /// First byte of the name text
    pub const NAME: u64 = 14;

    /// Size of the coordinate block plus the length field
    pub const HEADER_SIZE: usize = NAME as usize;

    pub const MIN_NAME_LENGTH: u16 = 2;
    pub const MAX_NAME_LENGTH: u16 = 40;
}

/// Thresholds that separate the real star table from coincidental matches
pub mod thresholds {
    /// A decoded run must hold more than this many stars to be accepted
    pub const MIN_STAR_COUNT: usize = 1000;

    /// Stop walking after this many invalid entries in a row
    pub const MAX_CONSECUTIVE_FAILURES: usize = 100;

    /// Allocation budget requested for the no-relocation window (2MB)
    pub const NO_RELOCATION_BUDGET: usize = 2 * 1024 * 1024;

    /// Log progress every N regions
    pub const REGION_PROGRESS_INTERVAL: usize = 100;

    /// Bytes fetched per read while scanning a region for the landmark (64KB)
    pub const SCAN_CHUNK_SIZE: usize = 64 * 1024;
}
