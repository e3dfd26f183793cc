use memchr::memmem;

use crate::error::{Error, Result};
use crate::memory::layout::star;
use crate::memory::{MemoryRegion, ReadMemory};

/// Landmark name encoded as the byte pattern searched for in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    landmark: String,
    bytes: Vec<u8>,
}

impl SearchPattern {
    /// Encode a landmark as ASCII.
    ///
    /// The landmark must be a plausible star name: non-empty, ASCII and no
    /// longer than the name field.
    pub fn from_landmark(landmark: &str) -> Result<Self> {
        if landmark.trim().is_empty() {
            return Err(Error::invalid_landmark(landmark, "landmark is empty"));
        }
        if !landmark.is_ascii() {
            return Err(Error::invalid_landmark(
                landmark,
                "landmark must be ASCII",
            ));
        }
        if landmark.len() > usize::from(star::MAX_NAME_LENGTH) {
            return Err(Error::invalid_landmark(
                landmark,
                format!(
                    "landmark is {} bytes, names hold at most {}",
                    landmark.len(),
                    star::MAX_NAME_LENGTH
                ),
            ));
        }

        Ok(Self {
            landmark: landmark.to_string(),
            bytes: landmark.as_bytes().to_vec(),
        })
    }

    pub fn landmark(&self) -> &str {
        &self.landmark
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Linear search for the landmark inside one region.
///
/// Memory is fetched in chunks and searched with `memmem`; a chunk whose read
/// faults is re-checked one offset at a time, so an inaccessible byte only
/// costs the offsets whose comparison touches it.
pub struct PatternScanner<'a, M: ReadMemory + ?Sized> {
    memory: &'a M,
    pattern: &'a SearchPattern,
    finder: memmem::Finder<'a>,
    chunk_size: usize,
    buffer: Vec<u8>,
}

impl<'a, M: ReadMemory + ?Sized> PatternScanner<'a, M> {
    pub fn new(memory: &'a M, pattern: &'a SearchPattern, chunk_size: usize) -> Self {
        Self {
            memory,
            pattern,
            finder: memmem::Finder::new(pattern.as_bytes()),
            chunk_size: chunk_size.max(1),
            buffer: Vec::new(),
        }
    }

    /// Exclusive upper bound of candidate offsets in `region`.
    ///
    /// Leaves room for a whole entry after the last candidate; `None` when
    /// the region cannot hold one at all.
    pub fn scan_limit(region: &MemoryRegion) -> Option<u64> {
        region
            .size
            .checked_sub(star::ENTRY_SIZE)
            .map(|room| region.base + room)
    }

    /// Compare the pattern at exactly `address`; a fault is a non-match
    pub fn matches_at(&self, address: u64) -> bool {
        match self.memory.read_bytes(address, self.pattern.len()) {
            Ok(bytes) => bytes == self.pattern.as_bytes(),
            Err(_) => false,
        }
    }

    /// Next offset at or after `from` where the pattern matches
    pub fn find_next(&mut self, region: &MemoryRegion, from: u64) -> Option<u64> {
        let limit = Self::scan_limit(region)?;
        let mut start = from.max(region.base);

        while start < limit {
            let span_end = start.saturating_add(self.chunk_size as u64).min(limit);
            let span = (span_end - start) as usize;

            // Overlap by pattern length - 1 so matches straddling chunks are seen
            self.buffer.resize(span + self.pattern.len() - 1, 0);
            match self.memory.read_into(start, &mut self.buffer) {
                Ok(()) => {
                    if let Some(pos) = self.finder.find(&self.buffer) {
                        return Some(start + pos as u64);
                    }
                }
                Err(_) => {
                    if let Some(address) = (start..span_end).find(|&a| self.matches_at(a)) {
                        return Some(address);
                    }
                }
            }

            start = span_end;
        }

        None
    }
}
