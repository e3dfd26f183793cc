use strum::IntoStaticStr;

use crate::memory::layout::star;
use crate::memory::{MemoryRegion, ReadMemory};
use crate::star::is_valid_name_length;

use super::pattern::SearchPattern;

/// A pattern match confirmed to sit in the name field of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateAnchor {
    /// Address where the landmark bytes were found
    pub pattern_address: u64,
    /// Back-computed start of the entry
    pub start: u64,
}

/// Why a pattern match was not accepted as an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Rejection {
    /// The entry would start before the region's base address
    BeforeRegion,
    /// Name-length field outside [2, 40]
    NameLength(u16),
    /// Name bytes at the back-computed start differ from the landmark
    NameMismatch,
    /// Part of the entry could not be read
    Fault,
}

/// Confirms that a landmark match is the name field of a plausible entry
pub struct RecordValidator<'a, M: ReadMemory + ?Sized> {
    memory: &'a M,
    pattern: &'a SearchPattern,
}

impl<'a, M: ReadMemory + ?Sized> RecordValidator<'a, M> {
    pub fn new(memory: &'a M, pattern: &'a SearchPattern) -> Self {
        Self { memory, pattern }
    }

    pub fn validate(
        &self,
        region: &MemoryRegion,
        pattern_address: u64,
    ) -> Result<CandidateAnchor, Rejection> {
        let start = pattern_address
            .checked_sub(star::NAME)
            .filter(|&start| start >= region.base)
            .ok_or(Rejection::BeforeRegion)?;

        let name_length = self
            .memory
            .read_u16(start + star::NAME_LENGTH)
            .map_err(|_| Rejection::Fault)?;
        if !is_valid_name_length(name_length) {
            return Err(Rejection::NameLength(name_length));
        }

        // Re-read through the back-computed start; overlapping coincidental
        // bytes can make the scanner's hit and this view disagree.
        let name = self
            .memory
            .read_bytes(start + star::NAME, self.pattern.len())
            .map_err(|_| Rejection::Fault)?;
        if name != self.pattern.as_bytes() {
            return Err(Rejection::NameMismatch);
        }

        Ok(CandidateAnchor {
            pattern_address,
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MockMemoryBuilder, RegionQuery};
    use crate::scan::fixtures::encode_star;

    fn pattern() -> SearchPattern {
        SearchPattern::from_landmark("Sirius").unwrap()
    }

    #[test]
    fn test_accepts_well_formed_entry() {
        let mut data = vec![0u8; 0x100];
        data[0x30..0x60].copy_from_slice(&encode_star(1.0, 2.0, 3.0, "Sirius"));
        let memory = MockMemoryBuilder::new().region(0x1000, data).build();
        let region = memory.query(0x1000).unwrap();
        let pattern = pattern();

        let anchor = RecordValidator::new(&memory, &pattern)
            .validate(&region, 0x1030 + star::NAME)
            .unwrap();
        assert_eq!(anchor.start, 0x1030);
        assert_eq!(anchor.pattern_address, 0x103E);
    }

    #[test]
    fn test_rejects_start_before_region_regardless_of_contents() {
        // Name sits 10 bytes into the region, so its entry would start 4
        // bytes before the base even though the bytes look right.
        let mut data = vec![0u8; 0x100];
        data[8..10].copy_from_slice(&6u16.to_le_bytes());
        data[10..16].copy_from_slice(b"Sirius");
        let memory = MockMemoryBuilder::new()
            .region(0x1000, data)
            .region(0x0F00, vec![0u8; 0x100])
            .build();
        let region = memory.query(0x1000).unwrap();
        let pattern = pattern();
        let validator = RecordValidator::new(&memory, &pattern);

        for offset in 0..star::NAME {
            assert_eq!(
                validator.validate(&region, 0x1000 + offset),
                Err(Rejection::BeforeRegion)
            );
        }
        assert_eq!(validator.validate(&region, 5), Err(Rejection::BeforeRegion));
    }

    #[test]
    fn test_rejects_out_of_range_name_length() {
        let pattern = pattern();
        for bad_length in [0u16, 1, 41, 0x100, u16::MAX] {
            let mut entry = encode_star(0.0, 0.0, 0.0, "Sirius");
            entry[12..14].copy_from_slice(&bad_length.to_le_bytes());
            let mut data = vec![0u8; 0x100];
            data[..48].copy_from_slice(&entry);
            let memory = MockMemoryBuilder::new().region(0x1000, data).build();
            let region = memory.query(0x1000).unwrap();

            assert_eq!(
                RecordValidator::new(&memory, &pattern).validate(&region, 0x100E),
                Err(Rejection::NameLength(bad_length))
            );
        }
    }

    #[test]
    fn test_rejects_name_mismatch() {
        let mut data = vec![0u8; 0x100];
        data[..48].copy_from_slice(&encode_star(0.0, 0.0, 0.0, "Sirens"));
        let memory = MockMemoryBuilder::new().region(0x1000, data).build();
        let region = memory.query(0x1000).unwrap();
        let pattern = pattern();

        assert_eq!(
            RecordValidator::new(&memory, &pattern).validate(&region, 0x100E),
            Err(Rejection::NameMismatch)
        );
    }

    #[test]
    fn test_fault_is_rejection() {
        let mut data = vec![0u8; 0x100];
        data[..48].copy_from_slice(&encode_star(0.0, 0.0, 0.0, "Sirius"));
        let memory = MockMemoryBuilder::new()
            .region(0x1000, data)
            .fault_at(0x100C)
            .build();
        let region = memory.query(0x1000).unwrap();
        let pattern = pattern();

        assert_eq!(
            RecordValidator::new(&memory, &pattern).validate(&region, 0x100E),
            Err(Rejection::Fault)
        );
    }
}
