use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::memory::layout::star;
use crate::memory::{MemoryRegion, ReadMemory};
use crate::star::{StarRecord, decode_name, is_valid_name_length};

/// Why an array walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum WalkStop {
    #[strum(serialize = "region end")]
    RegionEnd,
    #[strum(serialize = "consecutive failure limit")]
    FailureLimit,
}

/// Counters from one array walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkReport {
    /// Valid entries decoded
    pub decoded: usize,
    /// Strides visited, valid or not
    pub strides: usize,
    pub stop: WalkStop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Accepted {
        stars: Vec<StarRecord>,
        report: WalkReport,
    },
    /// Too few entries to be the real table
    Rejected { report: WalkReport },
}

impl WalkOutcome {
    pub fn report(&self) -> &WalkReport {
        match self {
            WalkOutcome::Accepted { report, .. } | WalkOutcome::Rejected { report } => report,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, WalkOutcome::Accepted { .. })
    }
}

/// Expands a confirmed anchor into the full star table
pub struct ArrayWalker<'a, M: ReadMemory + ?Sized> {
    memory: &'a M,
    min_records: usize,
    max_consecutive_failures: usize,
}

impl<'a, M: ReadMemory + ?Sized> ArrayWalker<'a, M> {
    pub fn new(memory: &'a M, min_records: usize, max_consecutive_failures: usize) -> Self {
        Self {
            memory,
            min_records,
            max_consecutive_failures: max_consecutive_failures.max(1),
        }
    }

    /// Decode one entry; any fault or implausible field makes it invalid
    pub fn decode_entry(&self, address: u64) -> Option<StarRecord> {
        let mut header = [0u8; star::HEADER_SIZE];
        self.memory.read_into(address, &mut header).ok()?;

        let field = |offset: u64| {
            let at = offset as usize;
            f32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        let name_length = u16::from_le_bytes([
            header[star::NAME_LENGTH as usize],
            header[star::NAME_LENGTH as usize + 1],
        ]);
        if !is_valid_name_length(name_length) {
            return None;
        }

        let name_bytes = self
            .memory
            .read_bytes(address + star::NAME, usize::from(name_length))
            .ok()?;
        let name = decode_name(&name_bytes)?;

        Some(StarRecord::from_raw(
            field(star::X),
            field(star::Y),
            field(star::Z),
            name,
        ))
    }

    /// Walk fixed strides from `start` until the region ends or too many
    /// invalid entries follow each other.
    pub fn walk(&self, region: &MemoryRegion, start: u64) -> WalkOutcome {
        let limit = region.end().saturating_sub(star::ENTRY_SIZE);
        let mut stars = Vec::new();
        let mut strides = 0usize;
        let mut consecutive_failures = 0usize;
        let mut address = start;
        let mut stop = WalkStop::RegionEnd;

        while address < limit {
            if consecutive_failures >= self.max_consecutive_failures {
                debug!(
                    "Stopped parsing at 0x{:X} after {} consecutive failures",
                    address, consecutive_failures
                );
                stop = WalkStop::FailureLimit;
                break;
            }

            match self.decode_entry(address) {
                Some(star) => {
                    stars.push(star);
                    consecutive_failures = 0;
                }
                None => consecutive_failures += 1,
            }

            strides += 1;
            address += star::ENTRY_SIZE;
        }

        // The last stride may have been the one that hit the limit
        if stop == WalkStop::RegionEnd && consecutive_failures >= self.max_consecutive_failures {
            stop = WalkStop::FailureLimit;
        }

        let report = WalkReport {
            decoded: stars.len(),
            strides,
            stop,
        };

        if stars.len() > self.min_records {
            WalkOutcome::Accepted { stars, report }
        } else {
            WalkOutcome::Rejected { report }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MockAddressSpace, MockMemoryBuilder, RegionQuery};
    use crate::scan::fixtures::{GalaxyBuilder, encode_star};

    const BASE: u64 = 0x10_0000;

    fn memory_for(bytes: Vec<u8>) -> (MockAddressSpace, MemoryRegion) {
        let memory = MockMemoryBuilder::new().region(BASE, bytes).build();
        let region = memory.query(BASE).unwrap();
        (memory, region)
    }

    #[test]
    fn test_decode_entry_truncates_coordinates() {
        let mut bytes = encode_star(1234.75, -56.5, 0.99, "Procyon").to_vec();
        bytes.resize(0x100, 0);
        let (memory, _) = memory_for(bytes);

        let walker = ArrayWalker::new(&memory, 1000, 100);
        let star = walker.decode_entry(BASE).unwrap();
        assert_eq!(star, StarRecord {
            x: 1234,
            y: -56,
            z: 0,
            name: "Procyon".to_string(),
        });
    }

    #[test]
    fn test_decode_entry_rejects_bad_length_and_blank_name() {
        let mut bytes = Vec::new();
        let mut short = encode_star(0.0, 0.0, 0.0, "Ab");
        short[12..14].copy_from_slice(&1u16.to_le_bytes());
        let mut long = encode_star(0.0, 0.0, 0.0, "Ab");
        long[12..14].copy_from_slice(&41u16.to_le_bytes());
        bytes.extend_from_slice(&short);
        bytes.extend_from_slice(&long);
        bytes.extend_from_slice(&encode_star(0.0, 0.0, 0.0, "    "));
        bytes.extend_from_slice(&encode_star(0.0, 0.0, 0.0, "Ok"));
        bytes.resize(0x200, 0);
        let (memory, _) = memory_for(bytes);

        let walker = ArrayWalker::new(&memory, 1000, 100);
        assert!(walker.decode_entry(BASE).is_none());
        assert!(walker.decode_entry(BASE + 48).is_none());
        assert!(walker.decode_entry(BASE + 96).is_none());
        assert!(walker.decode_entry(BASE + 144).is_some());
    }

    #[test]
    fn test_exactly_min_records_is_rejected() {
        let bytes = GalaxyBuilder::new("Anchor").stars(1000).invalid(1).build();
        let (memory, region) = memory_for(bytes);

        let outcome = ArrayWalker::new(&memory, 1000, 100).walk(&region, BASE);
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.report().decoded, 1000);
    }

    #[test]
    fn test_one_more_than_min_records_is_accepted() {
        let bytes = GalaxyBuilder::new("Anchor").stars(1001).invalid(1).build();
        let (memory, region) = memory_for(bytes);

        match ArrayWalker::new(&memory, 1000, 100).walk(&region, BASE) {
            WalkOutcome::Accepted { stars, report } => {
                assert_eq!(stars.len(), 1001);
                assert_eq!(report.decoded, 1001);
                assert_eq!(stars[0].name, "Anchor");
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_interleaved_failures_do_not_stop_walk() {
        let bytes = GalaxyBuilder::new("Anchor")
            .stars(1001)
            .invalid(99)
            .stars(1)
            .invalid(99)
            .stars(5)
            .build();
        let (memory, region) = memory_for(bytes);

        let outcome = ArrayWalker::new(&memory, 1000, 100).walk(&region, BASE);
        assert!(outcome.is_accepted());
        assert_eq!(outcome.report().decoded, 1007);
        assert_eq!(outcome.report().stop, WalkStop::RegionEnd);
    }

    #[test]
    fn test_hundred_consecutive_failures_stop_walk() {
        let bytes = GalaxyBuilder::new("Anchor")
            .stars(1001)
            .invalid(100)
            .stars(5)
            .build();
        let (memory, region) = memory_for(bytes);

        let outcome = ArrayWalker::new(&memory, 1000, 100).walk(&region, BASE);
        let report = outcome.report();
        assert_eq!(report.stop, WalkStop::FailureLimit);
        assert_eq!(report.decoded, 1001);
        assert_eq!(report.strides, 1101);
    }

    #[test]
    fn test_faulting_stride_counts_as_failure() {
        let bytes = GalaxyBuilder::new("Anchor").stars(1003).build();
        let memory = MockMemoryBuilder::new()
            .region(BASE, bytes)
            .fault_at(BASE + 48 * 5 + 2)
            .build();
        let region = memory.query(BASE).unwrap();

        let outcome = ArrayWalker::new(&memory, 1000, 100).walk(&region, BASE);
        assert!(outcome.is_accepted());
        assert_eq!(outcome.report().decoded, 1002);
    }

    #[test]
    fn test_walk_never_reads_past_limit() {
        // Region ends exactly after the last entry: that entry sits at the
        // limit and is not decoded.
        let mut bytes = Vec::new();
        for i in 0..4 {
            bytes.extend_from_slice(&encode_star(i as f32, 0.0, 0.0, "Star"));
        }
        let (memory, region) = memory_for(bytes);

        let outcome = ArrayWalker::new(&memory, 0, 100).walk(&region, BASE);
        assert_eq!(outcome.report().strides, 3);
        assert_eq!(outcome.report().decoded, 3);
    }
}
