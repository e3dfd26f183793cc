//! In-memory address space for tests

use std::collections::BTreeSet;

use super::reader::{ReadFault, ReadMemory, ReadResult};
use super::region::{
    AddressSpaceBounds, MemoryRegion, Protection, RegionQuery, RegionState, RegionType,
};

const MOCK_PAGE_SIZE: u64 = 0x1000;

struct MockRegion {
    info: MemoryRegion,
    data: Vec<u8>,
}

/// Synthetic address space: a set of regions with backing bytes and
/// optional per-byte faults.
pub struct MockAddressSpace {
    regions: Vec<MockRegion>,
    faults: BTreeSet<u64>,
    bounds: AddressSpaceBounds,
    silent_gaps: bool,
}

impl MockAddressSpace {
    fn region_at(&self, address: u64) -> Option<&MockRegion> {
        self.regions.iter().find(|r| r.info.contains(address))
    }
}

impl ReadMemory for MockAddressSpace {
    fn read_into(&self, address: u64, buf: &mut [u8]) -> ReadResult<()> {
        let fault = ReadFault {
            address,
            len: buf.len(),
        };
        if buf.is_empty() {
            return Ok(());
        }
        let end = address.checked_add(buf.len() as u64).ok_or(fault)?;
        if self.faults.range(address..end).next().is_some() {
            return Err(fault);
        }

        let region = self.region_at(address).ok_or(fault)?;
        if end > region.info.end() {
            return Err(fault);
        }
        let start = (address - region.info.base) as usize;
        buf.copy_from_slice(&region.data[start..start + buf.len()]);
        Ok(())
    }
}

impl RegionQuery for MockAddressSpace {
    fn bounds(&self) -> AddressSpaceBounds {
        self.bounds
    }

    fn query(&self, address: u64) -> Option<MemoryRegion> {
        if let Some(region) = self.region_at(address) {
            return Some(region.info);
        }
        if self.silent_gaps {
            return None;
        }

        // Describe the unallocated gap up to the next region
        let next = self
            .regions
            .iter()
            .map(|r| r.info.base)
            .filter(|&base| base > address)
            .min()?;
        Some(MemoryRegion {
            base: address,
            size: next - address,
            protection: Protection::NoAccess,
            state: RegionState::Free,
            kind: RegionType::None,
        })
    }
}

/// Builder for [`MockAddressSpace`]
#[derive(Default)]
pub struct MockMemoryBuilder {
    regions: Vec<MockRegion>,
    faults: BTreeSet<u64>,
    silent_gaps: bool,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a committed, private, read-write region
    pub fn region(self, base: u64, data: Vec<u8>) -> Self {
        self.region_with(base, data, |_| {})
    }

    /// Add a region and adjust its metadata
    pub fn region_with<F>(mut self, base: u64, data: Vec<u8>, configure: F) -> Self
    where
        F: FnOnce(&mut MemoryRegion),
    {
        let mut info = MemoryRegion {
            base,
            size: data.len() as u64,
            protection: Protection::ReadWrite,
            state: RegionState::Committed,
            kind: RegionType::Private,
        };
        configure(&mut info);
        self.regions.push(MockRegion { info, data });
        self
    }

    /// Make every read touching `address` fault
    pub fn fault_at(mut self, address: u64) -> Self {
        self.faults.insert(address);
        self
    }

    /// Make queries between regions fail instead of describing the gap
    pub fn silent_gaps(mut self) -> Self {
        self.silent_gaps = true;
        self
    }

    pub fn build(self) -> MockAddressSpace {
        let min = self
            .regions
            .iter()
            .map(|r| r.info.base)
            .min()
            .unwrap_or(0)
            .saturating_sub(MOCK_PAGE_SIZE);
        let max = self
            .regions
            .iter()
            .map(|r| r.info.end())
            .max()
            .unwrap_or(0);

        MockAddressSpace {
            regions: self.regions,
            faults: self.faults,
            bounds: AddressSpaceBounds {
                min,
                max,
                page_size: MOCK_PAGE_SIZE,
            },
            silent_gaps: self.silent_gaps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_reads_and_faults() {
        let memory = MockMemoryBuilder::new()
            .region(0x1000, (0u8..=255).collect())
            .fault_at(0x1010)
            .build();

        assert_eq!(memory.read_bytes(0x1000, 4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(memory.read_u16(0x1002).unwrap(), u16::from_le_bytes([2, 3]));
        assert!(memory.read_bytes(0x100E, 4).is_err());
        assert!(memory.read_bytes(0x10FE, 4).is_err());
        assert!(memory.read_bytes(0x5000, 1).is_err());
    }

    #[test]
    fn test_mock_query_describes_gaps() {
        let memory = MockMemoryBuilder::new()
            .region(0x1000, vec![0; 0x100])
            .region(0x4000, vec![0; 0x100])
            .build();

        let gap = memory.query(0x2000).unwrap();
        assert_eq!(gap.state, RegionState::Free);
        assert_eq!(gap.end(), 0x4000);
        assert!(memory.query(0x9000).is_none());
    }
}
