use crate::error::{Error, Result};
use crate::memory::reader::{ReadFault, ReadMemory, ReadResult};
use crate::memory::region::{AddressSpaceBounds, MemoryRegion, RegionQuery};

/// Placeholder for targets without an in-process memory view; never opens.
pub struct CurrentProcess {
    _private: (),
}

impl CurrentProcess {
    pub fn open() -> Result<Self> {
        Err(Error::PlatformUnsupported)
    }
}

impl ReadMemory for CurrentProcess {
    fn read_into(&self, address: u64, buf: &mut [u8]) -> ReadResult<()> {
        Err(ReadFault {
            address,
            len: buf.len(),
        })
    }
}

impl RegionQuery for CurrentProcess {
    fn bounds(&self) -> AddressSpaceBounds {
        AddressSpaceBounds {
            min: 0,
            max: 0,
            page_size: 1,
        }
    }

    fn query(&self, _address: u64) -> Option<MemoryRegion> {
        None
    }
}
