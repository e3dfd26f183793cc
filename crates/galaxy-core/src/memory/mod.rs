pub mod layout;
mod process;
mod reader;
mod region;

#[cfg(test)]
pub mod mock;

pub use process::CurrentProcess;
pub use reader::{AddressSpace, ReadFault, ReadMemory, ReadResult};
pub use region::{
    AddressSpaceBounds, MemoryRegion, Protection, RegionQuery, RegionState, RegionType,
    RegionWalk, enumerate_regions,
};

#[cfg(test)]
pub use mock::{MockAddressSpace, MockMemoryBuilder};
