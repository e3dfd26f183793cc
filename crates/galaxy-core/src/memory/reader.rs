use thiserror::Error;

use super::region::RegionQuery;

/// A read touched memory that is not (or no longer) accessible.
///
/// Deliberately not convertible into [`crate::Error`]: callers decide what a
/// fault means at their own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Read fault at 0x{address:X} ({len} bytes)")]
pub struct ReadFault {
    pub address: u64,
    pub len: usize,
}

pub type ReadResult<T> = std::result::Result<T, ReadFault>;

/// Bounds-checked reads from an address space
pub trait ReadMemory {
    /// Fill `buf` with the bytes at `address`, or fault without partial data
    fn read_into(&self, address: u64, buf: &mut [u8]) -> ReadResult<()>;

    fn read_bytes(&self, address: u64, size: usize) -> ReadResult<Vec<u8>> {
        let mut buf = vec![0u8; size];
        self.read_into(address, &mut buf)?;
        Ok(buf)
    }

    fn read_u16(&self, address: u64) -> ReadResult<u16> {
        let mut buf = [0u8; 2];
        self.read_into(address, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_f32(&self, address: u64) -> ReadResult<f32> {
        let mut buf = [0u8; 4];
        self.read_into(address, &mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }
}

/// Readable memory that can also describe its own layout
pub trait AddressSpace: ReadMemory + RegionQuery {}

impl<T: ReadMemory + RegionQuery + ?Sized> AddressSpace for T {}

