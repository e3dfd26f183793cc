use std::ffi::c_void;
use std::fs;

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::reader::{ReadFault, ReadMemory, ReadResult};
use crate::memory::region::{
    AddressSpaceBounds, MemoryRegion, Protection, RegionQuery, RegionState, RegionType,
};

const MAPS_PATH: &str = "/proc/self/maps";

#[cfg(target_pointer_width = "64")]
const USER_SPACE_END: u64 = 0x0000_8000_0000_0000;
#[cfg(not(target_pointer_width = "64"))]
const USER_SPACE_END: u64 = 0xC000_0000;

/// The current process, read through `process_vm_readv` on its own pid.
///
/// Region metadata comes from a `/proc/self/maps` snapshot taken when the
/// view is opened.
pub struct CurrentProcess {
    pid: libc::pid_t,
    mappings: Vec<MemoryRegion>,
    bounds: AddressSpaceBounds,
}

impl CurrentProcess {
    pub fn open() -> Result<Self> {
        let maps = fs::read_to_string(MAPS_PATH)
            .map_err(|e| Error::ProcessOpenFailed(format!("{}: {}", MAPS_PATH, e)))?;
        let mut mappings: Vec<MemoryRegion> = maps.lines().filter_map(parse_maps_line).collect();
        mappings.sort_unstable_by_key(|m| m.base);

        // SAFETY: sysconf and getpid have no preconditions
        let (page_size, pid) = unsafe { (libc::sysconf(libc::_SC_PAGESIZE), libc::getpid()) };
        let page_size = u64::try_from(page_size).unwrap_or(0x1000).max(1);

        let bounds = AddressSpaceBounds {
            min: page_size,
            max: USER_SPACE_END,
            page_size,
        };
        debug!(
            "Loaded {} mappings from {}, page size 0x{:X}",
            mappings.len(),
            MAPS_PATH,
            page_size
        );

        Ok(Self {
            pid,
            mappings,
            bounds,
        })
    }
}

impl ReadMemory for CurrentProcess {
    fn read_into(&self, address: u64, buf: &mut [u8]) -> ReadResult<()> {
        let fault = ReadFault {
            address,
            len: buf.len(),
        };
        if buf.is_empty() {
            return Ok(());
        }

        let local = libc::iovec {
            iov_base: buf.as_mut_ptr() as *mut c_void,
            iov_len: buf.len(),
        };
        let remote = libc::iovec {
            iov_base: address as usize as *mut c_void,
            iov_len: buf.len(),
        };

        // SAFETY: the kernel checks the remote range and returns EFAULT for
        // unmapped pages; the local iovec covers exactly `buf`.
        let copied = unsafe { libc::process_vm_readv(self.pid, &local, 1, &remote, 1, 0) };

        if copied >= 0 && copied as usize == buf.len() {
            Ok(())
        } else {
            Err(fault)
        }
    }
}

impl RegionQuery for CurrentProcess {
    fn bounds(&self) -> AddressSpaceBounds {
        self.bounds
    }

    fn query(&self, address: u64) -> Option<MemoryRegion> {
        if address >= self.bounds.max {
            return None;
        }

        let idx = self.mappings.partition_point(|m| m.end() <= address);
        match self.mappings.get(idx) {
            Some(mapping) if mapping.base <= address => Some(*mapping),
            next => {
                let end = next.map_or(self.bounds.max, |m| m.base);
                Some(MemoryRegion {
                    base: address,
                    size: end - address,
                    protection: Protection::NoAccess,
                    state: RegionState::Free,
                    kind: RegionType::None,
                })
            }
        }
    }
}

/// Parse one `/proc/<pid>/maps` line:
/// `start-end perms offset dev inode [path]`
fn parse_maps_line(line: &str) -> Option<MemoryRegion> {
    let mut fields = line.split_whitespace();
    let range = fields.next()?;
    let perms = fields.next()?.as_bytes();
    let path = fields.nth(3).unwrap_or("");

    let (start, end) = range.split_once('-')?;
    let start = u64::from_str_radix(start, 16).ok()?;
    let end = u64::from_str_radix(end, 16).ok()?;
    if end <= start || perms.len() < 4 {
        return None;
    }

    let readable = perms[0] == b'r';
    let writable = perms[1] == b'w';
    let executable = perms[2] == b'x';
    let shared = perms[3] == b's';

    let protection = match (readable, writable, executable) {
        (false, false, false) => Protection::NoAccess,
        (true, false, false) => Protection::ReadOnly,
        (true, true, false) => Protection::ReadWrite,
        (false, false, true) => Protection::Execute,
        (true, false, true) => Protection::ExecuteRead,
        (true, true, true) => Protection::ExecuteReadWrite,
        _ => Protection::Modified,
    };

    let anonymous = path.is_empty() || path.starts_with('[');
    let kind = if shared {
        RegionType::Mapped
    } else if anonymous {
        RegionType::Private
    } else if executable {
        RegionType::Image
    } else {
        RegionType::Mapped
    };

    Some(MemoryRegion {
        base: start,
        size: end - start,
        protection,
        state: RegionState::Committed,
        kind,
    })
}
