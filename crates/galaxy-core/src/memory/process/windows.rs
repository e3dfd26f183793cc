use std::ffi::c_void;
use std::mem::{size_of, zeroed};

use tracing::debug;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
use windows::Win32::System::Memory::{
    MEM_COMMIT, MEM_IMAGE, MEM_MAPPED, MEM_PRIVATE, MEM_RESERVE,
    MEMORY_BASIC_INFORMATION, PAGE_EXECUTE, PAGE_EXECUTE_READ, PAGE_EXECUTE_READWRITE,
    PAGE_EXECUTE_WRITECOPY, PAGE_NOACCESS, PAGE_PROTECTION_FLAGS, PAGE_READONLY,
    PAGE_READWRITE, PAGE_WRITECOPY, VirtualQuery,
};
use windows::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};
use windows::Win32::System::Threading::GetCurrentProcess;

use crate::error::Result;
use crate::memory::reader::{ReadFault, ReadMemory, ReadResult};
use crate::memory::region::{
    AddressSpaceBounds, MemoryRegion, Protection, RegionQuery, RegionState, RegionType,
};

/// The current process, read through its own pseudo-handle
pub struct CurrentProcess {
    handle: HANDLE,
    bounds: AddressSpaceBounds,
}

impl CurrentProcess {
    pub fn open() -> Result<Self> {
        // SAFETY: both calls only write into locals and cannot fail
        let (handle, info) = unsafe {
            let mut info: SYSTEM_INFO = zeroed();
            GetSystemInfo(&mut info);
            (GetCurrentProcess(), info)
        };

        let bounds = AddressSpaceBounds {
            min: info.lpMinimumApplicationAddress as u64,
            max: info.lpMaximumApplicationAddress as u64,
            page_size: u64::from(info.dwPageSize),
        };
        debug!(
            "Address space 0x{:X}-0x{:X}, page size 0x{:X}",
            bounds.min, bounds.max, bounds.page_size
        );

        Ok(Self { handle, bounds })
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

        let mut bytes_read = 0usize;
        // SAFETY: ReadProcessMemory validates the source range itself and
        // reports inaccessible pages as an error; the destination is `buf`.
        let result = unsafe {
            ReadProcessMemory(
                self.handle,
                address as *const c_void,
                buf.as_mut_ptr() as *mut c_void,
                buf.len(),
                Some(&mut bytes_read),
            )
        };

        match result {
            Ok(()) if bytes_read == buf.len() => Ok(()),
            _ => Err(fault),
        }
    }
}

impl RegionQuery for CurrentProcess {
    fn bounds(&self) -> AddressSpaceBounds {
        self.bounds
    }

    fn query(&self, address: u64) -> Option<MemoryRegion> {
        // SAFETY: VirtualQuery only writes into `info`
        let info = unsafe {
            let mut info: MEMORY_BASIC_INFORMATION = zeroed();
            let written = VirtualQuery(
                Some(address as *const c_void),
                &mut info,
                size_of::<MEMORY_BASIC_INFORMATION>(),
            );
            if written == 0 {
                return None;
            }
            info
        };

        let state = if info.State == MEM_COMMIT {
            RegionState::Committed
        } else if info.State == MEM_RESERVE {
            RegionState::Reserved
        } else {
            RegionState::Free
        };

        let kind = if info.Type == MEM_PRIVATE {
            RegionType::Private
        } else if info.Type == MEM_MAPPED {
            RegionType::Mapped
        } else if info.Type == MEM_IMAGE {
            RegionType::Image
        } else {
            RegionType::None
        };

        Some(MemoryRegion {
            base: info.BaseAddress as u64,
            size: info.RegionSize as u64,
            protection: protection_from(info.Protect),
            state,
            kind,
        })
    }
}

fn protection_from(flags: PAGE_PROTECTION_FLAGS) -> Protection {
    match flags {
        PAGE_NOACCESS => Protection::NoAccess,
        PAGE_READONLY => Protection::ReadOnly,
        PAGE_READWRITE => Protection::ReadWrite,
        PAGE_WRITECOPY => Protection::WriteCopy,
        PAGE_EXECUTE => Protection::Execute,
        PAGE_EXECUTE_READ => Protection::ExecuteRead,
        PAGE_EXECUTE_READWRITE => Protection::ExecuteReadWrite,
        PAGE_EXECUTE_WRITECOPY => Protection::ExecuteWriteCopy,
        // Guard, no-cache and write-combine pages, or no access info at all
        _ => Protection::Modified,
    }
}
