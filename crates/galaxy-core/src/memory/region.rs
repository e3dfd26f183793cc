//! Region metadata and the address-space walk

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::debug;

/// Allocation state of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum RegionState {
    #[strum(serialize = "commit")]
    Committed,
    #[strum(serialize = "reserve")]
    Reserved,
    #[strum(serialize = "free")]
    Free,
}

/// Backing type of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum RegionType {
    #[strum(serialize = "private")]
    Private,
    #[strum(serialize = "mapped")]
    Mapped,
    #[strum(serialize = "image")]
    Image,
    #[strum(serialize = "none")]
    None,
}

/// Page protection of a region
///
/// `Modified` covers any protection carrying guard/no-cache style modifier
/// bits; such pages are never scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum Protection {
    #[strum(serialize = "---")]
    NoAccess,
    #[strum(serialize = "r--")]
    ReadOnly,
    #[strum(serialize = "rw-")]
    ReadWrite,
    #[strum(serialize = "rc-")]
    WriteCopy,
    #[strum(serialize = "--x")]
    Execute,
    #[strum(serialize = "r-x")]
    ExecuteRead,
    #[strum(serialize = "rwx")]
    ExecuteReadWrite,
    #[strum(serialize = "rcx")]
    ExecuteWriteCopy,
    #[strum(serialize = "mod")]
    Modified,
}

/// Contiguous range of the address space with uniform attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryRegion {
    pub base: u64,
    pub size: u64,
    pub protection: Protection,
    pub state: RegionState,
    pub kind: RegionType,
}

impl MemoryRegion {
    /// Exclusive end address (saturating)
    #[inline]
    pub fn end(&self) -> u64 {
        self.base.saturating_add(self.size)
    }

    #[inline]
    pub fn contains(&self, address: u64) -> bool {
        address >= self.base && address < self.end()
    }

    /// Committed, private, plain read-write memory: the only kind of region
    /// that can hold live, mutable game data.
    pub fn is_scan_target(&self) -> bool {
        self.state == RegionState::Committed
            && self.kind == RegionType::Private
            && self.protection == Protection::ReadWrite
    }
}

/// Lowest and highest application address plus the page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSpaceBounds {
    pub min: u64,
    pub max: u64,
    pub page_size: u64,
}

/// The OS region-query primitive
pub trait RegionQuery {
    /// Address-space bounds and page size
    fn bounds(&self) -> AddressSpaceBounds;

    /// Describe the region containing `address`, or the next one after it.
    ///
    /// `None` is the failure signal; callers advance by one page and retry.
    fn query(&self, address: u64) -> Option<MemoryRegion>;
}

/// Lazy walk over every region between the address-space bounds.
///
/// Yields scan targets only. The walk is finite and not restartable.
pub struct RegionWalk<'a, Q: RegionQuery + ?Sized> {
    query: &'a Q,
    bounds: AddressSpaceBounds,
    probe: u64,
    failed_queries: usize,
}

impl<'a, Q: RegionQuery + ?Sized> RegionWalk<'a, Q> {
    pub fn new(query: &'a Q) -> Self {
        let bounds = query.bounds();
        Self {
            query,
            bounds,
            probe: bounds.min,
            failed_queries: 0,
        }
    }

    /// Number of probes that got no answer from the OS so far
    pub fn failed_queries(&self) -> usize {
        self.failed_queries
    }

    fn step(&mut self, size: u64) {
        // A zero step would probe the same address forever
        let size = if size == 0 { self.bounds.page_size.max(1) } else { size };
        self.probe = self.probe.saturating_add(size);
    }
}

impl<Q: RegionQuery + ?Sized> Iterator for RegionWalk<'_, Q> {
    type Item = MemoryRegion;

    fn next(&mut self) -> Option<Self::Item> {
        while self.probe < self.bounds.max {
            let Some(region) = self.query.query(self.probe) else {
                self.failed_queries += 1;
                self.step(self.bounds.page_size);
                continue;
            };

            let next = region.end();
            if next <= self.probe {
                self.step(self.bounds.page_size);
            } else {
                self.probe = next;
            }

            if region.is_scan_target() {
                return Some(region);
            }
        }
        None
    }
}

/// Collect every scan target, highest base address first.
///
/// Data loaded late in the session tends to sit in memory allocated late,
/// which is usually at higher addresses. Duplicate bases are dropped so no
/// region is scanned twice.
pub fn enumerate_regions<Q: RegionQuery + ?Sized>(query: &Q) -> Vec<MemoryRegion> {
    let mut walk = RegionWalk::new(query);
    let mut regions: Vec<MemoryRegion> = walk.by_ref().collect();

    regions.sort_unstable_by(|a, b| b.base.cmp(&a.base));
    regions.dedup_by_key(|r| r.base);

    debug!(
        "Enumerated {} scan target regions ({} failed queries)",
        regions.len(),
        walk.failed_queries()
    );
    regions
}
