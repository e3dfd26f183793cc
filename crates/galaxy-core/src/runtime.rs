//! No-relocation window around the scan
//!
//! A host with a moving collector can be asked to hold off relocating live
//! objects while raw memory is being read. The request is a hint: every read
//! is fault-tolerant on its own, so a refused or broken window only lowers
//! the odds of finding the table, never the correctness of what is found.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct HintError(pub String);

/// The host runtime's memory manager
pub trait RelocationControl {
    /// Ask the runtime not to move objects while up to `budget` bytes are
    /// allocated.
    fn try_suspend(&self, budget: usize) -> Result<(), HintError>;

    /// End a window previously granted by `try_suspend`
    fn resume(&self) -> Result<(), HintError>;
}

/// Runtime without a moving collector: the window is always granted
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl RelocationControl for NativeRuntime {
    fn try_suspend(&self, _budget: usize) -> Result<(), HintError> {
        Ok(())
    }

    fn resume(&self) -> Result<(), HintError> {
        Ok(())
    }
}

/// Scoped no-relocation window.
///
/// A granted window is resumed exactly once, when the guard drops.
#[must_use = "the window closes as soon as the guard is dropped"]
pub struct NoRelocationWindow<'a, C: RelocationControl + ?Sized> {
    control: &'a C,
    granted: bool,
}

impl<'a, C: RelocationControl + ?Sized> NoRelocationWindow<'a, C> {
    pub fn acquire(control: &'a C, budget: usize) -> Self {
        let granted = match control.try_suspend(budget) {
            Ok(()) => {
                debug!("No-relocation window granted ({} bytes)", budget);
                true
            }
            Err(e) => {
                warn!("Could not pause memory relocation: {}", e);
                false
            }
        };
        Self { control, granted }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

impl<C: RelocationControl + ?Sized> Drop for NoRelocationWindow<'_, C> {
    fn drop(&mut self) {
        if !self.granted {
            return;
        }
        self.granted = false;
        if let Err(e) = self.control.resume() {
            warn!("Could not resume memory relocation: {}", e);
        }
    }
}
