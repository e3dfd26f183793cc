//! Address-space view of the running process
//!
//! Every read goes through an OS call that reports inaccessible memory as an
//! error instead of raising a fault, so a page that disappears mid-scan costs
//! one rejected read and nothing more.

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use self::windows::CurrentProcess;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use self::linux::CurrentProcess;

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
mod unsupported;
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub use self::unsupported::CurrentProcess;
