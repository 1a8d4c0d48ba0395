/*!
 * Tick Kernel Library
 * Cooperative, tick-driven process scheduling over a persisted store
 */

pub mod core;
pub mod kernel;
pub mod monitoring;
pub mod process;
pub mod processes;
pub mod store;

// Re-exports
pub use crate::core::{
    KernelConfig, KernelError, KernelResult, Pid, ProcessError, ProcessResult, StoreError,
};
pub use kernel::{boot, run_tick, Kernel, TickReport, UsageMeter, WallClockMeter};
pub use monitoring::{init_tracing, TickSpan};
pub use process::{Process, ProcessContext, ProcessKind, ProcessStatus, Registry};
pub use processes::InitProcess;
pub use store::{FileStore, KernelMemory};
