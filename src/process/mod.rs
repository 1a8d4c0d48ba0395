/*!
 * Process Module
 * Process contract, identity types, registry and run-time context
 */

pub mod context;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use context::ProcessContext;
pub use registry::{ProcessFactory, Registry};
pub use traits::{Process, ProcessKind};
pub use types::{ProcessInfo, ProcessInit, ProcessStatus};
