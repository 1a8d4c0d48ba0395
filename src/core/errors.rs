/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result of process-side operations
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Result of kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

/// Faults raised by process code. Any of these returned from `run` terminates
/// the process for the tick and cascades to its subtree.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process failed: {0}")]
    #[diagnostic(
        code(process::failed),
        help("The process reported a fatal condition for this tick.")
    )]
    Failed(String),

    #[error("Parent process {parent} of process {pid} is not alive")]
    #[diagnostic(
        code(process::parent_missing),
        help("The process must not outlive its creator. It will be terminated.")
    )]
    ParentMissing { pid: Pid, parent: Pid },

    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have been killed this tick or never existed. Check PID validity.")
    )]
    NotFound(Pid),

    #[error("Permission denied: {0}")]
    #[diagnostic(
        code(process::permission_denied),
        help("A process may only kill itself or its own descendants.")
    )]
    PermissionDenied(String),
}

impl ProcessError {
    /// Shorthand for a generic fatal condition
    pub fn failed(reason: impl Into<String>) -> Self {
        ProcessError::Failed(reason.into())
    }
}

/// Host-side store errors
#[derive(Error, Debug, Diagnostic)]
pub enum StoreError {
    #[error("Store I/O failed at {path}: {source}")]
    #[diagnostic(
        code(store::io),
        help("Check that the store path exists and is writable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store document is not valid JSON: {0}")]
    #[diagnostic(
        code(store::json),
        help("The persisted store is corrupt. Move it aside to start from a fresh table.")
    )]
    Json(#[from] serde_json::Error),
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Kernel spawning a duplicate for occupied PID {0}")]
    #[diagnostic(
        code(kernel::duplicate_pid),
        help("The PID allocator is corrupt or has wrapped onto a long-lived process.")
    )]
    DuplicatePid(Pid),

    #[error("Refusing to kill the root process")]
    #[diagnostic(
        code(kernel::root_kill_refused),
        help("PID 0 anchors the whole process tree and cannot be killed.")
    )]
    RootKillRefused,

    #[error("No process kind registered for type tag {0:?}")]
    #[diagnostic(
        code(kernel::unknown_type_tag),
        help("Register the process kind before the first invocation that references it.")
    )]
    UnknownTypeTag(String),

    #[error("Process {0} not found")]
    #[diagnostic(code(kernel::process_not_found))]
    ProcessNotFound(Pid),

    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Store error: {0}")]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

impl KernelError {
    /// Whether this error must abort the tick instead of being isolated
    pub fn is_fatal(&self) -> bool {
        matches!(self, KernelError::DuplicatePid(_))
    }
}

/// Lets `run` bodies use `?` on context calls. Fatal kernel errors stay
/// latched in the kernel regardless of what the process does with them.
impl From<KernelError> for ProcessError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::Process(inner) => inner,
            KernelError::ProcessNotFound(pid) => ProcessError::NotFound(pid),
            other => ProcessError::Failed(other.to_string()),
        }
    }
}
