/*!
 * Process Types
 * Identity, status and construction arguments shared by kernel and processes
 */

use crate::core::types::{Heat, Pid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Process status
///
/// Ordered from most to least dead so `status >= Run` means alive. Once a
/// process leaves `Run` it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessStatus {
    /// Terminated by a fault or a kill
    Term,
    /// Exited gracefully or retired as an orphan
    Exit,
    /// Alive and schedulable
    Run,
}

impl ProcessStatus {
    #[inline(always)]
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, ProcessStatus::Run)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProcessStatus::Term => "TERM",
            ProcessStatus::Exit => "EXIT",
            ProcessStatus::Run => "RUN",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments handed to a process constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessInit {
    pub pid: Pid,
    pub parent_pid: Pid,
}

/// Kernel-held identity of a live process
///
/// `pid`, `parent_pid`, `base_heat` and `type_tag` are fixed at construction;
/// only `status` moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: Pid,
    pub parent_pid: Pid,
    pub base_heat: Heat,
    pub status: ProcessStatus,
    pub type_tag: Arc<str>,
}

impl ProcessInfo {
    #[inline]
    #[must_use]
    pub fn new(init: ProcessInit, base_heat: Heat, type_tag: Arc<str>) -> Self {
        Self {
            pid: init.pid,
            parent_pid: init.parent_pid,
            base_heat,
            status: ProcessStatus::Run,
            type_tag,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    /// Move toward a more-dead status. Attempts to revive are ignored.
    pub fn retire(&mut self, status: ProcessStatus) {
        if status < self.status {
            self.status = status;
        }
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pid, self.type_tag)
    }
}
