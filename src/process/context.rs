/*!
 * Process Context
 * The kernel capabilities a process may use during its own turn
 */

use super::traits::ProcessKind;
use crate::core::errors::{KernelResult, ProcessError, ProcessResult};
use crate::core::types::{Pid, ProcessMemory, ROOT_PID};
use crate::kernel::Kernel;

/// Handle passed to [`Process::run`](super::Process::run)
///
/// Spawning and killing mutate the same table the scheduler is walking; the
/// context restricts kills to the caller's own subtree so a turn can never
/// remove a sibling the scheduler has yet to reach.
pub struct ProcessContext<'k, 'a> {
    kernel: &'k mut Kernel<'a>,
    pid: Pid,
    parent_pid: Pid,
}

impl<'k, 'a> ProcessContext<'k, 'a> {
    pub(crate) fn new(kernel: &'k mut Kernel<'a>, pid: Pid, parent_pid: Pid) -> Self {
        Self {
            kernel,
            pid,
            parent_pid,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn parent_pid(&self) -> Pid {
        self.parent_pid
    }

    /// Read-only view of the kernel for queries
    #[inline]
    pub fn kernel(&self) -> &Kernel<'a> {
        &*self.kernel
    }

    /// This process's persisted memory, loaded from the store on first access
    pub fn memory(&mut self) -> ProcessResult<&mut ProcessMemory> {
        self.kernel
            .ensure_memory_loaded(self.pid)
            .ok_or(ProcessError::NotFound(self.pid))
    }

    /// Finish gracefully; the process is not persisted at the next save
    pub fn exit(&mut self) {
        self.kernel.exit_process(self.pid);
    }

    /// Fail unless the parent is still alive. Children of a root that
    /// failed earlier this tick still pass.
    pub fn assert_parent_process(&self) -> ProcessResult<()> {
        match self.kernel.get_process_by_id_or_err(self.parent_pid) {
            Ok(_) => Ok(()),
            Err(_) if self.kernel.parent_is_present(self.parent_pid) => Ok(()),
            Err(_) => Err(ProcessError::ParentMissing {
                pid: self.pid,
                parent: self.parent_pid,
            }),
        }
    }

    /// Spawn a child of this process by type tag
    pub fn spawn_child(&mut self, type_tag: &str) -> KernelResult<Pid> {
        self.kernel.spawn_by_type_tag(type_tag, self.pid)
    }

    pub fn spawn_child_kind<K: ProcessKind>(&mut self) -> KernelResult<Pid> {
        self.spawn_child(K::TYPE_TAG)
    }

    /// Spawn a process parented to the root instead of this one
    pub fn spawn_independent(&mut self, type_tag: &str) -> KernelResult<Pid> {
        self.kernel.spawn_by_type_tag(type_tag, ROOT_PID)
    }

    pub fn spawn_independent_kind<K: ProcessKind>(&mut self) -> KernelResult<Pid> {
        self.spawn_independent(K::TYPE_TAG)
    }

    /// Kill this process or one of its descendants, cascading downward.
    /// Targets outside the caller's subtree are refused.
    pub fn kill(&mut self, target: Pid) -> KernelResult<Vec<Pid>> {
        if target != self.pid && !self.kernel.is_descendant(target, self.pid) {
            return Err(ProcessError::PermissionDenied(format!(
                "process {} may not kill {} outside its subtree",
                self.pid, target
            ))
            .into());
        }
        self.kernel.kill_process(target)
    }
}
