/*!
 * Process Lifecycle
 * Spawning, root creation and cascading termination
 */

use super::record::ProcessRecord;
use super::Kernel;
use crate::core::errors::{KernelError, KernelResult};
use crate::core::types::{Pid, ROOT_PID};
use crate::process::{ProcessFactory, ProcessInit, ProcessStatus};
use std::sync::Arc;
use tracing::{error, info, warn};

impl Kernel<'_> {
    /// Allocate a PID and insert a freshly constructed process
    ///
    /// # Errors
    /// `DuplicatePid` if the allocator hands out a PID that is still live.
    /// This is an invariant violation: the kernel is poisoned and the next
    /// `run` returns the same error.
    pub fn spawn_process(
        &mut self,
        factory: &Arc<ProcessFactory>,
        parent_pid: Pid,
    ) -> KernelResult<Pid> {
        let pid = self.get_free_pid();
        self.insert_process(factory, pid, parent_pid)
    }

    /// Spawn by registered type tag
    pub fn spawn_by_type_tag(&mut self, type_tag: &str, parent_pid: Pid) -> KernelResult<Pid> {
        let factory = self.registry.fetch(type_tag).ok_or_else(|| {
            error!(type_tag, "Cannot spawn unregistered process kind");
            KernelError::UnknownTypeTag(type_tag.to_string())
        })?;
        self.spawn_process(&factory, parent_pid)
    }

    /// Create the root process at PID 0, its own parent
    ///
    /// Moves the allocator past 0 if it has not been used yet so the next
    /// spawn cannot collide with the root.
    pub fn spawn_root(&mut self, type_tag: &str) -> KernelResult<Pid> {
        let factory = self
            .registry
            .fetch(type_tag)
            .ok_or_else(|| KernelError::UnknownTypeTag(type_tag.to_string()))?;
        if self.store.kpar.next_pid == ROOT_PID {
            self.store.kpar.next_pid = ROOT_PID + 1;
        }
        self.insert_process(&factory, ROOT_PID, ROOT_PID)
    }

    fn insert_process(
        &mut self,
        factory: &Arc<ProcessFactory>,
        pid: Pid,
        parent_pid: Pid,
    ) -> KernelResult<Pid> {
        if self.table.contains_key(&pid) {
            error!(pid, "Kernel spawning a duplicate for an occupied PID");
            self.fatal = Some(KernelError::DuplicatePid(pid));
            return Err(KernelError::DuplicatePid(pid));
        }

        let record = ProcessRecord::spawn(Arc::clone(factory), ProcessInit { pid, parent_pid });
        info!(
            pid,
            parent_pid,
            type_tag = factory.type_tag(),
            base_heat = record.info.base_heat,
            "Spawned process"
        );
        self.table.insert(pid, record);
        Ok(pid)
    }

    /// Kill a process and, transitively, every descendant
    ///
    /// Deletes each victim's persisted memory and removes it from the table.
    /// Killing an absent PID is a no-op. Returns the PIDs removed, the target
    /// first.
    ///
    /// # Errors
    /// `RootKillRefused` for PID 0.
    pub fn kill_process(&mut self, pid: Pid) -> KernelResult<Vec<Pid>> {
        if pid == ROOT_PID {
            warn!("Refusing to kill the root process");
            return Err(KernelError::RootKillRefused);
        }
        let mut killed = Vec::new();
        self.kill_subtree(pid, &mut killed);
        Ok(killed)
    }

    fn kill_subtree(&mut self, pid: Pid, killed: &mut Vec<Pid>) {
        let Some(mut record) = self.table.remove(&pid) else {
            return;
        };
        self.store.pmem.remove(&pid);
        record.info.retire(ProcessStatus::Term);
        info!(pid, type_tag = %record.info.type_tag, "Killing process");
        killed.push(pid);

        for child in self.get_child_processes(pid) {
            self.kill_subtree(child, killed);
        }
    }

    /// Mark a process as gracefully exited; it is dropped at the next save
    pub(crate) fn exit_process(&mut self, pid: Pid) {
        if let Some(record) = self.table.get_mut(&pid) {
            record.info.retire(ProcessStatus::Exit);
        }
    }
}
