/*!
 * Process Queries
 * Read-only lookups over the current invocation's live table
 */

use super::Kernel;
use crate::core::errors::{KernelError, KernelResult};
use crate::core::types::{Heat, Pid, ROOT_PID};
use crate::process::ProcessInfo;
use tracing::error;

impl Kernel<'_> {
    /// A live process by PID; exited or terminated records are hidden
    pub fn get_process_by_id(&self, pid: Pid) -> Option<&ProcessInfo> {
        self.table
            .get(&pid)
            .map(|record| &record.info)
            .filter(|info| info.is_alive())
    }

    pub fn get_process_by_id_or_err(&self, pid: Pid) -> KernelResult<&ProcessInfo> {
        self.get_process_by_id(pid)
            .ok_or(KernelError::ProcessNotFound(pid))
    }

    /// Whether `parent_pid` still anchors its children this tick
    ///
    /// A live parent always does. The root cannot be killed, so a root that
    /// faulted or exited keeps its children until the next `boot` replaces
    /// it; it only stops anchoring once it is missing from the table.
    pub fn parent_is_present(&self, parent_pid: Pid) -> bool {
        self.get_process_by_id(parent_pid).is_some()
            || (parent_pid == ROOT_PID && self.table.contains_key(&ROOT_PID))
    }

    /// PIDs of every record whose parent is `parent_pid` (linear scan)
    pub fn get_child_processes(&self, parent_pid: Pid) -> Vec<Pid> {
        self.table
            .values()
            .filter(|record| record.info.parent_pid == parent_pid && record.info.pid != parent_pid)
            .map(|record| record.info.pid)
            .collect()
    }

    /// Live processes of one kind, in PID order
    pub fn get_processes_by_type_tag(&self, type_tag: &str) -> Vec<&ProcessInfo> {
        if !self.registry.contains(type_tag) {
            error!(type_tag, "Type tag is not registered");
            return Vec::new();
        }
        self.table
            .values()
            .map(|record| &record.info)
            .filter(|info| info.is_alive() && &*info.type_tag == type_tag)
            .collect()
    }

    /// Current heat of a process in the table
    pub fn get_heat(&self, pid: Pid) -> Option<Heat> {
        self.table.get(&pid).map(|record| record.heat)
    }

    /// Whether `pid` sits somewhere below `ancestor` in the process tree
    pub fn is_descendant(&self, pid: Pid, ancestor: Pid) -> bool {
        let mut current = pid;
        // Bounded walk: a corrupt table cannot loop forever
        for _ in 0..self.table.len() {
            let Some(record) = self.table.get(&current) else {
                return false;
            };
            let parent = record.info.parent_pid;
            if parent == ancestor {
                return true;
            }
            if parent == current || parent == ROOT_PID {
                return false;
            }
            current = parent;
        }
        false
    }
}
