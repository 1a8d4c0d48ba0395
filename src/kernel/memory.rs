/*!
 * Process Memory
 * Per-PID persisted blobs and the lazily loaded per-process cache
 */

use super::Kernel;
use crate::core::types::{empty_memory, Pid, ProcessMemory};

impl Kernel<'_> {
    /// Memory for `pid`, created empty on demand
    ///
    /// A process in the table is served from its cached copy, the same one
    /// its own turn writes to. Other PIDs go straight to the store.
    pub fn get_process_memory(&mut self, pid: Pid) -> &mut ProcessMemory {
        match self.table.get_mut(&pid) {
            Some(record) => {
                let store = &mut *self.store;
                record.memory.get_or_insert_with(|| {
                    store.pmem.entry(pid).or_insert_with(empty_memory).clone()
                })
            }
            None => self.store.pmem.entry(pid).or_insert_with(empty_memory),
        }
    }

    /// Replace the stored memory for `pid`, dropping any cached copy
    pub fn set_process_memory(&mut self, pid: Pid, memory: ProcessMemory) {
        if let Some(record) = self.table.get_mut(&pid) {
            record.memory = None;
        }
        self.store.pmem.insert(pid, memory);
    }

    pub fn delete_process_memory(&mut self, pid: Pid) {
        if let Some(record) = self.table.get_mut(&pid) {
            record.memory = None;
        }
        self.store.pmem.remove(&pid);
    }

    /// The process's memory, fetched from the store at most once per process
    /// lifetime and served from the record afterwards. `None` if the process
    /// is not in the table.
    pub fn ensure_memory_loaded(&mut self, pid: Pid) -> Option<&mut ProcessMemory> {
        if !self.table.contains_key(&pid) {
            return None;
        }
        Some(self.get_process_memory(pid))
    }

    /// Write a loaded cache back to the store
    pub(crate) fn flush_memory(&mut self, pid: Pid) {
        if let Some(memory) = self.table.get(&pid).and_then(|r| r.memory.as_ref()) {
            self.store.pmem.insert(pid, memory.clone());
        }
    }

    /// Drop stored memory whose PID has no record in the live table
    ///
    /// Zombie blobs appear when a host crashes between a kill and the next
    /// save. Returns the number of blobs removed.
    pub fn collect_garbage(&mut self) -> usize {
        let before = self.store.pmem.len();
        let table = &self.table;
        self.store.pmem.retain(|pid, _| table.contains_key(pid));
        before - self.store.pmem.len()
    }
}
