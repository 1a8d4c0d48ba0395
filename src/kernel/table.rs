/*!
 * Process Table Persistence
 * Rebuilding the live table from the store and writing it back
 */

use super::record::ProcessRecord;
use super::Kernel;
use crate::store::SerializedProcess;
use tracing::{debug, info, instrument, warn};

impl Kernel<'_> {
    /// Rebuild the live table from the persisted entries
    ///
    /// Entries whose type tag is not registered, or whose PID repeats an
    /// earlier entry, are dropped with a diagnostic. Memory blobs left without
    /// a live PID are pruned afterwards.
    #[instrument(skip(self), fields(entries))]
    pub fn load_process_table(&mut self) {
        self.table.clear();

        let entries: Vec<SerializedProcess> = match self.store.proc.as_ref() {
            Some(entries) => entries.clone(),
            None => {
                info!("Spawning new process table");
                self.store.proc = Some(Vec::new());
                Vec::new()
            }
        };
        tracing::Span::current().record("entries", entries.len());

        for entry in &entries {
            let Some(factory) = self.registry.fetch(&entry.type_tag) else {
                warn!(
                    pid = entry.id,
                    type_tag = %entry.type_tag,
                    "No constructor found for persisted process; dropping entry"
                );
                continue;
            };
            if self.table.contains_key(&entry.id) {
                warn!(pid = entry.id, "Duplicate PID in persisted table; dropping entry");
                continue;
            }
            self.table
                .insert(entry.id, ProcessRecord::restore(factory, entry));
        }

        let pruned = self.collect_garbage();
        if pruned > 0 {
            debug!(pruned, "Pruned zombie process memory");
        }
        debug!(loaded = self.table.len(), "Process table loaded");
    }

    /// Persist every running process, replacing the stored table
    ///
    /// Exited and terminated records are left out for good; any memory they
    /// still hold in the store is deleted here.
    #[instrument(skip(self))]
    pub fn save_process_table(&mut self) {
        let mut table = Vec::with_capacity(self.table.len());
        for (pid, record) in &self.table {
            if record.info.is_alive() {
                if let Some(memory) = record.memory.as_ref() {
                    self.store.pmem.insert(*pid, memory.clone());
                }
                table.push(record.serialize());
            } else {
                self.store.pmem.remove(pid);
            }
        }
        debug!(saved = table.len(), "Process table saved");
        self.store.proc = Some(table);
    }
}
