/*!
 * Process Record
 * Kernel-internal pairing of a live process with its scheduling state
 */

use crate::core::types::{Heat, ProcessMemory};
use crate::process::{Process, ProcessFactory, ProcessInfo, ProcessInit};
use crate::store::SerializedProcess;
use std::sync::Arc;

pub(crate) struct ProcessRecord {
    /// Dynamic priority; the sole driver of run order
    pub heat: Heat,
    pub info: ProcessInfo,
    /// `None` only while the process is checked out for its own turn
    pub process: Option<Box<dyn Process>>,
    /// Registry entry, kept for re-serialization identity
    pub factory: Arc<ProcessFactory>,
    /// Lazily loaded copy of the process's persisted memory
    pub memory: Option<ProcessMemory>,
}

impl ProcessRecord {
    /// Construct the process through its factory. Heat starts at base heat.
    pub fn spawn(factory: Arc<ProcessFactory>, init: ProcessInit) -> Self {
        let process = factory.construct(init);
        let base_heat = process.base_heat();
        Self {
            heat: base_heat,
            info: ProcessInfo::new(init, base_heat, factory.type_tag_arc()),
            process: Some(process),
            factory,
            memory: None,
        }
    }

    /// Rebuild from a persisted entry, restoring its accumulated heat
    pub fn restore(factory: Arc<ProcessFactory>, entry: &SerializedProcess) -> Self {
        let mut record = Self::spawn(
            factory,
            ProcessInit {
                pid: entry.id,
                parent_pid: entry.parent_id,
            },
        );
        record.heat = entry.heat;
        record
    }

    pub fn serialize(&self) -> SerializedProcess {
        SerializedProcess {
            id: self.info.pid,
            parent_id: self.info.parent_pid,
            type_tag: self.factory.type_tag().to_string(),
            heat: self.heat,
        }
    }
}
