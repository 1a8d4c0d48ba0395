/*!
 * Persisted Store Types
 * The sub-shape of the host's durable object that the kernel reads and writes
 */

use crate::core::types::{Heat, Pid, ProcessMemory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters the kernel keeps across invocations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelParameters {
    /// The upcoming process ID
    #[serde(rename = "nextPid", default)]
    pub next_pid: Pid,
}

/// One process table entry as persisted between invocations
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SerializedProcess {
    pub id: Pid,
    #[serde(rename = "pa")]
    pub parent_id: Pid,
    #[serde(rename = "ex")]
    pub type_tag: String,
    #[serde(rename = "he")]
    pub heat: Heat,
}

/// Persisted process table; ordering is insignificant
pub type SerializedProcessTable = Vec<SerializedProcess>;

/// Base memory structure of the kernel
///
/// Every section is optional on disk so a blank or partially written
/// document still loads. `proc` is `None` until the first save, which is how
/// the kernel tells a brand-new store from an empty table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelMemory {
    #[serde(default)]
    pub kpar: KernelParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proc: Option<SerializedProcessTable>,
    #[serde(default)]
    pub pmem: BTreeMap<Pid, ProcessMemory>,
}

impl KernelMemory {
    /// A blank store; the first spawn receives PID 0
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The persisted table, or an empty slice before the first save
    pub fn table(&self) -> &[SerializedProcess] {
        self.proc.as_deref().unwrap_or(&[])
    }
}
