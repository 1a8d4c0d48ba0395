/*!
 * Kernel
 * Owns the live process table for one host invocation
 *
 * Per invocation the host builds a kernel over its persisted store, then
 * calls `load_process_table`, `run(budget)` and `save_process_table` in that
 * order. Nothing but the store survives; the kernel and every process
 * instance are rebuilt from scratch on the next tick.
 */

mod boot;
mod budget;
mod host;
mod lifecycle;
mod memory;
mod pid;
mod query;
mod record;
mod report;
mod scheduler;
mod table;

pub use boot::boot;
pub use budget::{UsageMeter, WallClockMeter};
pub use host::run_tick;
pub use report::TickReport;

#[cfg(test)]
pub(crate) use budget::MockUsageMeter;

use crate::core::errors::KernelError;
use crate::core::types::Pid;
use crate::core::KernelConfig;
use crate::process::Registry;
use crate::store::KernelMemory;
use record::ProcessRecord;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Cooperative, tick-driven process scheduler
pub struct Kernel<'a> {
    /// Host-owned durable state; the only thing that crosses ticks
    store: &'a mut KernelMemory,
    registry: &'a Registry,
    config: KernelConfig,
    /// Ordered by PID so equal-heat ties break deterministically
    table: BTreeMap<Pid, ProcessRecord>,
    /// Set by an invariant violation; aborts the current or next `run`
    fatal: Option<KernelError>,
}

impl<'a> Kernel<'a> {
    /// Kernel over `store` using the process-wide registry
    pub fn new(store: &'a mut KernelMemory) -> Self {
        Self::with_registry(store, Registry::global())
    }

    pub fn with_registry(store: &'a mut KernelMemory, registry: &'a Registry) -> Self {
        Self {
            store,
            registry,
            config: KernelConfig::default(),
            table: BTreeMap::new(),
            fatal: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Read-only view of the persisted store
    #[inline]
    pub fn store(&self) -> &KernelMemory {
        &*self.store
    }

    /// Number of records in the live table, whatever their status
    #[inline]
    pub fn get_process_count(&self) -> usize {
        self.table.len()
    }

    /// Drop every process and reset the stored table and memory. The PID
    /// counter is kept so recycled identities do not collide with stale
    /// references.
    pub fn reboot(&mut self) {
        info!("Rebooting");
        self.table.clear();
        self.fatal = None;
        self.store.pmem.clear();
        self.store.proc = Some(Vec::new());
        self.save_process_table();
    }
}

impl fmt::Debug for Kernel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("config", &self.config)
            .field("processes", &self.table.len())
            .field("next_pid", &self.store.kpar.next_pid)
            .field("poisoned", &self.fatal.is_some())
            .finish()
    }
}
