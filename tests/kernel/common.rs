/*!
 * Shared fixtures for kernel integration tests
 */

#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tick_kernel::core::types::{Heat, Pid};
use tick_kernel::{
    Kernel, KernelConfig, KernelMemory, Process, ProcessContext, ProcessError, ProcessResult,
    Registry, TickReport,
};

/// Usage each well-behaved process charges to the meter per run
pub const RUN_COST: u64 = 3;

pub type RunLog = Arc<Mutex<Vec<Pid>>>;

/// What a test process does when scheduled
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Work,
    Fail,
    Panic,
    Exit,
    /// Spawn one `idle` child on the first run
    Spawn,
}

pub struct TestProcess {
    heat: Heat,
    behaviour: Behaviour,
    log: RunLog,
    cost: Arc<AtomicU64>,
}

impl Process for TestProcess {
    fn base_heat(&self) -> Heat {
        self.heat
    }

    fn run(&mut self, ctx: &mut ProcessContext<'_, '_>) -> ProcessResult<()> {
        self.log.lock().push(ctx.pid());
        self.cost.fetch_add(RUN_COST, Ordering::SeqCst);

        match self.behaviour {
            Behaviour::Work => {
                let memory = ctx.memory()?;
                let runs = memory.get("runs").and_then(Value::as_u64).unwrap_or(0);
                memory["runs"] = Value::from(runs + 1);
                Ok(())
            }
            Behaviour::Fail => Err(ProcessError::failed("scripted failure")),
            Behaviour::Panic => panic!("scripted panic"),
            Behaviour::Exit => {
                ctx.exit();
                Ok(())
            }
            Behaviour::Spawn => {
                if ctx.memory()?.get("child").is_none() {
                    let child = ctx.spawn_child("idle")?;
                    ctx.memory()?["child"] = Value::from(child);
                }
                Ok(())
            }
        }
    }
}

/// Registered kinds: tag, base heat, behaviour
pub const KINDS: &[(&str, Heat, Behaviour)] = &[
    ("root", 1000, Behaviour::Work),
    ("worker", 10, Behaviour::Work),
    ("idle", 1, Behaviour::Work),
    ("faulty", 5, Behaviour::Fail),
    ("panicky", 5, Behaviour::Panic),
    ("exiter", 20, Behaviour::Exit),
    ("spawner", 10, Behaviour::Spawn),
];

/// A store, a registry of test kinds and the observations they record
pub struct Harness {
    pub registry: Registry,
    pub mem: KernelMemory,
    pub config: KernelConfig,
    pub log: RunLog,
    pub cost: Arc<AtomicU64>,
}

impl Harness {
    pub fn new() -> Self {
        let registry = Registry::new();
        let log: RunLog = Arc::new(Mutex::new(Vec::new()));
        let cost = Arc::new(AtomicU64::new(0));

        for &(tag, heat, behaviour) in KINDS {
            let log = Arc::clone(&log);
            let cost = Arc::clone(&cost);
            registry.register(tag, move |_| {
                Box::new(TestProcess {
                    heat,
                    behaviour,
                    log: Arc::clone(&log),
                    cost: Arc::clone(&cost),
                })
            });
        }

        Self {
            registry,
            mem: KernelMemory::new(),
            config: KernelConfig::default(),
            log,
            cost,
        }
    }

    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// A fresh kernel over the harness store, table not yet loaded
    pub fn kernel(&mut self) -> Kernel<'_> {
        Kernel::with_registry(&mut self.mem, &self.registry).with_config(self.config)
    }

    /// One host invocation: load, run against the cost meter, save
    pub fn tick(&mut self, budget: f64) -> TickReport {
        self.cost.store(0, Ordering::SeqCst);
        let cost = Arc::clone(&self.cost);
        let meter = move || cost.load(Ordering::SeqCst) as f64;

        let mut kernel = self.kernel();
        kernel.load_process_table();
        let report = kernel.run(budget, &meter).expect("tick should not hit a fatal error");
        kernel.save_process_table();
        report
    }

    /// Invocation order recorded since the last call
    pub fn take_log(&self) -> Vec<Pid> {
        std::mem::take(&mut *self.log.lock())
    }

    /// Persisted PIDs in table order
    pub fn persisted_pids(&self) -> Vec<Pid> {
        let mut pids: Vec<Pid> = self.mem.table().iter().map(|entry| entry.id).collect();
        pids.sort_unstable();
        pids
    }

    pub fn persisted_heat(&self, pid: Pid) -> Option<Heat> {
        self.mem
            .table()
            .iter()
            .find(|entry| entry.id == pid)
            .map(|entry| entry.heat)
    }
}

/// Spawn `(tag, parent)` pairs in order, returning their PIDs
pub fn spawn_all(kernel: &mut Kernel<'_>, specs: &[(&str, Pid)]) -> Vec<Pid> {
    specs
        .iter()
        .map(|(tag, parent)| kernel.spawn_by_type_tag(tag, *parent).expect("spawn"))
        .collect()
}
