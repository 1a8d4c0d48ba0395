/*!
 * Scheduler
 * Heat-ordered, budget-limited execution with per-process failure isolation
 *
 * # Policy
 *
 * - Alive processes run in descending heat order; equal heat keeps PID order
 * - The usage meter is sampled before each slot; once it reaches the budget
 *   the pass stops
 * - A process that runs has its heat reset to its base heat
 * - A process left unreached gains its base heat again, so a starved process
 *   climbs until it outranks its peers
 * - A fault (error or panic) terminates the process and its subtree only
 */

use super::budget::UsageMeter;
use super::report::TickReport;
use super::Kernel;
use crate::core::errors::KernelResult;
use crate::core::types::{Heat, Pid};
use crate::process::{ProcessContext, ProcessStatus};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, instrument, warn};

impl Kernel<'_> {
    /// Run one scheduling pass against `budget`
    ///
    /// # Errors
    /// Only fatal kernel invariant violations (a duplicate PID on spawn) are
    /// returned; process faults are isolated and reported in the
    /// [`TickReport`].
    #[instrument(skip(self, meter), fields(processes = self.table.len()))]
    pub fn run(&mut self, budget: f64, meter: &dyn UsageMeter) -> KernelResult<TickReport> {
        if let Some(err) = self.fatal.take() {
            return Err(err);
        }

        let mut queue: Vec<(Pid, Heat)> = self
            .table
            .iter()
            .filter(|(_, record)| record.info.is_alive())
            .map(|(pid, record)| (*pid, record.heat))
            .collect();
        queue.sort_by(|a, b| b.1.cmp(&a.1));

        let mut report = TickReport::default();
        let mut cursor = 0;

        while cursor < queue.len() {
            report.usage = meter.used();
            if report.usage >= budget {
                break;
            }
            let pid = queue[cursor].0;
            cursor += 1;

            // Killed or retired earlier this tick
            let Some(record) = self.table.get_mut(&pid) else {
                continue;
            };
            if !record.info.is_alive() {
                continue;
            }
            record.heat = record.info.base_heat;
            let parent_pid = record.info.parent_pid;

            if !self.parent_is_present(parent_pid) {
                warn!(pid, parent_pid, "Parent process is gone; retiring orphan");
                self.exit_process(pid);
                report.exited.push(pid);
                continue;
            }

            report.ran.push(pid);
            match self.run_process(pid, parent_pid) {
                ProcessStatus::Run => {}
                ProcessStatus::Exit => {
                    info!(pid, "Process exited with status EXIT");
                    report.exited.push(pid);
                }
                ProcessStatus::Term => {
                    if let Err(e) = self.kill_process(pid) {
                        error!(pid, error = %e, "Terminated process could not be removed");
                    }
                    report.terminated.push(pid);
                }
            }

            if let Some(err) = self.fatal.take() {
                return Err(err);
            }
        }

        for (pid, _) in &queue[cursor..] {
            if let Some(record) = self.table.get_mut(pid) {
                if record.info.is_alive() {
                    record.heat = record.heat.saturating_add(record.info.base_heat);
                    report.skipped.push(*pid);
                }
            }
        }

        debug!(
            ran = report.ran.len(),
            exited = report.exited.len(),
            terminated = report.terminated.len(),
            skipped = report.skipped.len(),
            usage = report.usage,
            budget,
            "Scheduling pass complete"
        );
        Ok(report)
    }

    /// Invoke one process inside the failure boundary and return its final
    /// status
    fn run_process(&mut self, pid: Pid, parent_pid: Pid) -> ProcessStatus {
        let Some(mut process) = self.table.get_mut(&pid).and_then(|r| r.process.take()) else {
            return ProcessStatus::Term;
        };

        let outcome = {
            let mut ctx = ProcessContext::new(self, pid, parent_pid);
            panic::catch_unwind(AssertUnwindSafe(|| process.run(&mut ctx)))
        };
        let fault = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };

        let Some(record) = self.table.get_mut(&pid) else {
            // Killed itself during its turn
            return ProcessStatus::Term;
        };
        record.process = Some(process);

        if let Some(reason) = fault {
            record.info.retire(ProcessStatus::Term);
            error!(
                pid,
                type_tag = %record.info.type_tag,
                error = %reason,
                status = %record.info.status,
                "Process failed"
            );
            let memory = match record.memory.as_ref() {
                Some(cached) => cached.to_string(),
                None => self
                    .store
                    .pmem
                    .get(&pid)
                    .map(|stored| stored.to_string())
                    .unwrap_or_default(),
            };
            debug!(pid, memory = %memory, "Dying process memory");
            return ProcessStatus::Term;
        }

        let status = record.info.status;
        self.flush_memory(pid);
        status
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
