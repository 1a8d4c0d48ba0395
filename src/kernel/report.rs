/*!
 * Tick Report
 * Outcome of one scheduling pass
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// What `run` did this tick
///
/// `ran` lists every process whose `run` was invoked, in invocation order,
/// whatever its outcome. `exited` and `terminated` list final statuses, so a
/// PID may appear in `ran` and one of those. Orphans appear only in `exited`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TickReport {
    pub ran: Vec<Pid>,
    pub exited: Vec<Pid>,
    pub terminated: Vec<Pid>,
    /// Alive processes not reached before the budget ran out; each gained heat
    pub skipped: Vec<Pid>,
    /// Last usage sample taken by the scheduler
    pub usage: f64,
}

impl TickReport {
    /// Whether the budget cut the pass short
    #[inline]
    pub fn budget_exhausted(&self) -> bool {
        !self.skipped.is_empty()
    }
}
