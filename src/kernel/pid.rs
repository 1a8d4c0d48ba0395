/*!
 * PID Allocation
 * Persisted rotating counter over [0, pid_max)
 */

use super::Kernel;
use crate::core::types::Pid;
use tracing::{info, warn};

impl Kernel<'_> {
    /// Allocate the next PID from the persisted counter
    ///
    /// Returns the pre-increment value. Reaching `pid_max` wraps the counter
    /// to 1, never 0, which stays reserved for the root. Inside the warning
    /// zone every `pid_warn_rate`th allocation logs the distance to rotation.
    pub fn get_free_pid(&mut self) -> Pid {
        let pid_max = self.config.pid_max;
        let warn_level = self.config.pid_warn_level;
        let warn_rate = self.config.pid_warn_rate.max(1);

        let kpar = &mut self.store.kpar;
        let mut new_pid = kpar.next_pid;
        if new_pid >= pid_max {
            warn!(next_pid = new_pid, pid_max, "Persisted PID counter out of range; rotating");
            new_pid = 1;
        }
        let next_pid = new_pid.saturating_add(1);

        if next_pid >= pid_max {
            info!(pid_max, "PID rotation occurred; PID 1 spawns next");
            kpar.next_pid = 1;
        } else {
            kpar.next_pid = next_pid;
            if next_pid >= pid_max.saturating_sub(warn_level) && next_pid % warn_rate == 0 {
                warn!(
                    remaining = pid_max - next_pid,
                    "PID rotation approaching"
                );
            }
        }
        new_pid
    }
}
