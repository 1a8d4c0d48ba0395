/*!
 * Kernel Configuration
 * PID allocator bounds and warning thresholds, with environment overrides
 */

use super::limits::{PID_MAX, PID_WARN_LEVEL, PID_WARN_RATE};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const PID_MAX_ENV: &str = "TICK_KERNEL_PID_MAX";
pub const PID_WARN_LEVEL_ENV: &str = "TICK_KERNEL_PID_WARN_LEVEL";
pub const PID_WARN_RATE_ENV: &str = "TICK_KERNEL_PID_WARN_RATE";

/// Kernel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KernelConfig {
    /// Exclusive PID bound; the allocator wraps to 1 on reaching it
    pub pid_max: u32,
    /// Remaining-PID count at which rotation warnings start
    pub pid_warn_level: u32,
    /// Warn on every Nth allocation inside the warning zone
    pub pid_warn_rate: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            pid_max: PID_MAX,
            pid_warn_level: PID_WARN_LEVEL,
            pid_warn_rate: PID_WARN_RATE,
        }
    }
}

impl KernelConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by any valid `TICK_KERNEL_PID_*` variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(value) = env_u32(PID_MAX_ENV) {
            config = config.with_pid_max(value);
        }
        if let Some(value) = env_u32(PID_WARN_LEVEL_ENV) {
            config = config.with_pid_warn_level(value);
        }
        if let Some(value) = env_u32(PID_WARN_RATE_ENV) {
            config = config.with_pid_warn_rate(value);
        }
        config
    }

    /// Set the PID bound. Values below 2 leave no room besides the root and
    /// are clamped.
    #[inline]
    #[must_use]
    pub fn with_pid_max(mut self, pid_max: u32) -> Self {
        self.pid_max = pid_max.max(2);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_pid_warn_level(mut self, level: u32) -> Self {
        self.pid_warn_level = level;
        self
    }

    /// Set the warning rate. Zero is clamped to 1.
    #[inline]
    #[must_use]
    pub fn with_pid_warn_rate(mut self, rate: u32) -> Self {
        self.pid_warn_rate = rate.max(1);
        self
    }
}

fn env_u32(key: &str) -> Option<u32> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid kernel config override");
            None
        }
    }
}
