/*!
 * Budget Metering
 * Host-supplied resource usage sampled before each scheduling slot
 */

use std::time::Instant;

/// Monotonically increasing usage counter compared against the tick budget
///
/// The kernel polls it before every candidate; it cannot interrupt a process
/// that overruns inside its own turn.
#[cfg_attr(test, mockall::automock)]
pub trait UsageMeter {
    fn used(&self) -> f64;
}

impl<F> UsageMeter for F
where
    F: Fn() -> f64,
{
    fn used(&self) -> f64 {
        self()
    }
}

/// Wall-clock milliseconds since the meter was created
#[derive(Debug, Clone, Copy)]
pub struct WallClockMeter {
    start: Instant,
}

impl WallClockMeter {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClockMeter {
    fn default() -> Self {
        Self::start()
    }
}

impl UsageMeter for WallClockMeter {
    fn used(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000.0
    }
}
