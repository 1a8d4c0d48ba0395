/*!
 * System Limits and Constants
 *
 * Defaults for the PID allocator and scheduler. Values can be overridden
 * per kernel through `KernelConfig`.
 */

// =============================================================================
// PID ALLOCATION
// =============================================================================

/// Exclusive upper bound for PIDs before the allocator wraps back to 1
pub const PID_MAX: u32 = 1_000_000;

/// Start warning when fewer than this many PIDs remain before rotation
pub const PID_WARN_LEVEL: u32 = 1_000;

/// While in the warning zone, warn on every Nth allocation
pub const PID_WARN_RATE: u32 = 10;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Base heat for process kinds that do not declare their own
pub const DEFAULT_BASE_HEAT: u64 = 10;
