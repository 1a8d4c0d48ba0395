/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type
pub type Pid = u32;

/// Dynamic scheduling priority; higher runs sooner
pub type Heat = u64;

/// Opaque per-process persisted state. The kernel creates and deletes
/// entries but never interprets their contents.
pub type ProcessMemory = serde_json::Value;

/// PID of the root process every other process ultimately descends from
pub const ROOT_PID: Pid = 0;

/// Fresh, empty process memory
#[inline]
#[must_use]
pub fn empty_memory() -> ProcessMemory {
    serde_json::Value::Object(serde_json::Map::new())
}
