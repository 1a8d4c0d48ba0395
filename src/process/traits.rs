/*!
 * Process Traits
 * The contract every schedulable process kind implements
 */

use super::context::ProcessContext;
use super::types::ProcessInit;
use crate::core::errors::ProcessResult;
use crate::core::limits::DEFAULT_BASE_HEAT;
use crate::core::types::Heat;

/// A unit of schedulable work
///
/// The kernel owns identity and status; an implementation owns only its
/// behaviour. State that must survive the tick belongs in
/// [`ProcessContext::memory`], since the instance itself is rebuilt from the
/// persisted table on every invocation.
pub trait Process: 'static {
    /// Constant priority weight. Read once at construction.
    fn base_heat(&self) -> Heat {
        DEFAULT_BASE_HEAT
    }

    /// Do this tick's work. Returning an error (or panicking) terminates the
    /// process and its subtree; siblings are unaffected.
    fn run(&mut self, ctx: &mut ProcessContext<'_, '_>) -> ProcessResult<()>;
}

/// A process kind with a fixed type tag, constructible without a closure
pub trait ProcessKind: Process + Sized {
    /// Stable tag persisted in the process table
    const TYPE_TAG: &'static str;

    fn create(init: ProcessInit) -> Self;
}
