/*!
 * Init Process
 * Root of the process tree for the demo host
 */

use crate::core::errors::ProcessResult;
use crate::core::types::Heat;
use crate::process::{Process, ProcessContext, ProcessInit, ProcessKind};
use serde_json::Value;
use tracing::info;

/// Memory key holding the number of ticks init has run
const TICKS_KEY: &str = "ticks";

/// Root process; runs ahead of everything else and counts its own ticks
#[derive(Debug, Default)]
pub struct InitProcess;

impl InitProcess {
    pub const BASE_HEAT: Heat = 1000;
}

impl Process for InitProcess {
    fn base_heat(&self) -> Heat {
        Self::BASE_HEAT
    }

    fn run(&mut self, ctx: &mut ProcessContext<'_, '_>) -> ProcessResult<()> {
        let memory = ctx.memory()?;
        let ticks = memory.get(TICKS_KEY).and_then(Value::as_u64).unwrap_or(0) + 1;
        if let Some(fields) = memory.as_object_mut() {
            fields.insert(TICKS_KEY.to_string(), Value::from(ticks));
        }

        info!(ticks, "init process running");
        Ok(())
    }
}

impl ProcessKind for InitProcess {
    const TYPE_TAG: &'static str = "init";

    fn create(_init: ProcessInit) -> Self {
        InitProcess
    }
}
