/*!
 * Host Invocation
 * One complete tick against a file-backed store
 */

use super::boot::boot;
use super::budget::UsageMeter;
use super::report::TickReport;
use super::Kernel;
use crate::core::errors::KernelResult;
use crate::core::KernelConfig;
use crate::process::Registry;
use crate::store::FileStore;

/// Load the store, boot `root_tag` if needed, run one pass and save
///
/// Nothing is written back when the pass hits a fatal kernel error.
///
/// # Errors
/// Store I/O and parse failures surface as `KernelError::Store`; fatal
/// kernel errors are returned as-is.
pub fn run_tick(
    store: &FileStore,
    registry: &Registry,
    config: KernelConfig,
    root_tag: &str,
    budget: f64,
    meter: &dyn UsageMeter,
) -> KernelResult<TickReport> {
    let mut memory = store.load()?;
    let report = {
        let mut kernel = Kernel::with_registry(&mut memory, registry).with_config(config);
        kernel.load_process_table();
        boot(&mut kernel, root_tag)?;
        let report = kernel.run(budget, meter)?;
        kernel.save_process_table();
        report
    };
    store.save(&memory)?;
    Ok(report)
}
