/*!
 * Bootstrap
 * Ensures a root process exists before the first scheduling pass
 */

use super::Kernel;
use crate::core::errors::KernelResult;
use crate::core::types::{Pid, ROOT_PID};
use tracing::info;

/// Spawn `root_tag` at PID 0 unless a live root is already present
///
/// Returns the root PID when one was created, `None` when the loaded table
/// already had it. A fresh root is saved immediately so it survives a pass
/// that never reaches `save_process_table`.
///
/// # Errors
/// `UnknownTypeTag` if `root_tag` is not registered, `DuplicatePid` if a
/// dead root still occupies PID 0 in the live table.
pub fn boot(kernel: &mut Kernel<'_>, root_tag: &str) -> KernelResult<Option<Pid>> {
    if kernel.get_process_by_id(ROOT_PID).is_some() {
        return Ok(None);
    }

    info!("Welcome! Starting the root process");
    let pid = kernel.spawn_root(root_tag)?;
    info!(pid, type_tag = root_tag, "Root process online");
    kernel.save_process_table();
    Ok(Some(pid))
}
