/*!
 * Store Module
 * Persisted kernel state and its host-side file backing
 */

mod file;
mod types;

pub use file::FileStore;
pub use types::{KernelMemory, KernelParameters, SerializedProcess, SerializedProcessTable};
