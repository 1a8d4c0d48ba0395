/*!
 * Built-in Processes
 */

mod init;

pub use init::InitProcess;
