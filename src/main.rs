/*!
 * Tick Kernel - Demo Host
 *
 * Simulates the host environment: each tick loads the persisted store,
 * builds a fresh kernel, runs one scheduling pass under a wall-clock budget
 * and writes the store back.
 */

use miette::Result;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

use tick_kernel::{
    init_tracing, run_tick, FileStore, InitProcess, KernelConfig, ProcessKind, Registry,
    TickSpan, WallClockMeter,
};

const STORE_PATH_ENV: &str = "TICK_KERNEL_STORE_PATH";
const TICKS_ENV: &str = "TICK_KERNEL_TICKS";
const BUDGET_MS_ENV: &str = "TICK_KERNEL_BUDGET_MS";

const DEFAULT_TICKS: u64 = 1;
const DEFAULT_BUDGET_MS: f64 = 50.0;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring invalid environment override");
            default
        }),
        Err(_) => default,
    }
}

fn main() -> Result<()> {
    init_tracing();

    let store_path = std::env::var(STORE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("tick-kernel.json"));
    let ticks = env_or(TICKS_ENV, DEFAULT_TICKS);
    let budget = env_or(BUDGET_MS_ENV, DEFAULT_BUDGET_MS);
    let config = KernelConfig::from_env();

    info!(
        store = %store_path.display(),
        ticks,
        budget_ms = budget,
        pid_max = config.pid_max,
        "Tick kernel host starting"
    );

    Registry::global().register_kind::<InitProcess>();
    let store = FileStore::new(store_path);

    for tick in 0..ticks {
        let span = TickSpan::new(tick, budget);
        let entered = span.span().enter();

        let meter = WallClockMeter::start();
        let report = run_tick(
            &store,
            Registry::global(),
            config,
            InitProcess::TYPE_TAG,
            budget,
            &meter,
        )?;
        span.record_report(&report);

        drop(entered);
        span.finish();
    }

    info!("Tick kernel host finished");
    Ok(())
}
