/*!
 * Monitoring Module
 * Tracing subscriber setup and tick spans
 */

mod tracer;

pub use tracer::{init_tracing, TickSpan, TRACE_JSON_ENV};
