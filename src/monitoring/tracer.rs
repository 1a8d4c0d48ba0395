/*!
 * Structured Tracing
 * Subscriber setup and per-tick spans using the tracing crate
 *
 * Features:
 * - Env-filtered output (RUST_LOG, default info)
 * - Optional JSON-formatted logs for structured parsing
 * - One span per host invocation with the tick summary recorded on close
 */

use crate::kernel::TickReport;
use std::time::Instant;
use tracing::{debug, info, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable that switches the subscriber to JSON output
pub const TRACE_JSON_ENV: &str = "TICK_KERNEL_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - TICK_KERNEL_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Span covering one host invocation (load, run, save)
pub struct TickSpan {
    span: Span,
    start: Instant,
    tick: u64,
}

impl TickSpan {
    pub fn new(tick: u64, budget: f64) -> Self {
        let span = span!(
            Level::INFO,
            "tick",
            tick = tick,
            budget = budget,
            ran = tracing::field::Empty,
            skipped = tracing::field::Empty,
            terminated = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
            tick,
        }
    }

    /// The underlying span, for entering around kernel calls
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Record the outcome of the scheduling pass
    pub fn record_report(&self, report: &TickReport) {
        self.span.record("ran", report.ran.len());
        self.span.record("skipped", report.skipped.len());
        self.span.record("terminated", report.terminated.len());
    }

    /// Close the span, recording its wall-clock duration
    pub fn finish(self) {
        let elapsed = self.start.elapsed();
        self.span.record("duration_us", elapsed.as_micros() as u64);
        let _entered = self.span.enter();
        debug!(tick = self.tick, duration_us = elapsed.as_micros() as u64, "tick finished");
    }
}
