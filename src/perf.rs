//! Timing instrumentation for the pointer and frame hot paths.
//!
//! Every pointer event runs a hit test and a handler `move`; every animation
//! frame may run an auto-scroll step. Those paths carry scope timers that
//! compile away unless the `profiling` feature is enabled.
//!
//! ```toml
//! [dependencies]
//! flowcanvas = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn rebuild_guides() {
//!     flowcanvas::profile_scope!("rebuild_guides");
//! }
//! ```

use std::cell::Cell;
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// One frame at 60 Hz
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Budget for scopes opened by `profile_scope!` without an explicit one
pub const PROFILE_BUDGET_MS: f64 = 1.0;

/// Times the enclosing scope when the `profiling` feature is on.
///
/// `profile_scope!("name")` uses [`PROFILE_BUDGET_MS`];
/// `profile_scope!("name", ms)` sets the budget explicitly.
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        $crate::profile_scope!($label, $crate::perf::PROFILE_BUDGET_MS)
    };
    ($label:expr, $budget_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::with_budget($label, $budget_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($label, $budget_ms);
    };
}

thread_local! {
    static OPEN_TIMERS: Cell<usize> = const { Cell::new(0) };
}

/// Reports a scope that ran past its budget when dropped.
///
/// Nested timers remember how deep they were opened; under `profiling` the
/// report is indented by that depth and logged at `trace!`, otherwise an
/// over-budget scope logs one structured `warn!`.
pub struct ScopedTimer {
    label: &'static str,
    started: Instant,
    budget_ms: f64,
    depth: usize,
}

impl ScopedTimer {
    pub fn with_budget(label: &'static str, budget_ms: f64) -> Self {
        let depth = OPEN_TIMERS.with(|open| {
            let depth = open.get();
            open.set(depth + 1);
            depth
        });

        Self {
            label,
            started: Instant::now(),
            budget_ms,
            depth,
        }
    }

    /// Budget of one animation frame.
    pub fn frame(label: &'static str) -> Self {
        Self::with_budget(label, TARGET_FRAME_MS)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        OPEN_TIMERS.with(|open| open.set(open.get().saturating_sub(1)));

        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.budget_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("{}{} took {:.2}ms", "  ".repeat(self.depth), self.label, elapsed_ms);

        #[cfg(not(feature = "profiling"))]
        warn!(
            scope = self.label,
            depth = self.depth,
            elapsed_ms = format!("{elapsed_ms:.2}"),
            budget_ms = format!("{:.2}", self.budget_ms),
            "Canvas operation over budget"
        );
    }
}

/// Runs `f`, returning its value and how long it took in milliseconds.
#[inline]
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed().as_secs_f64() * 1000.0)
}

/// Runs `f` and warns when it takes longer than `budget_ms`, with or without
/// the `profiling` feature.
#[inline]
pub fn warn_if_slow<T>(label: &str, budget_ms: f64, f: impl FnOnce() -> T) -> T {
    let (value, elapsed_ms) = timed(f);
    if elapsed_ms > budget_ms {
        warn!(
            scope = label,
            elapsed_ms = format!("{elapsed_ms:.2}"),
            budget_ms = format!("{budget_ms:.2}"),
            "Canvas operation over budget"
        );
    }
    value
}
