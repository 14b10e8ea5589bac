//! Performance instrumentation for event-handling hot paths.
//!
//! Pointer-move handling runs 60+ times per second during a drag, so the
//! input modules carry lightweight scoped timers. Zero-cost unless the
//! `profiling` feature is enabled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::trace;

/// Global flag to enable/disable profiling at runtime.
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
}

pub use profile_scope;

/// Enable or disable profiling at runtime.
/// Note: This only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if profiling is currently enabled.
#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer that traces the elapsed time of a scope on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if is_profiling_enabled() {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            trace!(scope = self.name, elapsed_ms = ms, "scope timing");
        }
    }
}
