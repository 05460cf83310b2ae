//! Histogram metrics

use super::labels;
use metrics::histogram;
use std::time::Duration;

/// Wall-clock time of a successful resolution, including the transport handshake
#[inline]
pub fn resolve_duration(mode: &'static str, elapsed: Duration) {
    histogram!(super::RESOLVE_DURATION, labels::MODE => mode).record(elapsed.as_secs_f64());
}
