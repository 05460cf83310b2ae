//! Counter metrics

use super::labels;
use metrics::counter;

/// A resolution was started
#[inline]
pub fn resolve_attempted(mode: &'static str) {
    counter!(super::RESOLVE_ATTEMPTED, labels::MODE => mode).increment(1);
}

/// A resolution produced a client handle
#[inline]
pub fn resolve_succeeded(mode: &'static str) {
    counter!(super::RESOLVE_SUCCEEDED, labels::MODE => mode).increment(1);
}

/// A resolution failed; `category` is [`crate::Error::category`]
#[inline]
pub fn resolve_failed(mode: &'static str, category: &'static str) {
    counter!(
        super::RESOLVE_FAILED,
        labels::MODE => mode,
        labels::CATEGORY => category
    )
    .increment(1);
}

/// A transient discovery connection was released
#[inline]
pub fn discovery_session_closed(backend: &'static str) {
    counter!(super::DISCOVERY_SESSIONS_CLOSED, labels::BACKEND => backend).increment(1);
}
