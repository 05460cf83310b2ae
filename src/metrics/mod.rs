//! Metrics for connection resolution, recorded through the `metrics` facade.
//!
//! Nothing is exported unless the hosting process installs a recorder.
//!
//! ## Naming
//!
//! All metrics follow `hugegraph_tools_{name}_{unit}`:
//!
//! - Counters: `_total` suffix
//! - Histograms: `_seconds` suffix

pub mod counters;
pub mod histograms;
pub mod labels;

pub(crate) const RESOLVE_ATTEMPTED: &str = "hugegraph_tools_resolve_attempted_total";
pub(crate) const RESOLVE_SUCCEEDED: &str = "hugegraph_tools_resolve_succeeded_total";
pub(crate) const RESOLVE_FAILED: &str = "hugegraph_tools_resolve_failed_total";
pub(crate) const DISCOVERY_SESSIONS_CLOSED: &str = "hugegraph_tools_discovery_sessions_closed_total";
pub(crate) const RESOLVE_DURATION: &str = "hugegraph_tools_resolve_duration_seconds";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_carry_unit_suffix() {
        for name in [
            RESOLVE_ATTEMPTED,
            RESOLVE_SUCCEEDED,
            RESOLVE_FAILED,
            DISCOVERY_SESSIONS_CLOSED,
        ] {
            assert!(name.starts_with("hugegraph_tools_"), "{}", name);
            assert!(name.ends_with("_total"), "{}", name);
        }
        assert_eq!(RESOLVE_DURATION, "hugegraph_tools_resolve_duration_seconds");
    }
}
