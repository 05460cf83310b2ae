//! Label keys and well-known label values

/// Connection mode label key
pub const MODE: &str = "mode";
/// Error category label key
pub const CATEGORY: &str = "category";
/// Discovery backend label key
pub const BACKEND: &str = "backend";

/// Direct endpoint connection
pub const MODE_DIRECT: &str = "direct";
/// Connection through the discovery service
pub const MODE_META: &str = "meta";
