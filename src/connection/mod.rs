//! Connection parameters, planning and TLS material
//!
//! This module handles:
//! * User-facing connection parameters and credential normalization
//! * The direct vs. discovery decision and its validation rules
//! * Trust store selection for `https` endpoints
//! * TLS material for the discovery service
//! * The traits the underlying clients implement

mod factory;
mod params;
mod plan;
mod tls;

pub use factory::{DiscoveryConnection, DiscoveryFactory, GraphClient, GraphClientFactory};
pub use params::{ConnectionParameters, Credentials};
pub use plan::{
    AuthRequest, ConnectionPlan, DirectConfig, DirectConfigBuilder, DiscoveryTarget, MetaBackend,
    MetaConfig,
};
pub use tls::{
    resolve_trust_store, MetaTlsMaterial, Scheme, TrustStore, DEFAULT_TRUST_STORE_FILE,
    DEFAULT_TRUST_STORE_PASSWORD,
};
