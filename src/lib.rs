//! hugegraph-tools-client: connection bootstrap for the HugeGraph tools
//!
//! Given user-supplied [`ConnectionParameters`], a [`ConnectionResolver`] decides how
//! to reach the graph service and returns a [`ClientHandle`]:
//!
//! * **Direct mode**: an `http://` or `https://` endpoint URL. HTTPS endpoints get a
//!   trust store, either the one supplied by the caller or
//!   `<installation root>/conf/hugegraph.truststore`.
//! * **Meta mode**: no URL; a discovery service (etcd, PD) is contacted to
//!   authenticate and locate the cluster. The discovery connection is always released
//!   before `resolve` returns.
//!
//! The graph protocol and the discovery protocol are not implemented here. They are
//! plugged in through [`GraphClientFactory`] and [`DiscoveryFactory`].
//!
//! ```ignore
//! use hugegraph_tools_client::{ConnectionParameters, ConnectionResolver, ResolverConfig};
//!
//! let params = ConnectionParameters::direct("https://graph.example.com:8443", "DEFAULT", "hugegraph");
//! let resolver = ConnectionResolver::new(ResolverConfig::from_env(), http_factory, etcd_factory);
//! let client = resolver.resolve(&params).await?;
//! let schema = client.schema();
//! client.close().await?;
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod connection;
pub mod error;
pub mod logging;
pub mod metrics;

pub use client::{ClientHandle, ConnectionResolver, Mapper, ResolverConfig};
pub use connection::{
    ConnectionParameters, ConnectionPlan, Credentials, DirectConfig, DiscoveryConnection,
    DiscoveryFactory, GraphClient, GraphClientFactory, MetaBackend, MetaConfig, Scheme,
    TrustStore,
};
pub use error::{Error, Result};
