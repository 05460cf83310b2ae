//! Seams to the underlying graph client and the discovery service client.
//!
//! This crate does not speak either protocol. Implementations of these traits do, and
//! report their failures as [`crate::Error`] (typically [`crate::Error::Connection`] or
//! [`crate::Error::Transport`]). The resolver passes those errors through unchanged.

use super::plan::{AuthRequest, DirectConfig, DiscoveryTarget};
use crate::Result;

/// A connected graph-service client.
///
/// The manager accessors are thin views into the same underlying connection.
#[allow(async_fn_in_trait)]
pub trait GraphClient {
    /// Schema manager
    type Schema;
    /// Graph (vertex/edge) manager
    type Graph;
    /// Multi-graph manager
    type Graphs;
    /// Traversal manager
    type Traverser;
    /// Task manager
    type Tasks;
    /// Gremlin query manager
    type Gremlin;
    /// Auth manager
    type Auth;

    /// Schema manager
    fn schema(&self) -> &Self::Schema;

    /// Graph manager
    fn graph(&self) -> &Self::Graph;

    /// Multi-graph manager
    fn graphs(&self) -> &Self::Graphs;

    /// Traversal manager
    fn traverser(&self) -> &Self::Traverser;

    /// Task manager
    fn tasks(&self) -> &Self::Tasks;

    /// Gremlin manager
    fn gremlin(&self) -> &Self::Gremlin;

    /// Auth manager
    fn auth(&self) -> &Self::Auth;

    /// Release the connection
    async fn close(self) -> Result<()>;
}

/// Opens direct connections.
#[allow(async_fn_in_trait)]
pub trait GraphClientFactory {
    /// Client produced by this factory
    type Client: GraphClient;

    /// Open `config`. Unreachable endpoints and invalid TLS material fail here.
    async fn open(&self, config: &DirectConfig) -> Result<Self::Client>;
}

/// Opens transient connections to the discovery service.
#[allow(async_fn_in_trait)]
pub trait DiscoveryFactory {
    /// Client handed out by the discovery connection
    type Client: GraphClient;
    /// Discovery connection
    type Connection: DiscoveryConnection<Client = Self::Client>;

    /// Connect to the discovery service described by `target`
    async fn connect(&self, target: &DiscoveryTarget) -> Result<Self::Connection>;
}

/// A live discovery service connection.
#[allow(async_fn_in_trait)]
pub trait DiscoveryConnection {
    /// Client created through this connection
    type Client: GraphClient;

    /// Locate the cluster and authenticate, returning a connected client
    async fn create_authenticated_client(&mut self, request: &AuthRequest) -> Result<Self::Client>;

    /// Release the connection
    async fn close(self);
}
