//! ClientHandle implementation

use super::mapper::Mapper;
use crate::connection::GraphClient;
use crate::Result;

/// A connected client plus the managers the tools work with.
///
/// Every accessor delegates to the same underlying connection. The handle is closed
/// exactly once by consuming it with [`ClientHandle::close`].
pub struct ClientHandle<C> {
    client: C,
    mapper: Mapper,
}

impl<C: GraphClient> ClientHandle<C> {
    /// Wrap a connected client
    pub fn new(client: C) -> Self {
        Self {
            client,
            mapper: Mapper::new(),
        }
    }

    /// Schema manager
    pub fn schema(&self) -> &C::Schema {
        self.client.schema()
    }

    /// Graph manager
    pub fn graph(&self) -> &C::Graph {
        self.client.graph()
    }

    /// Multi-graph manager
    pub fn graphs(&self) -> &C::Graphs {
        self.client.graphs()
    }

    /// Traversal manager
    pub fn traverser(&self) -> &C::Traverser {
        self.client.traverser()
    }

    /// Task manager
    pub fn tasks(&self) -> &C::Tasks {
        self.client.tasks()
    }

    /// Gremlin manager
    pub fn gremlin(&self) -> &C::Gremlin {
        self.client.gremlin()
    }

    /// Auth manager
    pub fn auth_manager(&self) -> &C::Auth {
        self.client.auth()
    }

    /// JSON mapper shared by everything using this handle
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// The underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Close the underlying connection.
    ///
    /// The handle is consumed, so neither a second `close` nor an accessor call can
    /// follow it:
    ///
    /// ```compile_fail
    /// use hugegraph_tools_client::{ClientHandle, GraphClient};
    ///
    /// async fn schema_after_close<C: GraphClient>(handle: ClientHandle<C>) {
    ///     handle.close().await.ok();
    ///     let _ = handle.schema();
    /// }
    /// ```
    pub async fn close(self) -> Result<()> {
        tracing::debug!("closing client");
        self.client.close().await
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for ClientHandle<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
