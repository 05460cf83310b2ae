//! ConnectionResolver implementation

use super::handle::ClientHandle;
use crate::connection::{
    ConnectionParameters, ConnectionPlan, DirectConfig, DiscoveryConnection, DiscoveryFactory,
    GraphClientFactory, MetaConfig,
};
use crate::metrics::{counters, histograms, labels};
use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Instrument;

/// Environment variable naming the tools installation root
pub const TOOLS_HOME_ENV: &str = "HUGEGRAPH_TOOLS_HOME";

/// Process-level settings consulted during resolution.
///
/// The hosting tool sets these once, before the first `https` resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    installation_root: Option<PathBuf>,
}

impl ResolverConfig {
    /// Empty configuration (no installation root)
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the installation root from [`TOOLS_HOME_ENV`]
    pub fn from_env() -> Self {
        Self::from_os_var(std::env::var_os(TOOLS_HOME_ENV))
    }

    fn from_os_var(value: Option<OsString>) -> Self {
        Self {
            installation_root: value.filter(|root| !root.is_empty()).map(PathBuf::from),
        }
    }

    /// Set the installation root, which anchors the default trust store
    pub fn with_installation_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.installation_root = Some(root.into());
        self
    }

    /// Installation root, if set and non-empty
    pub fn installation_root(&self) -> Option<&Path> {
        self.installation_root
            .as_deref()
            .filter(|root| !root.as_os_str().is_empty())
    }
}

/// Turns [`ConnectionParameters`] into a connected [`ClientHandle`].
///
/// `F` opens direct connections; `D` reaches the discovery service. Both must produce
/// the same client type.
///
/// # Examples
///
/// ```ignore
/// let resolver = ConnectionResolver::new(ResolverConfig::from_env(), http_factory, etcd_factory);
///
/// // Direct
/// let params = ConnectionParameters::direct("http://localhost:8080", "DEFAULT", "hugegraph");
/// let client = resolver.resolve(&params).await?;
///
/// // Through the discovery service
/// let params = ConnectionParameters::meta("etcd", ["127.0.0.1:2379"], "hg", "DEFAULT", "hugegraph")
///     .with_credentials("admin", "secret");
/// let client = resolver.resolve(&params).await?;
/// ```
#[derive(Debug)]
pub struct ConnectionResolver<F, D> {
    config: ResolverConfig,
    graph_factory: F,
    discovery_factory: D,
}

impl<F, D> ConnectionResolver<F, D>
where
    F: GraphClientFactory,
    D: DiscoveryFactory<Client = F::Client>,
{
    /// Create a resolver
    pub fn new(config: ResolverConfig, graph_factory: F, discovery_factory: D) -> Self {
        Self {
            config,
            graph_factory,
            discovery_factory,
        }
    }

    /// Resolver settings
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Validate `params` and choose a strategy without any network I/O
    pub fn plan(&self, params: &ConnectionParameters) -> Result<ConnectionPlan> {
        ConnectionPlan::build(params, self.config.installation_root())
    }

    /// Resolve `params` into a connected client.
    ///
    /// # Errors
    ///
    /// * [`crate::Error::Config`] for invalid parameters, before any connection attempt.
    /// * Whatever the factories return when the transport or authentication fails,
    ///   unchanged.
    pub async fn resolve(&self, params: &ConnectionParameters) -> Result<ClientHandle<F::Client>> {
        let mode = if params.is_direct() {
            labels::MODE_DIRECT
        } else {
            labels::MODE_META
        };
        let started = Instant::now();
        counters::resolve_attempted(mode);

        let result = async {
            let client = match self.plan(params)? {
                ConnectionPlan::Direct(config) => self.open_direct(&config).await?,
                ConnectionPlan::Meta(config) => self.open_meta(&config).await?,
            };
            tracing::info!("client connected");
            Ok::<_, Error>(ClientHandle::new(client))
        }
        .instrument(tracing::info_span!("resolve", mode))
        .await;

        match &result {
            Ok(_) => {
                counters::resolve_succeeded(mode);
                histograms::resolve_duration(mode, started.elapsed());
            }
            Err(e) => {
                tracing::debug!(error = %e, mode, "resolve failed");
                counters::resolve_failed(mode, e.category());
            }
        }
        result
    }

    async fn open_direct(&self, config: &DirectConfig) -> Result<F::Client> {
        if let Some(store) = config.trust_store() {
            if store.is_default() && !store.path().exists() {
                tracing::warn!(
                    path = %store.path().display(),
                    "default trust store not found"
                );
            }
        }
        tracing::debug!(endpoint = config.endpoint(), "opening direct connection");
        self.graph_factory.open(config).await
    }

    async fn open_meta(&self, config: &MetaConfig) -> Result<F::Client> {
        let target = config.target();
        let auth = config.auth();
        tracing::debug!(backend = %target.backend, "connecting to discovery service");
        let mut connection = self.discovery_factory.connect(target).await?;

        // Release the discovery connection on both outcomes before returning.
        let result = connection.create_authenticated_client(auth).await;
        connection.close().await;
        counters::discovery_session_closed(target.backend.as_str());

        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                cluster = auth.cluster.as_deref().unwrap_or_default(),
                graph_space = auth.graph_space.as_deref().unwrap_or_default(),
                graph = auth.graph.as_deref().unwrap_or_default(),
                "authentication through discovery service failed"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_config_installation_root() {
        let config = ResolverConfig::new();
        assert_eq!(config.installation_root(), None);

        let config = ResolverConfig::new().with_installation_root("/opt/tool");
        assert_eq!(config.installation_root(), Some(Path::new("/opt/tool")));

        let config = ResolverConfig::new().with_installation_root("");
        assert_eq!(config.installation_root(), None);
    }

    #[test]
    fn test_resolver_config_from_os_var() {
        let config = ResolverConfig::from_os_var(Some(OsString::from("/opt/hugegraph-tools")));
        assert_eq!(
            config.installation_root(),
            Some(Path::new("/opt/hugegraph-tools"))
        );

        let config = ResolverConfig::from_os_var(Some(OsString::new()));
        assert_eq!(config.installation_root(), None);

        let config = ResolverConfig::from_os_var(None);
        assert_eq!(config.installation_root(), None);
    }
}
