//! Connection plan: the validated outcome of inspecting [`ConnectionParameters`].
//!
//! Planning performs no network I/O. Every parameter error is reported here, so a plan
//! that builds can only fail later on the transport itself.

use super::params::{non_empty, ConnectionParameters, Credentials};
use super::tls::{resolve_trust_store, MetaTlsMaterial, Scheme, TrustStore};
use crate::metrics::labels;
use crate::{Error, Result};
use std::path::Path;
use std::time::Duration;

/// Discovery service backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaBackend {
    /// etcd cluster
    Etcd,
    /// Placement driver
    Pd,
}

impl MetaBackend {
    /// Lowercase name of the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Etcd => "etcd",
            Self::Pd => "pd",
        }
    }
}

impl std::fmt::Display for MetaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetaBackend {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETCD" => Ok(Self::Etcd),
            "PD" => Ok(Self::Pd),
            _ => Err(Error::Config(format!(
                "invalid meta type '{}': expected etcd or pd",
                s
            ))),
        }
    }
}

/// Configuration for a direct connection to a graph-service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectConfig {
    endpoint: String,
    scheme: Scheme,
    graph_space: Option<String>,
    graph: Option<String>,
    credentials: Credentials,
    timeout: Option<Duration>,
    trust_store: Option<TrustStore>,
}

impl DirectConfig {
    /// Start building a configuration for `endpoint`.
    ///
    /// # Errors
    ///
    /// Fails if the endpoint scheme is neither `http` nor `https`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = DirectConfig::builder("https://host:8443", Some("DEFAULT"), Some("hugegraph"))?
    ///     .credentials(Credentials::new("admin", "secret"))
    ///     .timeout(Duration::from_secs(30))
    ///     .trust_store(TrustStore::custom("x.jks", "changeit"))
    ///     .build();
    /// ```
    pub fn builder(
        endpoint: impl Into<String>,
        graph_space: Option<&str>,
        graph: Option<&str>,
    ) -> Result<DirectConfigBuilder> {
        let endpoint = endpoint.into();
        let scheme = Scheme::of_url(&endpoint)?;
        Ok(DirectConfigBuilder {
            config: DirectConfig {
                endpoint,
                scheme,
                graph_space: graph_space.map(str::to_string),
                graph: graph.map(str::to_string),
                credentials: Credentials::anonymous(),
                timeout: None,
                trust_store: None,
            },
        })
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Endpoint scheme
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Target graph space
    pub fn graph_space(&self) -> Option<&str> {
        self.graph_space.as_deref()
    }

    /// Target graph
    pub fn graph(&self) -> Option<&str> {
        self.graph.as_deref()
    }

    /// Credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Request timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Trust store (`https` only)
    pub fn trust_store(&self) -> Option<&TrustStore> {
        self.trust_store.as_ref()
    }
}

/// Builder for [`DirectConfig`]
#[derive(Debug, Clone)]
pub struct DirectConfigBuilder {
    config: DirectConfig,
}

impl DirectConfigBuilder {
    /// Set the credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the trust store
    pub fn trust_store(mut self, trust_store: TrustStore) -> Self {
        self.config.trust_store = Some(trust_store);
        self
    }

    /// Finish the configuration
    pub fn build(self) -> DirectConfig {
        self.config
    }
}

/// Where and how to reach the discovery service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryTarget {
    /// Backend kind
    pub backend: MetaBackend,
    /// Endpoints, in the order given by the user (never empty)
    pub endpoints: Vec<String>,
    /// Optional TLS material for the discovery connection
    pub tls: MetaTlsMaterial,
}

/// Request for an authenticated graph client, sent over the discovery connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    /// Cluster name
    pub cluster: Option<String>,
    /// Graph space
    pub graph_space: Option<String>,
    /// Graph
    pub graph: Option<String>,
    /// Reusable token; always `None` from the resolver, which authenticates afresh
    pub token: Option<String>,
    /// Credentials
    pub credentials: Credentials,
}

/// Configuration for a connection obtained through the discovery service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaConfig {
    target: DiscoveryTarget,
    auth: AuthRequest,
}

impl MetaConfig {
    /// Discovery service to contact
    pub fn target(&self) -> &DiscoveryTarget {
        &self.target
    }

    /// Authentication request to send
    pub fn auth(&self) -> &AuthRequest {
        &self.auth
    }
}

/// The connection strategy chosen for a set of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionPlan {
    /// Connect straight to the endpoint URL
    Direct(DirectConfig),
    /// Authenticate through the discovery service
    Meta(MetaConfig),
}

impl ConnectionPlan {
    /// Validate `params` and pick the connection strategy.
    ///
    /// `installation_root` anchors the default trust store and is only consulted for
    /// `https` endpoints without a custom trust store.
    pub fn build(params: &ConnectionParameters, installation_root: Option<&Path>) -> Result<Self> {
        let credentials = params.effective_credentials();

        match params.endpoint_url() {
            Some(url) => Self::direct(params, url, credentials, installation_root),
            None => Self::meta(params, credentials),
        }
    }

    fn direct(
        params: &ConnectionParameters,
        url: &str,
        credentials: Credentials,
        installation_root: Option<&Path>,
    ) -> Result<Self> {
        let builder = DirectConfig::builder(
            url,
            non_empty(&params.graph_space),
            non_empty(&params.graph),
        )?;
        let scheme = builder.config.scheme;

        let trust_store = resolve_trust_store(
            scheme,
            params.trust_store_file(),
            params.trust_store_password(),
            installation_root,
        )?;
        tracing::debug!(%scheme, tls = trust_store.is_some(), "direct connection planned");

        let mut builder = builder
            .credentials(credentials)
            .timeout(params.timeout);
        if let Some(trust_store) = trust_store {
            builder = builder.trust_store(trust_store);
        }
        Ok(Self::Direct(builder.build()))
    }

    fn meta(params: &ConnectionParameters, credentials: Credentials) -> Result<Self> {
        let endpoints: Vec<String> = params
            .meta_urls
            .iter()
            .filter(|url| !url.is_empty())
            .cloned()
            .collect();
        if endpoints.is_empty() {
            return Err(Error::Config(
                "the meta endpoints can't be empty when no url is given".into(),
            ));
        }

        let backend: MetaBackend = non_empty(&params.meta_type)
            .ok_or_else(|| {
                Error::Config("meta type is required when no url is given".into())
            })?
            .parse()?;

        let mut tls = MetaTlsMaterial::new();
        if let Some(ca) = non_empty(&params.meta_ca) {
            tls = tls.ca_cert(ca);
        }
        if let Some(cert) = non_empty(&params.meta_client_ca) {
            tls = tls.client_cert(cert);
        }
        if let Some(key) = non_empty(&params.meta_client_key) {
            tls = tls.client_key(key);
        }
        tls.validate()?;
        tracing::debug!(
            %backend,
            endpoints = endpoints.len(),
            tls = !tls.is_empty(),
            "meta connection planned"
        );

        Ok(Self::Meta(MetaConfig {
            target: DiscoveryTarget {
                backend,
                endpoints,
                tls,
            },
            auth: AuthRequest {
                cluster: non_empty(&params.cluster).map(str::to_string),
                graph_space: non_empty(&params.graph_space).map(str::to_string),
                graph: non_empty(&params.graph).map(str::to_string),
                token: None,
                credentials,
            },
        }))
    }

    /// Metrics/log label for the mode
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Direct(_) => labels::MODE_DIRECT,
            Self::Meta(_) => labels::MODE_META,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::tls::DEFAULT_TRUST_STORE_PASSWORD;

    fn root() -> Option<&'static Path> {
        Some(Path::new("/opt/tool"))
    }

    #[test]
    fn test_meta_backend_from_str() {
        assert_eq!("etcd".parse::<MetaBackend>().unwrap(), MetaBackend::Etcd);
        assert_eq!("ETCD".parse::<MetaBackend>().unwrap(), MetaBackend::Etcd);
        assert_eq!("Pd".parse::<MetaBackend>().unwrap(), MetaBackend::Pd);
        assert!("zookeeper".parse::<MetaBackend>().unwrap_err().is_config());
    }

    #[test]
    fn test_meta_backend_display() {
        assert_eq!(MetaBackend::Etcd.to_string(), "etcd");
        assert_eq!(MetaBackend::Pd.to_string(), "pd");
    }

    #[test]
    fn test_plan_http_anonymous() {
        let params = ConnectionParameters::direct("http://host:8080", "DEFAULT", "hugegraph");
        let plan = ConnectionPlan::build(&params, None).unwrap();

        let ConnectionPlan::Direct(config) = plan else {
            panic!("expected direct plan");
        };
        assert_eq!(config.endpoint(), "http://host:8080");
        assert_eq!(config.scheme(), Scheme::Http);
        assert_eq!(config.credentials(), &Credentials::anonymous());
        assert_eq!(config.graph_space(), Some("DEFAULT"));
        assert_eq!(config.graph(), Some("hugegraph"));
        assert!(config.trust_store().is_none());
    }

    #[test]
    fn test_plan_https_default_trust_store() {
        let params = ConnectionParameters::direct("https://host:8443", "DEFAULT", "hugegraph")
            .with_timeout(Duration::from_secs(20));
        let ConnectionPlan::Direct(config) = ConnectionPlan::build(&params, root()).unwrap() else {
            panic!("expected direct plan");
        };

        let store = config.trust_store().unwrap();
        assert_eq!(store.path(), Path::new("/opt/tool/conf/hugegraph.truststore"));
        assert_eq!(store.password(), DEFAULT_TRUST_STORE_PASSWORD);
        assert_eq!(config.timeout(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_plan_https_without_root_fails() {
        let params = ConnectionParameters::direct("https://host:8443", "DEFAULT", "hugegraph");
        assert!(ConnectionPlan::build(&params, None).unwrap_err().is_config());
    }

    #[test]
    fn test_plan_url_takes_precedence_over_meta() {
        let mut params = ConnectionParameters::direct("http://host:8080", "DEFAULT", "hugegraph");
        params.meta_type = Some("etcd".into());
        params.meta_urls = vec!["127.0.0.1:2379".into()];

        let plan = ConnectionPlan::build(&params, None).unwrap();
        assert_eq!(plan.mode(), labels::MODE_DIRECT);
    }

    #[test]
    fn test_plan_meta() {
        let params = ConnectionParameters::meta(
            "etcd",
            ["127.0.0.1:2379", "127.0.0.2:2379"],
            "hg",
            "DEFAULT",
            "hugegraph",
        )
        .with_credentials("admin", "secret")
        .with_meta_tls(Some("ca.pem".into()), None, None);

        let ConnectionPlan::Meta(config) = ConnectionPlan::build(&params, None).unwrap() else {
            panic!("expected meta plan");
        };
        assert_eq!(config.target().backend, MetaBackend::Etcd);
        assert_eq!(config.target().endpoints, vec!["127.0.0.1:2379", "127.0.0.2:2379"]);
        assert_eq!(config.target().tls.ca_cert_path(), Some(Path::new("ca.pem")));
        assert_eq!(config.auth().cluster.as_deref(), Some("hg"));
        assert_eq!(config.auth().token, None);
        assert_eq!(config.auth().credentials, Credentials::new("admin", "secret"));
    }

    #[test]
    fn test_plan_meta_empty_endpoints() {
        let params = ConnectionParameters::meta("etcd", Vec::<String>::new(), "hg", "DEFAULT", "g");
        let err = ConnectionPlan::build(&params, None).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("meta endpoints"));
    }

    #[test]
    fn test_plan_meta_missing_or_unknown_type() {
        let mut params = ConnectionParameters::meta("consul", ["127.0.0.1:8500"], "hg", "DEFAULT", "g");
        assert!(ConnectionPlan::build(&params, None).unwrap_err().is_config());

        params.meta_type = None;
        let err = ConnectionPlan::build(&params, None).unwrap_err();
        assert!(err.to_string().contains("meta type is required"));
    }

    #[test]
    fn test_plan_meta_unpaired_client_cert() {
        let params = ConnectionParameters::meta("pd", ["127.0.0.1:8686"], "hg", "DEFAULT", "g")
            .with_meta_tls(None, Some("client.pem".into()), None);
        assert!(ConnectionPlan::build(&params, None).unwrap_err().is_config());
    }

    #[test]
    fn test_direct_config_builder_rejects_bad_scheme() {
        assert!(DirectConfig::builder("tcp://host:8080", None, None)
            .unwrap_err()
            .is_config());
    }
}
