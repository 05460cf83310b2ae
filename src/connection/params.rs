//! User-supplied connection parameters
//!
//! Parameters can be built in code or loaded from a JSON document:
//!
//! ```json
//! {
//!   "url": "https://graph.example.com:8443",
//!   "graphSpace": "DEFAULT",
//!   "graph": "hugegraph",
//!   "username": "admin",
//!   "password": "secret",
//!   "timeout": 30
//! }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Username/password pair sent to the graph service.
///
/// Both empty means anonymous access.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Empty username and password
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Username (empty when anonymous)
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password (empty when anonymous)
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether no username is set
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection parameters as collected by the command-line tool.
///
/// A non-empty `url` selects direct mode; otherwise the discovery (`meta_*`) fields
/// are used. Empty strings count as unset throughout.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionParameters {
    /// Graph service endpoint (`http://host:port` or `https://host:port`)
    pub url: Option<String>,
    /// Username; when unset, both username and password are sent empty
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Request timeout passed to the underlying client (whole seconds in JSON)
    #[serde(with = "timeout_secs")]
    pub timeout: Option<Duration>,
    /// Custom trust store file (https only)
    pub trust_store_file: Option<String>,
    /// Custom trust store password (https only, required with `trust_store_file`)
    pub trust_store_password: Option<String>,
    /// Discovery backend kind (`etcd`, `pd`)
    pub meta_type: Option<String>,
    /// Discovery service endpoints
    #[serde(rename = "metaURLs", alias = "metaUrls")]
    pub meta_urls: Vec<String>,
    /// CA certificate for the discovery service (PEM)
    pub meta_ca: Option<String>,
    /// Client certificate for the discovery service (PEM)
    pub meta_client_ca: Option<String>,
    /// Client private key for the discovery service (PEM)
    pub meta_client_key: Option<String>,
    /// Cluster name (meta mode)
    pub cluster: Option<String>,
    /// Graph space
    pub graph_space: Option<String>,
    /// Graph name
    pub graph: Option<String>,
}

impl ConnectionParameters {
    /// Parameters for a direct connection to `url`
    pub fn direct(
        url: impl Into<String>,
        graph_space: impl Into<String>,
        graph: impl Into<String>,
    ) -> Self {
        Self {
            url: Some(url.into()),
            graph_space: Some(graph_space.into()),
            graph: Some(graph.into()),
            ..Self::default()
        }
    }

    /// Parameters for a connection through the discovery service
    pub fn meta<I, S>(
        meta_type: impl Into<String>,
        meta_urls: I,
        cluster: impl Into<String>,
        graph_space: impl Into<String>,
        graph: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            meta_type: Some(meta_type.into()),
            meta_urls: meta_urls.into_iter().map(Into::into).collect(),
            cluster: Some(cluster.into()),
            graph_space: Some(graph_space.into()),
            graph: Some(graph.into()),
            ..Self::default()
        }
    }

    /// Load parameters from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read connection file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Set username and password
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom trust store and its password
    pub fn with_trust_store(mut self, file: impl Into<String>, password: impl Into<String>) -> Self {
        self.trust_store_file = Some(file.into());
        self.trust_store_password = Some(password.into());
        self
    }

    /// Set the discovery service TLS material
    pub fn with_meta_tls(
        mut self,
        ca: Option<String>,
        client_ca: Option<String>,
        client_key: Option<String>,
    ) -> Self {
        self.meta_ca = ca;
        self.meta_client_ca = client_ca;
        self.meta_client_key = client_key;
        self
    }

    /// Endpoint URL, if direct mode is selected
    pub fn endpoint_url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// Whether these parameters select direct mode
    pub fn is_direct(&self) -> bool {
        self.endpoint_url().is_some()
    }

    /// Credentials sent downstream.
    ///
    /// Without a username both fields are empty, even if a password was given.
    pub fn effective_credentials(&self) -> Credentials {
        match &self.username {
            None => Credentials::anonymous(),
            Some(username) => Credentials::new(
                username.as_str(),
                self.password.as_deref().unwrap_or_default(),
            ),
        }
    }

    pub(crate) fn trust_store_file(&self) -> Option<&str> {
        non_empty(&self.trust_store_file)
    }

    pub(crate) fn trust_store_password(&self) -> Option<&str> {
        non_empty(&self.trust_store_password)
    }
}

impl std::fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ConnectionParameters")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("timeout", &self.timeout)
            .field("trust_store_file", &self.trust_store_file)
            .field("trust_store_password", &redact(&self.trust_store_password))
            .field("meta_type", &self.meta_type)
            .field("meta_urls", &self.meta_urls)
            .field("meta_ca", &self.meta_ca)
            .field("meta_client_ca", &self.meta_client_ca)
            .field("meta_client_key", &self.meta_client_key)
            .field("cluster", &self.cluster)
            .field("graph_space", &self.graph_space)
            .field("graph", &self.graph)
            .finish()
    }
}

/// Treat `Some("")` as unset
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

mod timeout_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        timeout: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match timeout {
            Some(timeout) => serializer.serialize_some(&timeout.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_when_username_missing() {
        let params = ConnectionParameters::direct("http://host:8080", "DEFAULT", "hugegraph");
        let creds = params.effective_credentials();
        assert_eq!(creds.username(), "");
        assert_eq!(creds.password(), "");
        assert!(creds.is_anonymous());
    }

    #[test]
    fn test_password_dropped_without_username() {
        let mut params = ConnectionParameters::direct("http://host:8080", "DEFAULT", "hugegraph");
        params.password = Some("secret".into());
        assert_eq!(params.effective_credentials(), Credentials::anonymous());
    }

    #[test]
    fn test_username_without_password() {
        let mut params = ConnectionParameters::direct("http://host:8080", "DEFAULT", "hugegraph");
        params.username = Some("admin".into());
        let creds = params.effective_credentials();
        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password(), "");
    }

    #[test]
    fn test_empty_url_is_not_direct() {
        let mut params = ConnectionParameters::default();
        assert!(!params.is_direct());
        params.url = Some(String::new());
        assert!(!params.is_direct());
        params.url = Some("http://host:8080".into());
        assert!(params.is_direct());
    }

    #[test]
    fn test_empty_trust_store_fields_are_unset() {
        let params = ConnectionParameters::direct("https://host:8443", "DEFAULT", "hugegraph")
            .with_trust_store("", "");
        assert_eq!(params.trust_store_file(), None);
        assert_eq!(params.trust_store_password(), None);
    }

    #[test]
    fn test_meta_constructor() {
        let params = ConnectionParameters::meta(
            "etcd",
            ["http://127.0.0.1:2379", "http://127.0.0.2:2379"],
            "hg",
            "DEFAULT",
            "hugegraph",
        );
        assert!(!params.is_direct());
        assert_eq!(params.meta_urls.len(), 2);
        assert_eq!(params.cluster.as_deref(), Some("hg"));
    }

    #[test]
    fn test_from_json_str() {
        let params = ConnectionParameters::from_json_str(
            r#"{
                "url": "https://host:8443",
                "graphSpace": "DEFAULT",
                "graph": "hugegraph",
                "username": "admin",
                "password": "secret",
                "timeout": 30,
                "trustStoreFile": "x.jks",
                "trustStorePassword": "changeit"
            }"#,
        )
        .unwrap();

        assert_eq!(params.endpoint_url(), Some("https://host:8443"));
        assert_eq!(params.timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.trust_store_file(), Some("x.jks"));
        assert_eq!(params.effective_credentials().username(), "admin");
    }

    #[test]
    fn test_from_json_str_meta() {
        let params = ConnectionParameters::from_json_str(
            r#"{
                "metaType": "pd",
                "metaURLs": ["127.0.0.1:8686"],
                "cluster": "hg",
                "graphSpace": "DEFAULT",
                "graph": "hugegraph"
            }"#,
        )
        .unwrap();

        assert_eq!(params.meta_type.as_deref(), Some("pd"));
        assert_eq!(params.meta_urls, vec!["127.0.0.1:8686".to_string()]);
        assert_eq!(params.timeout, None);
    }

    #[test]
    fn test_from_json_str_invalid() {
        let err = ConnectionParameters::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_timeout_in_seconds() {
        let params = ConnectionParameters::direct("http://host:8080", "DEFAULT", "hugegraph")
            .with_timeout(Duration::from_secs(90));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["timeout"], 90);
        assert_eq!(json["graphSpace"], "DEFAULT");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ConnectionParameters::from_json_file("/nonexistent/conn.json").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let params = ConnectionParameters::direct("https://host:8443", "DEFAULT", "hugegraph")
            .with_credentials("admin", "s3cr3t")
            .with_trust_store("x.jks", "ch4ng3it");
        let debug_str = format!("{:?}", params);
        assert!(debug_str.contains("admin"));
        assert!(!debug_str.contains("s3cr3t"));
        assert!(!debug_str.contains("ch4ng3it"));
    }
}
