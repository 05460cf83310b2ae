//! TLS trust material for graph-service and discovery-service connections.
//!
//! Two unrelated kinds of material live here:
//!
//! * [`TrustStore`]: the keystore handed to the underlying graph client when the
//!   endpoint is `https`. It is opaque to this crate (a JKS/PKCS#12 file plus password).
//! * [`MetaTlsMaterial`]: PEM files securing the discovery service connection, which
//!   can be compiled into a rustls [`ClientConfig`].

use crate::{Error, Result};
use rustls::ClientConfig;
use rustls::RootCertStore;
use rustls_pemfile::Item;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trust store location relative to the installation root
pub const DEFAULT_TRUST_STORE_FILE: &str = "conf/hugegraph.truststore";

/// Password of the trust store shipped with the tools
pub const DEFAULT_TRUST_STORE_PASSWORD: &str = "hugegraph";

/// URL scheme of a graph-service endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plaintext HTTP
    Http,
    /// HTTP over TLS
    Https,
}

impl Scheme {
    /// Extract the scheme from an endpoint URL such as `https://host:8443`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the URL has no `scheme://` prefix or the scheme
    /// is neither `http` nor `https`.
    pub fn of_url(url: &str) -> Result<Self> {
        let (scheme, _) = url.split_once("://").ok_or_else(|| {
            Error::Config(format!(
                "invalid endpoint url '{}': expected http://host:port or https://host:port",
                url
            ))
        })?;
        scheme.parse()
    }

    /// Whether connections under this scheme are TLS-secured
    pub fn is_secure(&self) -> bool {
        matches!(self, Self::Https)
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
        }
    }
}

impl std::str::FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Self::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(Self::Https)
        } else {
            Err(Error::Config(format!(
                "unsupported scheme '{}': expected http or https",
                s
            )))
        }
    }
}

/// Trust store handed to the graph client for `https` endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct TrustStore {
    path: PathBuf,
    password: String,
    is_default: bool,
}

impl TrustStore {
    /// Caller-supplied trust store, used verbatim
    pub fn custom(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            is_default: false,
        }
    }

    /// The trust store shipped under `<installation_root>/conf/hugegraph.truststore`
    pub fn default_under(installation_root: &Path) -> Self {
        Self {
            path: installation_root.join(DEFAULT_TRUST_STORE_FILE),
            password: DEFAULT_TRUST_STORE_PASSWORD.to_string(),
            is_default: true,
        }
    }

    /// Trust store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Trust store password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether this is the installation's default trust store
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

impl std::fmt::Debug for TrustStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustStore")
            .field("path", &self.path)
            .field("password", &"<redacted>")
            .field("is_default", &self.is_default)
            .finish()
    }
}

/// Decide which trust store, if any, a direct connection uses.
///
/// * `https` without a path: the default store under `installation_root`, which must
///   then be set and non-empty.
/// * `https` with a path: the password is mandatory.
/// * `http`: neither field may be set.
///
/// Empty strings are treated as absent by the caller.
pub fn resolve_trust_store(
    scheme: Scheme,
    path: Option<&str>,
    password: Option<&str>,
    installation_root: Option<&Path>,
) -> Result<Option<TrustStore>> {
    match scheme {
        Scheme::Https => match path {
            None => {
                let root = installation_root
                    .filter(|root| !root.as_os_str().is_empty())
                    .ok_or_else(|| {
                        Error::Config(
                            "installation root must be set to locate the default trust store \
                             under secure transport (https)"
                                .into(),
                        )
                    })?;
                Ok(Some(TrustStore::default_under(root)))
            }
            Some(path) => {
                let password = password.ok_or_else(|| {
                    Error::Config(format!(
                        "trust store password required with custom trust store '{}' \
                         under secure transport (https)",
                        path
                    ))
                })?;
                Ok(Some(TrustStore::custom(path, password)))
            }
        },
        Scheme::Http => {
            if path.is_some() {
                return Err(Error::Config(
                    "trust store file is incompatible with insecure transport (http)".into(),
                ));
            }
            if password.is_some() {
                return Err(Error::Config(
                    "trust store password is incompatible with insecure transport (http)".into(),
                ));
            }
            Ok(None)
        }
    }
}

/// PEM material securing the connection to the discovery service.
///
/// # Examples
///
/// ```ignore
/// let tls = MetaTlsMaterial::new()
///     .ca_cert("/etc/hugegraph/etcd-ca.pem")
///     .client_cert("/etc/hugegraph/client.pem")
///     .client_key("/etc/hugegraph/client-key.pem");
/// let rustls_config = tls.client_config()?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaTlsMaterial {
    ca_cert: Option<PathBuf>,
    client_cert: Option<PathBuf>,
    client_key: Option<PathBuf>,
}

impl MetaTlsMaterial {
    /// No TLS material (plaintext discovery connection)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CA certificate used to verify the discovery service
    pub fn ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    /// Set the client certificate presented for mutual TLS
    pub fn client_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_cert = Some(path.into());
        self
    }

    /// Set the private key matching the client certificate
    pub fn client_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_key = Some(path.into());
        self
    }

    /// CA certificate path
    pub fn ca_cert_path(&self) -> Option<&Path> {
        self.ca_cert.as_deref()
    }

    /// Client certificate path
    pub fn client_cert_path(&self) -> Option<&Path> {
        self.client_cert.as_deref()
    }

    /// Client private key path
    pub fn client_key_path(&self) -> Option<&Path> {
        self.client_key.as_deref()
    }

    /// Whether no material was supplied at all
    pub fn is_empty(&self) -> bool {
        self.ca_cert.is_none() && self.client_cert.is_none() && self.client_key.is_none()
    }

    /// Check that the client certificate and key come as a pair.
    pub fn validate(&self) -> Result<()> {
        match (&self.client_cert, &self.client_key) {
            (Some(_), None) => Err(Error::Config(
                "discovery client certificate given without a client key".into(),
            )),
            (None, Some(_)) => Err(Error::Config(
                "discovery client key given without a client certificate".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Compile the material into a rustls client configuration.
    ///
    /// Without a CA certificate the system roots are used. The client certificate
    /// and key, when both present, enable mutual TLS.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a PEM file cannot be read or parsed
    /// - the CA file holds no certificate, or the key file holds no private key
    /// - rustls rejects the client certificate/key pair
    pub fn client_config(&self) -> Result<Arc<ClientConfig>> {
        self.validate()?;

        let root_store = match &self.ca_cert {
            Some(ca_path) => load_ca(ca_path)?,
            None => system_roots()?,
        };

        let builder = ClientConfig::builder().with_root_certificates(root_store);
        let config = match (&self.client_cert, &self.client_key) {
            (Some(cert_path), Some(key_path)) => {
                let certs = load_certs(cert_path)?;
                let key = load_private_key(key_path)?;
                builder.with_client_auth_cert(certs, key).map_err(|e| {
                    Error::Config(format!(
                        "invalid discovery client certificate '{}': {}",
                        cert_path.display(),
                        e
                    ))
                })?
            }
            _ => builder.with_no_client_auth(),
        };

        Ok(Arc::new(config))
    }
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        Error::Config(format!(
            "failed to read {} file '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let data = read_pem(path, "certificate")?;
    let mut reader = std::io::Cursor::new(&data);
    let mut certs = Vec::new();

    loop {
        match rustls_pemfile::read_one(&mut reader) {
            Ok(Some(Item::X509Certificate(cert))) => certs.push(cert),
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(_) => {
                return Err(Error::Config(format!(
                    "failed to parse certificate from '{}'",
                    path.display()
                )));
            }
        }
    }

    if certs.is_empty() {
        return Err(Error::Config(format!(
            "no valid certificates found in '{}'",
            path.display()
        )));
    }

    Ok(certs)
}

fn load_ca(path: &Path) -> Result<RootCertStore> {
    let mut root_store = RootCertStore::empty();
    let (added, _ignored) = root_store.add_parsable_certificates(load_certs(path)?);
    if added == 0 {
        return Err(Error::Config(format!(
            "no usable CA certificates in '{}'",
            path.display()
        )));
    }
    Ok(root_store)
}

fn system_roots() -> Result<RootCertStore> {
    let native = rustls_native_certs::load_native_certs();
    let mut store = RootCertStore::empty();
    let (added, ignored) = store.add_parsable_certificates(native.certs);

    if native.errors.is_empty() {
        return Ok(store);
    }
    if store.is_empty() {
        return Err(Error::Config(format!(
            "no system root certificates available for the discovery service: {}",
            native.errors[0]
        )));
    }
    tracing::warn!(
        added,
        ignored,
        errors = native.errors.len(),
        "some system root certificates could not be loaded"
    );
    Ok(store)
}

fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    let data = read_pem(path, "private key")?;
    let mut reader = std::io::Cursor::new(&data);

    rustls_pemfile::private_key(&mut reader)
        .map_err(|_| {
            Error::Config(format!(
                "failed to parse private key from '{}'",
                path.display()
            ))
        })?
        .ok_or_else(|| Error::Config(format!("no private key found in '{}'", path.display())))
}
