//! Server configuration, deserialized from `config.yaml` plus environment
//! overrides.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Cookie domain shared with the auth service.
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Glob the Tera loader scans, e.g. `templates/**/*.html`.
    pub templates_dir: String,
    /// HMAC secret shared with the auth service; signs session cookies and
    /// verifies the JWT they carry.
    pub secret: String,
    /// Auth service base URL; anonymous users are sent there to sign in.
    pub auth_service_url: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
