// ── Runtime backend configuration ──
//
// Describes where the two API contracts live and how to reach them. Never
// touches disk: the CLI builds a `BackendConfig` from its profile and hands
// it in.

use std::path::PathBuf;
use std::time::Duration;

use botdeck_api::{AdminClient, ConsoleClient, TlsMode, TransportConfig};
use url::Url;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Connection settings for both API surfaces.
///
/// The console and admin contracts are separate services and keep separate
/// base URLs, even when they happen to point at the same host.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the console contract (e.g. `http://localhost:8000/api`).
    pub console_url: Url,
    /// Base URL of the admin CRUD contract.
    pub admin_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(console_url: Url, admin_url: Url) -> Self {
        Self {
            console_url,
            admin_url,
            tls: TlsVerification::default(),
            timeout: botdeck_api::transport::DEFAULT_TIMEOUT,
        }
    }

    /// Point both contracts at the same base URL.
    pub fn single(url: Url) -> Self {
        Self::new(url.clone(), url)
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig::default()
            .with_tls(tls)
            .with_timeout(self.timeout)
    }

    pub fn console_client(&self) -> Result<ConsoleClient, CoreError> {
        Ok(ConsoleClient::new(
            self.console_url.as_str(),
            &self.transport(),
        )?)
    }

    pub fn admin_client(&self) -> Result<AdminClient, CoreError> {
        Ok(AdminClient::new(self.admin_url.as_str(), &self.transport())?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clients_keep_their_own_base_urls() {
        let config = BackendConfig::new(
            "http://console.local/api".parse().unwrap(),
            "http://admin.local:9000/api".parse().unwrap(),
        );
        assert_eq!(
            config.console_client().unwrap().base_url().as_str(),
            "http://console.local/api/"
        );
        assert_eq!(
            config.admin_client().unwrap().base_url().as_str(),
            "http://admin.local:9000/api/"
        );
    }

    #[test]
    fn transport_mirrors_tls_and_timeout() {
        let mut config = BackendConfig::single("http://localhost:8000/api".parse().unwrap());
        config.tls = TlsVerification::DangerAcceptInvalid;
        config.timeout = Duration::from_secs(3);

        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(3));
    }
}
