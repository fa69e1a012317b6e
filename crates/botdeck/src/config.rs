//! CLI configuration: thin wrapper around `botdeck_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --admin-url, --timeout, --insecure).

use botdeck_core::{BackendConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use botdeck_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_backend_config, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build a `BackendConfig` from the config file, profile, and CLI overrides.
///
/// Flag values win over profile values; profile values win over defaults.
pub fn resolve_backend(global: &GlobalOpts, cfg: &Config) -> Result<BackendConfig, CliError> {
    let name = active_profile_name(global, cfg);
    let mut profile = cfg.profile(&name).map_err(|_| CliError::ProfileNotFound {
        available: available_profiles(cfg),
        name: name.clone(),
    })?;

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(ref url) = global.admin_url {
        profile.admin_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    let mut backend = profile_to_backend_config(&profile, &cfg.defaults)?;
    if global.insecure {
        backend.tls = TlsVerification::DangerAcceptInvalid;
    }
    tracing::debug!(
        profile = %name,
        console = %backend.console_url,
        admin = %backend.admin_url,
        "resolved backend"
    );
    Ok(backend)
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
