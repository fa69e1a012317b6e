//! Config subcommand handlers.

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn check_url(field: &str, raw: &str) -> Result<(), CliError> {
    url::Url::parse(raw)
        .map(drop)
        .map_err(|e| CliError::Validation {
            field: field.into(),
            reason: format!("invalid URL '{raw}': {e}"),
        })
}

fn available(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Apply one `config set` key onto a profile.
fn apply_set(profile: &mut Profile, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "api_url" => {
            check_url(key, value)?;
            profile.api_url = value.to_owned();
        }
        "admin_url" => {
            check_url(key, value)?;
            profile.admin_url = Some(value.to_owned());
        }
        "timeout" => {
            let secs: u64 = value.parse().map_err(|_| CliError::Validation {
                field: key.into(),
                reason: format!("expected whole seconds, got '{value}'"),
            })?;
            if secs == 0 {
                return Err(CliError::Validation {
                    field: key.into(),
                    reason: "must be at least 1 second".into(),
                });
            }
            profile.timeout = Some(secs);
        }
        "ca_cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: key.into(),
                reason: format!("expected true or false, got '{value}'"),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: "unknown key (expected api_url, admin_url, timeout, ca_cert or insecure)"
                    .into(),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            eprintln!("botdeck configuration");
            eprintln!("  Config path: {}\n", config::config_path().display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("Console API URL")
                .default(botdeck_config::DEFAULT_API_URL.into())
                .validate_with(|s: &String| url::Url::parse(s).map(drop))
                .interact_text()
                .map_err(prompt_err)?;

            let admin_url: String = Input::new()
                .with_prompt("Admin API URL")
                .default(api_url.clone())
                .validate_with(|s: &String| url::Url::parse(s).map(drop))
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    admin_url: (admin_url != api_url).then_some(admin_url),
                    api_url,
                    ..Profile::default()
                },
            );
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: botdeck dashboard");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let toml_text = toml::to_string_pretty(&cfg)
                .map_err(|e| CliError::Serialize(e.to_string()))?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |_| toml_text.trim_end().to_owned(),
                |c| c.active_profile_name(global.profile.as_deref()),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                util::notice(
                    "No profiles configured; using built-in defaults. Run: botdeck config init",
                    global.quiet,
                );
            } else {
                let lines: Vec<String> = cfg
                    .profiles
                    .keys()
                    .map(|name| {
                        let marker = if *name == active { " *" } else { "" };
                        format!("{name}{marker}")
                    })
                    .collect();
                output::print_output(&lines.join("\n"), global.quiet);
            }
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            util::notice(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        // ── Set ─────────────────────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(name.clone()).or_default();
            apply_set(profile, &key, &value)?;
            let path = config::save_config(&cfg)?;
            util::notice(
                &format!("Set {key} on profile '{name}' in {}", path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_rejects_bad_values() {
        let mut profile = Profile::default();
        assert!(apply_set(&mut profile, "api_url", "not a url").is_err());
        assert!(apply_set(&mut profile, "timeout", "0").is_err());
        assert!(apply_set(&mut profile, "timeout", "soon").is_err());
        assert!(apply_set(&mut profile, "password", "hunter2").is_err());
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn set_writes_the_named_key() {
        let mut profile = Profile::default();
        apply_set(&mut profile, "admin_url", "http://admin:9000/api").unwrap();
        apply_set(&mut profile, "timeout", "30").unwrap();
        apply_set(&mut profile, "insecure", "true").unwrap();
        assert_eq!(profile.admin_url.as_deref(), Some("http://admin:9000/api"));
        assert_eq!(profile.timeout, Some(30));
        assert_eq!(profile.insecure, Some(true));
    }
}
