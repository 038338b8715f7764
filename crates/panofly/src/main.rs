mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use panofly_config::{Config, Profile};
use panofly_core::{AuthCredentials, Device, DeviceConfig, Scope, TlsVerification};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info,panofly::audit=info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "panofly", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = panofly_config::load_config()?;
            let (device_config, scope, vsys) = resolve(&cli.global, &cfg)?;
            if scope.is_empty() {
                return Err(CliError::NoScope);
            }

            let device = Device::connect(&device_config)
                .await
                .map_err(|source| match CliError::from(source) {
                    CliError::Core(source) => CliError::ConnectionFailed { source },
                    mapped => mapped,
                })?;
            let session = Session {
                device,
                scope,
                vsys,
            };

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}

// ── Profile resolution ──────────────────────────────────────────────

fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Template flags replace the profile's scope as a whole.
fn resolve_scope(global: &GlobalOpts, profile: Option<&Profile>) -> Scope {
    if global.template.is_some() || global.template_stack.is_some() {
        return Scope::new(
            global.template.clone().unwrap_or_default(),
            global.template_stack.clone().unwrap_or_default(),
        );
    }
    profile.map(Profile::scope).unwrap_or_default()
}

/// Build the connection settings, scope and default vsys from the
/// config file, the active profile and flag overrides.
fn resolve(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(DeviceConfig, Scope, Option<String>), CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name);

    if profile.is_none() && global.profile.is_some() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    let scope = resolve_scope(global, profile);

    let Some(profile) = profile else {
        // No profile -- build from flags / env vars alone.
        let raw = global.device.as_deref().ok_or_else(|| CliError::NoConfig {
            path: panofly_config::config_path().display().to_string(),
        })?;
        let key = global
            .api_key
            .as_ref()
            .ok_or_else(|| CliError::NoCredentials {
                profile: profile_name.clone(),
            })?;
        let mut config = DeviceConfig::new(
            panofly_config::parse_device_url(raw)?,
            AuthCredentials::ApiKey(SecretString::from(key.clone())),
        );
        config.tls = if global.insecure {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        };
        config.timeout = Duration::from_secs(global.timeout);
        return Ok((config, scope, None));
    };

    let url = panofly_config::parse_device_url(global.device.as_deref().unwrap_or(&profile.device))?;
    let auth = match global.api_key {
        Some(ref key) => AuthCredentials::ApiKey(SecretString::from(key.clone())),
        None => panofly_config::resolve_auth(profile, &profile_name)?,
    };
    let mut config = DeviceConfig::new(url, auth);
    config.tls = panofly_config::tls_for(profile, global.insecure || cfg.defaults.insecure);
    config.timeout = Duration::from_secs(global.timeout);

    Ok((config, scope, profile.vsys.clone()))
}
