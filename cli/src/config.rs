// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use finform_core::{APP_NAME, Config as CoreConfig, get_config_dir};
use tokio::fs;

const FINFORM_CONFIG_ENV: &str = "FINFORM_CONFIG";
const FINFORM_DEV_ENV: &str = "FINFORM_DEV";

const FINFORM_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const FINFORM_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Resolve and parse the configuration file.
///
/// The path is taken from `--config`, then `FINFORM_CONFIG`, then the default location in the
/// user config directory. Only the default location may be absent, the defaults apply then.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(FINFORM_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({FINFORM_DEV_ENV} is set): config must be explicitly specified via --config or {FINFORM_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok(CoreConfig::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| a.core)
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(FINFORM_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if FINFORM_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if FINFORM_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            FINFORM_DEV_ENV,
            val,
            FINFORM_DEV_VALID_TRUE.join(", "),
            FINFORM_DEV_VALID_FALSE.join(", "),
        );
        None
    }
}
