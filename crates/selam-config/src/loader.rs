// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./selam.toml` > `~/.config/selam/selam.toml` > `/etc/selam/selam.toml`
//! with environment variable overrides via `SELAM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SelamConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/selam/selam.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "selam.toml";

/// The per-user config file under the XDG config directory, if one can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("selam").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/selam/selam.toml` (system-wide)
/// 3. `~/.config/selam/selam.toml` (user XDG config)
/// 4. `./selam.toml` (local directory)
/// 5. `SELAM_*` environment variables
pub fn load_config() -> Result<SelamConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SelamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SelamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SelamConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `SELAM_GEMINI_API_KEY` must map to `gemini.api_key`, and
/// `SELAM_PIPELINE_REQUEST_CEILING_MS` to `pipeline.request_ceiling_ms`.
fn env_provider() -> Env {
    Env::prefixed("SELAM_").map(|key| map_env_key(key.as_str()).into())
}

/// Rewrite a lowercased, prefix-stripped env key into a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &["server", "gemini", "translate", "pipeline"];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
