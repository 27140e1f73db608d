// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./tunesmith.toml` > `~/.config/tunesmith/tunesmith.toml`
//! > `/etc/tunesmith/tunesmith.toml`, with environment variable overrides
//! via the `TUNESMITH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TunesmithConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tunesmith/tunesmith.toml` (system-wide)
/// 3. `~/.config/tunesmith/tunesmith.toml` (user XDG config)
/// 4. `./tunesmith.toml` (local directory)
/// 5. `TUNESMITH_*` environment variables
pub fn load_config() -> Result<TunesmithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TunesmithConfig::default()))
        .merge(Toml::file("/etc/tunesmith/tunesmith.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tunesmith/tunesmith.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tunesmith.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit inline configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TunesmithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TunesmithConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TunesmithConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TunesmithConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` so key names containing
/// underscores stay unambiguous: `TUNESMITH_OPTIMIZER_CACHE_TTL_SECS` must
/// map to `optimizer.cache_ttl_secs`, not `optimizer.cache.ttl.secs`.
fn env_provider() -> Env {
    Env::prefixed("TUNESMITH_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("optimizer_", "optimizer.", 1)
            .replacen("history_", "history.", 1);
        mapped.into()
    })
}
