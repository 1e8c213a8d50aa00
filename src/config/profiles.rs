//! Connection profiles.
//!
//! `profiles.toml` holds one table per profile:
//!
//! ```toml
//! [databricks]
//! server_hostname = "adb-123.azuredatabricks.net"
//! http_path = "/sql/1.0/warehouses/abc123"
//! access_token = "dapi..."
//! ```
//!
//! Each setting can be overridden by `DATABRICKS_HOST`,
//! `DATABRICKS_HTTP_PATH` and `DATABRICKS_TOKEN`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving a connection profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Profiles file exists but could not be read.
    #[error("Failed to read profiles file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Profiles file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// No table with this name and no environment overrides to stand in.
    #[error("Profile {name} not in profiles")]
    MissingProfile {
        /// Requested profile.
        name: String,
    },

    /// The profile exists but lacks a setting.
    #[error("No setting matching {setting} found in profile {profile}")]
    MissingSetting {
        /// Profile that was searched.
        profile: String,
        /// Missing key.
        setting: &'static str,
    },
}

/// One `[name]` table in `profiles.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileEntry {
    /// Workspace host name.
    #[serde(default)]
    pub server_hostname: Option<String>,
    /// Warehouse HTTP path.
    #[serde(default)]
    pub http_path: Option<String>,
    /// Personal access token.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Fully resolved connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile name.
    pub name: String,
    /// Workspace host name, without scheme.
    pub server_hostname: String,
    /// Warehouse HTTP path.
    pub http_path: String,
    /// Personal access token.
    pub access_token: String,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("server_hostname", &self.server_hostname)
            .field("http_path", &self.http_path)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Parse `profiles.toml`. A missing file yields no profiles.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_profiles(path: &Path) -> Result<HashMap<String, ProfileEntry>, ProfileError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ProfileError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    toml::from_str(&contents).map_err(|e| ProfileError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Combine a profile table with overrides from `lookup`.
///
/// `lookup` receives environment variable names; production code passes
/// `|key| std::env::var(key).ok()`.
///
/// # Errors
///
/// [`ProfileError::MissingProfile`] when there is no table and the overrides
/// do not cover every setting; [`ProfileError::MissingSetting`] when a table
/// exists but a setting is absent everywhere.
pub fn resolve_profile(
    name: &str,
    entry: Option<ProfileEntry>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Profile, ProfileError> {
    let found = entry.is_some();
    let entry = entry.unwrap_or_default();

    let setting = |key: &'static str, env: &str, value: Option<String>| {
        lookup(env)
            .or(value)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                if found {
                    ProfileError::MissingSetting {
                        profile: name.to_string(),
                        setting: key,
                    }
                } else {
                    ProfileError::MissingProfile {
                        name: name.to_string(),
                    }
                }
            })
    };

    let profile = Profile {
        name: name.to_string(),
        server_hostname: setting("server_hostname", "DATABRICKS_HOST", entry.server_hostname)?,
        http_path: setting("http_path", "DATABRICKS_HTTP_PATH", entry.http_path)?,
        access_token: setting("access_token", "DATABRICKS_TOKEN", entry.access_token)?,
    };
    debug!(profile = ?profile, "Resolved connection profile");
    Ok(profile)
}

/// Load `name` from the profiles file at `path`, applying environment overrides.
///
/// # Errors
///
/// See [`load_profiles`] and [`resolve_profile`].
pub fn load_profile(path: &Path, name: &str) -> Result<Profile, ProfileError> {
    let mut profiles = load_profiles(path)?;
    resolve_profile(name, profiles.remove(name), |key| std::env::var(key).ok())
}
