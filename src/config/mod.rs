//! Configuration module.
//!
//! Config file, connection profiles and key bindings.

pub mod keybindings;
pub mod loader;
pub mod profiles;

pub use keybindings::{BindingContext, KeyBindings};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, ensure_default_config, log_file_path, merge_config,
    profiles_path_for, resolve_config_path, ConfigError, ConfigFile, ResolvedConfig,
};
pub use profiles::{load_profile, Profile, ProfileError};
