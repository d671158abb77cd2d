use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig};
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// File name of both the template-local and the per-user config.
pub const CONFIG_FILE_NAME: &str = ".scaffold.toml";

/// Env var consulted when no config names its own.
pub const DEFAULT_DISABLE_ENV_VAR: &str = "SCAFFOLD_NO_USER_CONFIG";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. `<template_root>/.scaffold.toml`, if present
/// 2. ~/.scaffold.toml, unless the disable env var is truthy
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(template_root: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();

	let template_config = template_root.join(CONFIG_FILE_NAME);
	if template_config.is_file() {
		configs.push(LoadedConfig {
			config: parse_config_file(&template_config)?,
			path: template_config,
		});
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.scaffold.toml if it exists and isn't disabled.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	let env_var = existing_configs
		.iter()
		.find_map(|loaded| loaded.config.user_config_disable_env_var.as_deref())
		.unwrap_or(DEFAULT_DISABLE_ENV_VAR);

	if is_env_truthy(env_var) {
		log::debug!("{env_var} is set, skipping user config");
		return Ok(None);
	}

	let user_config_path = user_config_path()?;

	if user_config_path.is_file() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into a single effective config.
///
/// Each field takes the value from the first config that sets it.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		merged.policy = merged.policy.or(&loaded.config.policy);
		merged.defaults = merged.defaults.or(&loaded.config.defaults);
		merged.sources.push(loaded.path.clone());
	}

	merged
}

/// Convenience function to discover, load, and merge configs for a template.
pub fn load_merged_config(template_root: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(template_root)?;
	Ok(merge_configs(&configs))
}

/// Load a single explicitly named config file, bypassing discovery.
pub fn load_config_at(path: &Path) -> Result<MergedConfig> {
	let config = parse_config_file(path)?;
	Ok(merge_configs(&[LoadedConfig {
		config,
		path: path.to_path_buf(),
	}]))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(ScaffoldError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
