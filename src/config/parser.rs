use crate::config::types::Config;
use crate::error::{Result, ScaffoldError};
use crate::policy::Policy;
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content =
		std::fs::read_to_string(path).map_err(|source| ScaffoldError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| ScaffoldError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Surface bad patterns at load time rather than mid-walk
	Policy::from_config(&config.policy)?;

	Ok(config)
}
