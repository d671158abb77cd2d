use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.scaffold.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Environment variable name that, if truthy, skips ~/.scaffold.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub user_config_disable_env_var: Option<String>,

	/// Overrides for the skip and content policy.
	#[serde(default)]
	pub policy: PolicyConfig,

	/// Default symbol values used when none is given on the command line.
	#[serde(default)]
	pub defaults: DefaultsConfig,
}

/// Pattern lists for each policy set. An unset list keeps the built-in one;
/// an empty list disables it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PolicyConfig {
	/// Directories pruned from the walk.
	pub skip_dirs: Option<Vec<String>>,

	/// Files left out of the destination.
	pub skip_files: Option<Vec<String>>,

	/// Files whose values are quoted when they contain a space.
	pub quote_values_in: Option<Vec<String>>,

	/// Files copied without substitution.
	pub verbatim: Option<Vec<String>>,
}

/// Default values for symbols that have a sensible per-user default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DefaultsConfig {
	pub organization_name: Option<String>,
	pub organization_id: Option<String>,
	pub author: Option<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from every config file in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	pub policy: PolicyConfig,

	pub defaults: DefaultsConfig,

	/// Files that contributed, most specific first.
	pub sources: Vec<PathBuf>,
}

impl PolicyConfig {
	/// Fill every unset field from `other`.
	pub fn or(self, other: &PolicyConfig) -> PolicyConfig {
		PolicyConfig {
			skip_dirs: self.skip_dirs.or_else(|| other.skip_dirs.clone()),
			skip_files: self.skip_files.or_else(|| other.skip_files.clone()),
			quote_values_in: self
				.quote_values_in
				.or_else(|| other.quote_values_in.clone()),
			verbatim: self.verbatim.or_else(|| other.verbatim.clone()),
		}
	}
}

impl DefaultsConfig {
	/// Fill every unset field from `other`.
	pub fn or(self, other: &DefaultsConfig) -> DefaultsConfig {
		DefaultsConfig {
			organization_name: self
				.organization_name
				.or_else(|| other.organization_name.clone()),
			organization_id: self
				.organization_id
				.or_else(|| other.organization_id.clone()),
			author: self.author.or_else(|| other.author.clone()),
		}
	}
}
