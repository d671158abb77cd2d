//! Configuration loading and parsing for scaffold.
//!
//! This module handles:
//! - TOML config file parsing
//! - Template-local and per-user config discovery
//! - Config merging

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, load_config_at, load_merged_config, merge_configs,
	user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, DefaultsConfig, LoadedConfig, MergedConfig, PolicyConfig};
