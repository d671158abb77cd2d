//! Skip and content policy for scaffold.
//!
//! Four base-name pattern sets decide how each template entry is treated:
//! - directories pruned from the walk
//! - files left out of the destination
//! - files whose substituted values get quoted when they contain a space
//! - files copied byte-for-byte without substitution

pub mod pattern;

pub use pattern::{Pattern, PatternSet};

use crate::config::types::PolicyConfig;
use crate::error::Result;

pub const DEFAULT_SKIP_DIRS: &[&str] = &["xcuserdata", "Pods"];
pub const DEFAULT_SKIP_FILES: &[&str] = &[".DS_Store", "Podfile.lock"];
pub const DEFAULT_QUOTE_VALUES_IN: &[&str] = &["project.pbxproj"];
pub const DEFAULT_VERBATIM: &[&str] = &["IDETemplateMacros.plist"];

/// How the materializer treats each entry, keyed on base name.
#[derive(Debug, Clone)]
pub struct Policy {
	pub skip_dirs: PatternSet,
	pub skip_files: PatternSet,
	pub quote_values_in: PatternSet,
	pub verbatim: PatternSet,
}

impl Default for Policy {
	fn default() -> Self {
		Self {
			skip_dirs: exact_set(DEFAULT_SKIP_DIRS),
			skip_files: exact_set(DEFAULT_SKIP_FILES),
			quote_values_in: exact_set(DEFAULT_QUOTE_VALUES_IN),
			verbatim: exact_set(DEFAULT_VERBATIM),
		}
	}
}

impl Policy {
	/// Build a policy from config, using the built-in set for every field the
	/// config leaves unset.
	pub fn from_config(config: &PolicyConfig) -> Result<Self> {
		let defaults = Policy::default();
		Ok(Self {
			skip_dirs: parse_or(config.skip_dirs.as_deref(), defaults.skip_dirs)?,
			skip_files: parse_or(config.skip_files.as_deref(), defaults.skip_files)?,
			quote_values_in: parse_or(config.quote_values_in.as_deref(), defaults.quote_values_in)?,
			verbatim: parse_or(config.verbatim.as_deref(), defaults.verbatim)?,
		})
	}

	pub fn skips_dir(&self, name: &str) -> bool {
		self.skip_dirs.matches(name)
	}

	pub fn skips_file(&self, name: &str) -> bool {
		self.skip_files.matches(name)
	}

	pub fn quotes_values_in(&self, name: &str) -> bool {
		self.quote_values_in.matches(name)
	}

	pub fn copies_verbatim(&self, name: &str) -> bool {
		self.verbatim.matches(name)
	}
}

fn exact_set(names: &[&str]) -> PatternSet {
	PatternSet::new(
		names
			.iter()
			.map(|name| Pattern::Exact((*name).to_string()))
			.collect(),
	)
}

fn parse_or(entries: Option<&[String]>, fallback: PatternSet) -> Result<PatternSet> {
	match entries {
		Some(entries) => PatternSet::parse(entries),
		None => Ok(fallback),
	}
}
