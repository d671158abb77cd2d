use crate::error::{Result, ScaffoldError};
use glob_match::glob_match;
use regex::Regex;

/// Prefix marking a pattern as a regular expression.
const REGEX_PREFIX: &str = "re:";

/// A single base-name matcher.
#[derive(Debug, Clone)]
pub enum Pattern {
	/// Matches one name exactly.
	Exact(String),

	/// Shell-style glob (`*.xcuserstate`, `Pod?`).
	Glob(String),

	/// Regular expression, written as `re:<regex>`. Not implicitly anchored.
	Regex(Regex),
}

impl Pattern {
	/// Parse a pattern string.
	///
	/// `re:` selects a regex; a name containing glob metacharacters is a glob;
	/// anything else must match exactly.
	pub fn parse(input: &str) -> Result<Self> {
		if let Some(expr) = input.strip_prefix(REGEX_PREFIX) {
			let regex = Regex::new(expr).map_err(|source| ScaffoldError::InvalidPattern {
				pattern: input.to_string(),
				source,
			})?;
			return Ok(Pattern::Regex(regex));
		}

		if input.contains(['*', '?', '[', '{']) {
			Ok(Pattern::Glob(input.to_string()))
		} else {
			Ok(Pattern::Exact(input.to_string()))
		}
	}

	pub fn matches(&self, name: &str) -> bool {
		match self {
			Pattern::Exact(exact) => exact == name,
			Pattern::Glob(glob) => glob_match(glob, name),
			Pattern::Regex(regex) => regex.is_match(name),
		}
	}

	/// The pattern as it would be written in a config file.
	pub fn as_source(&self) -> String {
		match self {
			Pattern::Exact(s) | Pattern::Glob(s) => s.clone(),
			Pattern::Regex(regex) => format!("{REGEX_PREFIX}{}", regex.as_str()),
		}
	}
}

/// A set of base-name matchers; a name matches if any member matches.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
	patterns: Vec<Pattern>,
}

impl PatternSet {
	pub fn new(patterns: Vec<Pattern>) -> Self {
		Self { patterns }
	}

	/// Parse every entry, failing on the first invalid one.
	pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
		entries
			.iter()
			.map(|entry| Pattern::parse(entry.as_ref()))
			.collect::<Result<Vec<_>>>()
			.map(Self::new)
	}

	pub fn push(&mut self, pattern: Pattern) {
		self.patterns.push(pattern);
	}

	pub fn matches(&self, name: &str) -> bool {
		self.patterns.iter().any(|pattern| pattern.matches(name))
	}

	pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
		self.patterns.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_exact_pattern() {
		let pattern = Pattern::parse(".DS_Store").unwrap();
		assert!(matches!(pattern, Pattern::Exact(_)));
		assert!(pattern.matches(".DS_Store"));
		assert!(!pattern.matches("xDS_Store"));
		assert!(!pattern.matches(".DS_Store.bak"));
	}

	#[test]
	fn test_glob_pattern() {
		let pattern = Pattern::parse("*.xcuserstate").unwrap();
		assert!(matches!(pattern, Pattern::Glob(_)));
		assert!(pattern.matches("UserInterfaceState.xcuserstate"));
		assert!(!pattern.matches("project.pbxproj"));
	}

	#[test]
	fn test_regex_pattern() {
		let pattern = Pattern::parse(r"re:^Pod(s|file\.lock)$").unwrap();
		assert!(pattern.matches("Pods"));
		assert!(pattern.matches("Podfile.lock"));
		assert!(!pattern.matches("Podfile"));
		assert_eq!(pattern.as_source(), r"re:^Pod(s|file\.lock)$");
	}

	#[test]
	fn test_invalid_regex_pattern() {
		match Pattern::parse("re:[invalid").unwrap_err() {
			ScaffoldError::InvalidPattern { pattern, .. } => {
				assert_eq!(pattern, "re:[invalid");
			}
			other => panic!("Expected InvalidPattern error, got {other:?}"),
		}
	}

	#[test]
	fn test_pattern_set_matches_any() {
		let set = PatternSet::parse(&["xcuserdata", "Pods"]).unwrap();
		assert!(set.matches("Pods"));
		assert!(set.matches("xcuserdata"));
		assert!(!set.matches("Sources"));
	}

	#[test]
	fn test_empty_pattern_set_matches_nothing() {
		let set = PatternSet::default();
		assert!(!set.matches("anything"));
	}
}
