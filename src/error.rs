use std::path::PathBuf;

/// Library-level structured errors for scaffold.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
	#[error("Unknown symbol: {name}")]
	UnknownSymbol { name: String },

	#[error("Invalid assignment (expected SYMBOL=VALUE): {input}")]
	InvalidAssignment { input: String },

	#[error("Invalid value for {symbol}: {reason}")]
	InvalidValue { symbol: String, reason: String },

	#[error("No value given for {symbol}")]
	MissingValue { symbol: String },

	#[error("Invalid regex pattern in policy: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to walk template directory")]
	Walk {
		#[source]
		source: walkdir::Error,
	},

	#[error("Failed to read file: {path}")]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to create directory: {path}")]
	CreateDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using ScaffoldError.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
