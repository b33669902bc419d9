/* src/error.rs */

use std::path::PathBuf;

/// Core error type for content resolution.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
	/// No source in the chain holds the requested entry.
	#[error("content entry '{entry}' not found in content set '{set}'")]
	EntryNotFound { entry: String, set: String },

	/// No content set is registered under the name.
	#[error("content set not found: {name}")]
	SetNotFound { name: String },

	/// A content set with the same name is already registered.
	#[error("content set already registered: {name}")]
	DuplicateSet { name: String },

	/// Two discovered items map onto the same canonical entry name.
	#[error("duplicate content entry '{name}' in {origin}")]
	DuplicateEntry { name: String, origin: String },

	/// Blank or otherwise unusable name.
	#[error("invalid name: {0}")]
	InvalidName(String),

	/// The registered set is not of the requested kind.
	#[error("content set '{name}' is not of kind {expected}")]
	TypeMismatch { name: String, expected: &'static str },

	/// The base directory of a file source does not exist.
	#[error("base directory not found: {}", .0.display())]
	MissingDirectory(PathBuf),

	/// A resource catalog could not be enumerated or read.
	#[error("resource catalog '{catalog}': {message}")]
	Manifest { catalog: String, message: String },

	/// IO error from a source.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// Content is not valid UTF-8 text.
	#[error("content entry '{name}' is not valid UTF-8: {source}")]
	Decode {
		name: String,
		#[source]
		source: std::string::FromUtf8Error,
	},

	/// Glob or regex pattern failed to compile.
	#[error("invalid pattern: {0}")]
	Pattern(String),

	/// Content could not be deserialized as JSON.
	#[cfg(feature = "json")]
	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),

	/// JSON content does not have the expected shape.
	#[cfg(feature = "json")]
	#[error("unexpected json structure: {0}")]
	Structure(String),

	/// Declarative configuration is invalid.
	#[cfg(feature = "config")]
	#[error("config error: {0}")]
	Config(String),
}

impl ContentError {
	/// Returns true for the recoverable "entry not found in set" case.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::EntryNotFound { .. })
	}
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, ContentError>;
