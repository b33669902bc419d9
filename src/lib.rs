/* src/lib.rs */

//!
//! Named content resolution over ordered fallback chains.
//!
//! Content (SQL scripts, templates, JSON fixtures...) is addressed by a logical
//! name instead of a path. A [`ContentSet`] tries its sources in registration
//! order and returns the first hit, so a directory on disk can override
//! resources compiled into the binary.
//!
//! - **name**: canonical entry names derived from paths and resource identifiers.
//! - **source**: file, embedded resource, in-memory and chained sources.
//! - **set**: the first-match-wins fallback chain.
//! - **builder**: fluent assembly of a source chain.
//! - **registry**: name and kind based lookup of content sets.
//! - **config**: registries described in TOML or JSON.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `fs`: Enables [`FileSource`] (async reads through tokio).
//! - `glob`: Wildcard search patterns for [`FileSource`].
//! - `regex`: Regex name filters.
//! - `json`: JSON accessors on [`ContentSet`]. Documents are parsed as strict JSON,
//!   so comments and trailing commas are errors.
//! - `config`: Declarative registry configuration from TOML or JSON.
//! - `logging`, `tracing`: Diagnostics through `log` and `tracing`.
//!
//! ## Basic Usage
//!
//! See `demos/basic.rs` for a complete example.

pub mod builder;
#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod name;
pub mod registry;
pub mod set;
pub mod source;

pub use builder::ContentBuilder;
pub use error::{ContentError, Result};
pub use name::{NameIndex, NameOptions};
pub use registry::{ContentRegistry, ContentSetKind};
pub use set::ContentSet;
pub use source::{
	ChainSource, MemorySource, Resource, ResourceCatalog, ResourceOptions, ResourceSource,
	StaticCatalog,
};

#[cfg(feature = "fs")]
pub use source::{FileAndResourceOptions, FileOptions, FileSource, IndexPolicy};

use async_trait::async_trait;

/// A backing store that can answer "does entry X exist, and what are its bytes".
///
/// Absence is `Ok(None)`, which lets a [`ContentSet`] move on to the next source.
/// `Err` is reserved for infrastructure failures and is never treated as a miss.
#[async_trait]
pub trait ContentSource: Send + Sync {
	/// Short description used in diagnostics.
	fn describe(&self) -> String;

	/// Reads an entry as raw bytes. May block on I/O.
	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>>;

	/// Reads an entry as UTF-8 text.
	fn load_string(&self, name: &str) -> Result<Option<String>> {
		self.load_binary(name)?
			.map(|bytes| decode_text(name, bytes))
			.transpose()
	}

	/// Async form of [`load_binary`](Self::load_binary).
	///
	/// The default delegates to the blocking form, which suits sources without real I/O.
	async fn load_binary_async(&self, name: &str) -> Result<Option<Vec<u8>>> {
		self.load_binary(name)
	}

	/// Async form of [`load_string`](Self::load_string).
	async fn load_string_async(&self, name: &str) -> Result<Option<String>> {
		self.load_binary_async(name)
			.await?
			.map(|bytes| decode_text(name, bytes))
			.transpose()
	}
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
	fn describe(&self) -> String {
		(**self).describe()
	}

	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
		(**self).load_binary(name)
	}

	fn load_string(&self, name: &str) -> Result<Option<String>> {
		(**self).load_string(name)
	}

	async fn load_binary_async(&self, name: &str) -> Result<Option<Vec<u8>>> {
		(**self).load_binary_async(name).await
	}

	async fn load_string_async(&self, name: &str) -> Result<Option<String>> {
		(**self).load_string_async(name).await
	}
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes content as UTF-8, dropping a leading byte order mark.
pub(crate) fn decode_text(name: &str, mut bytes: Vec<u8>) -> Result<String> {
	if bytes.starts_with(UTF8_BOM) {
		bytes.drain(..UTF8_BOM.len());
	}
	String::from_utf8(bytes).map_err(|source| ContentError::Decode {
		name: name.to_string(),
		source,
	})
}
