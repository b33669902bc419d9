/* src/builder.rs */

//!
//! Fluent assembly of the source chain of a content set.

#[cfg(feature = "fs")]
use std::path::PathBuf;

use crate::source::{MemorySource, ResourceCatalog, ResourceOptions, ResourceSource};
#[cfg(feature = "fs")]
use crate::source::{ChainSource, FileAndResourceOptions, FileOptions, FileSource};
use crate::{ContentSource, Result};

/// Collects content sources in lookup order.
///
/// Sources that fail to build record their error; later steps are skipped and
/// [`build`](Self::build) returns the first error.
///
/// ```
/// use shelf::{ContentBuilder, MemorySource};
///
/// let sources = ContentBuilder::new()
/// 	.memory([("greeting", "Hello")])
/// 	.fallback(MemorySource::from_pairs([("greeting", "Hi"), ("farewell", "Bye")])?)
/// 	.build()?;
/// assert_eq!(sources.len(), 2);
/// # Ok::<(), shelf::ContentError>(())
/// ```
#[derive(Default)]
pub struct ContentBuilder {
	sources: Vec<Box<dyn ContentSource>>,
	error: Option<crate::ContentError>,
}

impl ContentBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a source.
	pub fn source(mut self, source: impl ContentSource + 'static) -> Self {
		if self.error.is_none() {
			self.sources.push(Box::new(source));
		}
		self
	}

	/// Appends a source consulted only when everything before it misses.
	pub fn fallback(self, source: impl ContentSource + 'static) -> Self {
		self.source(source)
	}

	/// Appends the result of a fallible source constructor.
	pub fn try_source<S>(mut self, source: Result<S>) -> Self
	where
		S: ContentSource + 'static,
	{
		match source {
			Ok(source) => self.source(source),
			Err(e) => {
				self.error.get_or_insert(e);
				self
			}
		}
	}

	/// Appends an in-memory table.
	pub fn memory<I, K, V>(self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		if self.error.is_some() {
			return self;
		}
		self.try_source(MemorySource::from_pairs(pairs))
	}

	/// Appends the files below `dir`.
	#[cfg(feature = "fs")]
	pub fn files(self, dir: impl Into<PathBuf>, options: FileOptions) -> Self {
		if self.error.is_some() {
			return self;
		}
		self.try_source(FileSource::new(dir, options))
	}

	/// Appends the resources of `catalog`.
	pub fn resources<C: ResourceCatalog + 'static>(self, catalog: C, options: ResourceOptions) -> Self {
		if self.error.is_some() {
			return self;
		}
		self.try_source(ResourceSource::new(catalog, options))
	}

	/// Appends files, then resources as a separate fallback element, named alike.
	#[cfg(feature = "fs")]
	pub fn files_with_resource_fallback<C: ResourceCatalog + 'static>(
		self,
		dir: impl Into<PathBuf>,
		catalog: C,
		options: FileAndResourceOptions,
	) -> Self {
		if self.error.is_some() {
			return self;
		}
		let (file_options, resource_options) = options.split();
		self.files(dir, file_options)
			.resources(catalog, resource_options)
	}

	/// Appends files and resources merged into one [`ChainSource`] element.
	#[cfg(feature = "fs")]
	pub fn files_and_resources<C: ResourceCatalog + 'static>(
		self,
		dir: impl Into<PathBuf>,
		catalog: C,
		options: FileAndResourceOptions,
	) -> Self {
		if self.error.is_some() {
			return self;
		}
		self.try_source(ChainSource::files_and_resources(dir, catalog, options))
	}

	/// Number of sources collected so far.
	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Returns the sources in the order they were added.
	pub fn build(self) -> Result<Vec<Box<dyn ContentSource>>> {
		match self.error {
			Some(e) => Err(e),
			None => Ok(self.sources),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ContentError;

	#[test]
	fn test_sources_keep_order() {
		let sources = ContentBuilder::new()
			.memory([("a", "first")])
			.fallback(MemorySource::from_pairs([("a", "second")]).unwrap())
			.build()
			.unwrap();

		assert_eq!(sources.len(), 2);
		assert_eq!(sources[0].load_string("a").unwrap().as_deref(), Some("first"));
		assert_eq!(sources[1].load_string("a").unwrap().as_deref(), Some("second"));
	}

	#[test]
	fn test_first_error_is_kept() {
		let result = ContentBuilder::new()
			.memory([("a", "1"), ("A", "2")])
			.memory([("", "blank")])
			.build();
		assert!(matches!(result, Err(ContentError::DuplicateEntry { .. })));
	}

	#[cfg(feature = "fs")]
	#[test]
	fn test_missing_directory_is_deferred() {
		let dir = tempfile::tempdir().unwrap();
		let builder = ContentBuilder::new()
			.files(dir.path().join("missing"), FileOptions::new())
			.memory([("a", "1")]);
		// Nothing is collected after an error.
		assert!(builder.is_empty());
		assert!(matches!(builder.build(), Err(ContentError::MissingDirectory(_))));
	}
}
