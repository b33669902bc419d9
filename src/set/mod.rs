/* src/set/mod.rs */

//!
//! Content sets: named fallback chains of sources.

#[cfg(feature = "json")]
mod json;

use crate::{ContentError, ContentSource, Result};

/// A named, ordered chain of content sources.
///
/// Lookups try each source in registration order and return the first hit.
/// Later sources are never consulted once one matches, which allows specific
/// overrides in front of generic fallbacks. Errors raised by a source are
/// returned as-is; only absence moves the lookup on to the next source.
pub struct ContentSet {
	name: String,
	sources: Vec<Box<dyn ContentSource>>,
}

impl std::fmt::Debug for ContentSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let sources: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
		f.debug_struct("ContentSet")
			.field("name", &self.name)
			.field("sources", &sources)
			.finish()
	}
}

impl ContentSet {
	/// Creates a set. The name must not be blank.
	pub fn new(name: impl Into<String>, sources: Vec<Box<dyn ContentSource>>) -> Result<Self> {
		let name = name.into();
		if name.trim().is_empty() {
			return Err(ContentError::InvalidName("content set name is blank".to_string()));
		}
		Ok(Self { name, sources })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The sources in lookup order.
	pub fn sources(&self) -> &[Box<dyn ContentSource>] {
		&self.sources
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Gets an entry as text, failing with [`ContentError::EntryNotFound`] if no source has it.
	pub fn get_string(&self, entry: &str) -> Result<String> {
		self.try_get_string(entry)?
			.ok_or_else(|| self.not_found(entry))
	}

	/// Gets an entry as bytes, failing with [`ContentError::EntryNotFound`] if no source has it.
	pub fn get_binary(&self, entry: &str) -> Result<Vec<u8>> {
		self.try_get_binary(entry)?
			.ok_or_else(|| self.not_found(entry))
	}

	pub async fn get_string_async(&self, entry: &str) -> Result<String> {
		self.try_get_string_async(entry)
			.await?
			.ok_or_else(|| self.not_found(entry))
	}

	pub async fn get_binary_async(&self, entry: &str) -> Result<Vec<u8>> {
		self.try_get_binary_async(entry)
			.await?
			.ok_or_else(|| self.not_found(entry))
	}

	/// Like [`get_string`](Self::get_string), with absence reported as `Ok(None)`.
	pub fn try_get_string(&self, entry: &str) -> Result<Option<String>> {
		for (position, source) in self.sources.iter().enumerate() {
			if let Some(content) = source.load_string(entry)? {
				self.trace_hit(entry, position);
				return Ok(Some(content));
			}
		}
		self.trace_miss(entry);
		Ok(None)
	}

	pub fn try_get_binary(&self, entry: &str) -> Result<Option<Vec<u8>>> {
		for (position, source) in self.sources.iter().enumerate() {
			if let Some(content) = source.load_binary(entry)? {
				self.trace_hit(entry, position);
				return Ok(Some(content));
			}
		}
		self.trace_miss(entry);
		Ok(None)
	}

	pub async fn try_get_string_async(&self, entry: &str) -> Result<Option<String>> {
		for (position, source) in self.sources.iter().enumerate() {
			if let Some(content) = source.load_string_async(entry).await? {
				self.trace_hit(entry, position);
				return Ok(Some(content));
			}
		}
		self.trace_miss(entry);
		Ok(None)
	}

	pub async fn try_get_binary_async(&self, entry: &str) -> Result<Option<Vec<u8>>> {
		for (position, source) in self.sources.iter().enumerate() {
			if let Some(content) = source.load_binary_async(entry).await? {
				self.trace_hit(entry, position);
				return Ok(Some(content));
			}
		}
		self.trace_miss(entry);
		Ok(None)
	}

	fn not_found(&self, entry: &str) -> ContentError {
		ContentError::EntryNotFound {
			entry: entry.to_string(),
			set: self.name.clone(),
		}
	}

	#[allow(unused_variables)]
	fn trace_hit(&self, entry: &str, position: usize) {
		#[cfg(feature = "tracing")]
		tracing::trace!(
			set = %self.name,
			entry,
			source = %self.sources[position].describe(),
			"content entry resolved"
		);
	}

	#[allow(unused_variables)]
	fn trace_miss(&self, entry: &str) {
		#[cfg(feature = "tracing")]
		tracing::debug!(set = %self.name, entry, "content entry not found in any source");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MemorySource;

	fn memory(pairs: &[(&str, &str)]) -> Box<dyn ContentSource> {
		Box::new(MemorySource::from_pairs(pairs.iter().copied()).unwrap())
	}

	struct UnreadableSource;

	impl ContentSource for UnreadableSource {
		fn describe(&self) -> String {
			"unreadable".to_string()
		}

		fn load_binary(&self, _name: &str) -> Result<Option<Vec<u8>>> {
			Err(ContentError::Io(std::io::Error::other("device not ready")))
		}
	}

	fn failing_then_memory() -> ContentSet {
		let unreadable: Box<dyn ContentSource> = Box::new(UnreadableSource);
		ContentSet::new("S", vec![unreadable, memory(&[("a", "fallback")])]).unwrap()
	}

	#[test]
	fn test_blank_name_is_rejected() {
		assert!(matches!(
			ContentSet::new("  ", Vec::new()),
			Err(ContentError::InvalidName(_))
		));
	}

	#[test]
	fn test_empty_set_reports_not_found() {
		let set = ContentSet::new("Empty", Vec::new()).unwrap();
		let err = set.get_string("anything").unwrap_err();
		assert!(err.is_not_found());
		assert_eq!(
			err.to_string(),
			"content entry 'anything' not found in content set 'Empty'"
		);
	}

	#[test]
	fn test_try_get_reports_absence() {
		let set = ContentSet::new("Text", vec![memory(&[("a", "1")])]).unwrap();
		assert_eq!(set.try_get_string("a").unwrap().as_deref(), Some("1"));
		assert_eq!(set.try_get_binary("b").unwrap(), None);
	}

	#[test]
	fn test_source_errors_are_not_misses() {
		let set = failing_then_memory();
		assert!(matches!(set.get_string("a"), Err(ContentError::Io(_))));
		assert!(matches!(set.get_binary("a"), Err(ContentError::Io(_))));
		assert!(matches!(set.try_get_string("a"), Err(ContentError::Io(_))));
	}

	#[tokio::test]
	async fn test_source_errors_are_not_misses_async() {
		let set = failing_then_memory();
		assert!(matches!(set.get_string_async("a").await, Err(ContentError::Io(_))));
		assert!(matches!(set.get_binary_async("a").await, Err(ContentError::Io(_))));
		assert!(matches!(set.try_get_binary_async("a").await, Err(ContentError::Io(_))));
	}
}
