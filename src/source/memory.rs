/* src/source/memory.rs */

use std::collections::HashMap;

use crate::{ContentError, ContentSource, Result};

/// A fixed table of text entries, useful for tests and defaults.
///
/// Keys are matched case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
	data: HashMap<String, (String, String)>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a source from key/value pairs, rejecting duplicate keys.
	pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut source = Self::new();
		for (key, value) in pairs {
			source.insert(key, value)?;
		}
		Ok(source)
	}

	/// Inserts an entry. Keys are unique regardless of casing.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
		let key = key.into();
		if key.trim().is_empty() {
			return Err(ContentError::InvalidName("memory entry key is blank".to_string()));
		}
		let folded = key.to_lowercase();
		if let Some((existing, _)) = self.data.get(&folded) {
			return Err(ContentError::DuplicateEntry {
				name: existing.clone(),
				origin: self.describe(),
			});
		}
		self.data.insert(folded, (key, value.into()));
		Ok(())
	}

	/// Consuming variant of [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
		self.insert(key, value)?;
		Ok(self)
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	fn lookup(&self, name: &str) -> Option<&str> {
		self.data
			.get(&name.to_lowercase())
			.map(|(_, value)| value.as_str())
	}
}

impl ContentSource for MemorySource {
	fn describe(&self) -> String {
		format!("memory source ({} entries)", self.data.len())
	}

	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
		Ok(self.lookup(name).map(|value| value.as_bytes().to_vec()))
	}

	fn load_string(&self, name: &str) -> Result<Option<String>> {
		Ok(self.lookup(name).map(str::to_string))
	}
}
