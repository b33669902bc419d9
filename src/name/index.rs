/* src/name/index.rs */

use std::collections::HashMap;

use crate::{ContentError, Result};

/// Case-insensitive map from canonical entry name to the locator of its content.
#[derive(Debug, Clone)]
pub struct NameIndex<L> {
	entries: HashMap<String, (String, L)>,
}

impl<L> Default for NameIndex<L> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}
}

impl<L> NameIndex<L> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an entry. A name already present, in any casing, is a `DuplicateEntry` error.
	pub fn insert(&mut self, name: String, locator: L, origin: &str) -> Result<()> {
		let key = name.to_lowercase();
		if let Some((existing, _)) = self.entries.get(&key) {
			return Err(ContentError::DuplicateEntry {
				name: existing.clone(),
				origin: origin.to_string(),
			});
		}
		self.entries.insert(key, (name, locator));
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&L> {
		self.entries.get(&name.to_lowercase()).map(|(_, locator)| locator)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Entry names in their discovered casing, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.entries.values().map(|(name, _)| name.as_str()).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
