use std::any::type_name;
use std::sync::Arc;

use super::{ContentRegistry, ContentSetKind};
use crate::{ContentError, ContentSet, Result};

impl ContentRegistry {
	/// Gets a content set by name.
	pub fn get(&self, name: &str) -> Result<Arc<ContentSet>> {
		self.sets
			.get(&Self::key(name))
			.map(|registered| Arc::clone(&registered.set))
			.ok_or_else(|| ContentError::SetNotFound {
				name: name.to_string(),
			})
	}

	/// Gets the typed accessor registered under [`ContentSetKind::NAME`].
	pub fn get_typed<T: ContentSetKind>(&self) -> Result<Arc<T>> {
		self.get_typed_by_name::<T>(T::NAME)
	}

	/// Gets a typed accessor by set name.
	///
	/// Fails with [`ContentError::SetNotFound`] when nothing is registered under
	/// `name`, and with [`ContentError::TypeMismatch`] when the set was registered
	/// untyped or as a different kind.
	pub fn get_typed_by_name<T: ContentSetKind>(&self, name: &str) -> Result<Arc<T>> {
		let registered = self
			.sets
			.get(&Self::key(name))
			.ok_or_else(|| ContentError::SetNotFound {
				name: name.to_string(),
			})?;

		let mismatch = || ContentError::TypeMismatch {
			name: name.to_string(),
			expected: type_name::<T>(),
		};

		let typed = registered.typed.clone().ok_or_else(mismatch)?;
		typed.downcast::<T>().map_err(|_| mismatch())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.sets.contains_key(&Self::key(name))
	}

	/// Names of all registered sets, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.sets.values().map(|r| r.set.name()).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.sets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sets.is_empty()
	}

	/// Gets one entry of one set as text.
	pub fn get_string(&self, set: &str, entry: &str) -> Result<String> {
		self.get(set)?.get_string(entry)
	}

	pub fn get_binary(&self, set: &str, entry: &str) -> Result<Vec<u8>> {
		self.get(set)?.get_binary(entry)
	}

	pub async fn get_string_async(&self, set: &str, entry: &str) -> Result<String> {
		self.get(set)?.get_string_async(entry).await
	}

	pub async fn get_binary_async(&self, set: &str, entry: &str) -> Result<Vec<u8>> {
		self.get(set)?.get_binary_async(entry).await
	}
}
