/* src/registry/register.rs */

use std::any::Any;
use std::sync::Arc;

use super::{ContentRegistry, ContentSetKind, Registered};
use crate::{ContentBuilder, ContentError, ContentSet, ContentSource, Result};

impl ContentRegistry {
	/// Registers a content set over `sources`, tried in the given order.
	///
	/// Registering a name twice fails and leaves the first registration in place.
	pub fn register(
		&mut self,
		name: &str,
		sources: Vec<Box<dyn ContentSource>>,
	) -> Result<&mut Self> {
		self.insert(name, sources, |_| None)?;
		Ok(self)
	}

	/// Registers a content set whose sources are assembled by `configure`.
	pub fn register_with<F>(&mut self, name: &str, configure: F) -> Result<&mut Self>
	where
		F: FnOnce(ContentBuilder) -> ContentBuilder,
	{
		self.ensure_vacant(name)?;
		let sources = configure(ContentBuilder::new()).build()?;
		self.register(name, sources)
	}

	/// Registers a typed content set under [`ContentSetKind::NAME`].
	pub fn register_typed<T: ContentSetKind>(
		&mut self,
		configure: impl FnOnce(ContentBuilder) -> ContentBuilder,
	) -> Result<&mut Self> {
		self.register_typed_as::<T>(T::NAME, configure)
	}

	/// Registers a typed content set under an explicit name.
	pub fn register_typed_as<T: ContentSetKind>(
		&mut self,
		name: &str,
		configure: impl FnOnce(ContentBuilder) -> ContentBuilder,
	) -> Result<&mut Self> {
		self.ensure_vacant(name)?;
		let sources = configure(ContentBuilder::new()).build()?;
		self.insert(name, sources, |set| {
			let typed: Arc<dyn Any + Send + Sync> = Arc::new(T::from_set(set));
			Some(typed)
		})?;
		Ok(self)
	}

	pub(crate) fn ensure_vacant(&self, name: &str) -> Result<()> {
		if name.trim().is_empty() {
			return Err(ContentError::InvalidName("content set name is blank".to_string()));
		}
		if self.sets.contains_key(&Self::key(name)) {
			#[cfg(feature = "logging")]
			log::warn!("Rejected duplicate registration of content set '{}'", name);
			return Err(ContentError::DuplicateSet {
				name: name.to_string(),
			});
		}
		Ok(())
	}

	fn insert<F>(&mut self, name: &str, sources: Vec<Box<dyn ContentSource>>, wrap: F) -> Result<()>
	where
		F: FnOnce(Arc<ContentSet>) -> Option<Arc<dyn Any + Send + Sync>>,
	{
		self.ensure_vacant(name)?;
		let set = Arc::new(ContentSet::new(name, sources)?);
		let typed = wrap(Arc::clone(&set));

		#[cfg(feature = "logging")]
		log::info!(
			"Registered content set '{}' with {} source(s)",
			name,
			set.len()
		);

		self.sets.insert(Self::key(name), Registered { set, typed });
		Ok(())
	}
}
