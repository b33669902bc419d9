/* src/registry/mod.rs */

//!
//! The directory of content sets used by application startup code and runtime lookups.

mod lookup;
mod register;

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ContentSet;

/// A statically typed accessor over a registered content set.
///
/// Implementors name the set they are registered under and provide the factory
/// that wraps the set when it is registered.
///
/// ```
/// use std::sync::Arc;
/// use shelf::{ContentRegistry, ContentSet, ContentSetKind};
///
/// struct Greetings(Arc<ContentSet>);
///
/// impl ContentSetKind for Greetings {
/// 	const NAME: &'static str = "Greetings";
///
/// 	fn from_set(set: Arc<ContentSet>) -> Self {
/// 		Self(set)
/// 	}
/// }
///
/// let mut registry = ContentRegistry::new();
/// registry.register_typed::<Greetings>(|b| b.memory([("hello", "Hello!")]))?;
///
/// let greetings = registry.get_typed::<Greetings>()?;
/// assert_eq!(greetings.0.get_string("hello")?, "Hello!");
/// # Ok::<(), shelf::ContentError>(())
/// ```
pub trait ContentSetKind: Send + Sync + 'static {
	/// Name the set is registered under by default.
	const NAME: &'static str;

	fn from_set(set: Arc<ContentSet>) -> Self;
}

struct Registered {
	set: Arc<ContentSet>,
	typed: Option<Arc<dyn Any + Send + Sync>>,
}

/// Maps content set names, case-insensitively, to their sets.
///
/// Registration takes `&mut self` and happens once at startup. Afterwards the
/// registry is typically shared as `Arc<ContentRegistry>`; lookups only read
/// and need no locking.
#[derive(Default)]
pub struct ContentRegistry {
	sets: HashMap<String, Registered>,
}

impl std::fmt::Debug for ContentRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContentRegistry")
			.field("sets", &self.names())
			.finish()
	}
}

impl ContentRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	fn key(name: &str) -> String {
		name.to_lowercase()
	}
}
