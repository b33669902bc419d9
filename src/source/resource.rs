/* src/source/resource.rs */

use std::sync::Arc;

use crate::name::{NameIndex, NameOptions, RESOURCE_SEPARATORS, delegate_name_options};
use crate::{ContentError, ContentSource, Result};

/// A set of resources compiled into the program, addressed by dotted identifiers
/// such as `Reports.Sql.orders.sql`.
pub trait ResourceCatalog: Send + Sync {
	/// Name used in diagnostics and declarative configuration.
	fn label(&self) -> &str;

	/// Enumerates every resource identifier in the catalog.
	fn names(&self) -> Result<Vec<String>>;

	/// Reads one resource by its identifier.
	fn read(&self, name: &str) -> Result<Vec<u8>>;
}

impl<C: ResourceCatalog + ?Sized> ResourceCatalog for Arc<C> {
	fn label(&self) -> &str {
		(**self).label()
	}

	fn names(&self) -> Result<Vec<String>> {
		(**self).names()
	}

	fn read(&self, name: &str) -> Result<Vec<u8>> {
		(**self).read(name)
	}
}

impl<C: ResourceCatalog + ?Sized> ResourceCatalog for &C {
	fn label(&self) -> &str {
		(**self).label()
	}

	fn names(&self) -> Result<Vec<String>> {
		(**self).names()
	}

	fn read(&self, name: &str) -> Result<Vec<u8>> {
		(**self).read(name)
	}
}

/// One embedded resource.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
	pub name: &'static str,
	pub data: &'static [u8],
}

impl Resource {
	/// Pairs an identifier with its bytes, typically from `include_bytes!`.
	pub const fn new(name: &'static str, data: &'static [u8]) -> Self {
		Self { name, data }
	}
}

/// A catalog over a static table of resources.
///
/// ```
/// use shelf::{Resource, StaticCatalog};
///
/// static QUERIES: StaticCatalog = StaticCatalog::new(
/// 	"queries",
/// 	&[Resource::new("Queries.orders.sql", b"select * from orders")],
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
	label: &'static str,
	resources: &'static [Resource],
}

impl StaticCatalog {
	pub const fn new(label: &'static str, resources: &'static [Resource]) -> Self {
		Self { label, resources }
	}
}

impl ResourceCatalog for StaticCatalog {
	fn label(&self) -> &str {
		self.label
	}

	fn names(&self) -> Result<Vec<String>> {
		Ok(self.resources.iter().map(|r| r.name.to_string()).collect())
	}

	fn read(&self, name: &str) -> Result<Vec<u8>> {
		self.resources
			.iter()
			.find(|r| r.name == name)
			.map(|r| r.data.to_vec())
			.ok_or_else(|| ContentError::Manifest {
				catalog: self.label.to_string(),
				message: format!("resource '{}' is listed but cannot be read", name),
			})
	}
}

/// Options for [`ResourceSource`].
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
	pub(crate) names: NameOptions,
}

impl ResourceOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Only resources under this namespace are indexed; the namespace is stripped
	/// from entry names.
	pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
		self.names = self.names.prefix(namespace);
		self
	}

	delegate_name_options!();
}

/// Where an indexed entry lives: catalog position and full resource identifier.
#[derive(Debug, Clone)]
struct ResourceLocator {
	catalog: usize,
	resource: String,
}

/// Content embedded in the program through one or more [`ResourceCatalog`]s.
///
/// All catalogs are enumerated once, at construction.
pub struct ResourceSource {
	catalogs: Vec<Arc<dyn ResourceCatalog>>,
	index: NameIndex<ResourceLocator>,
}

impl ResourceSource {
	pub fn new<C: ResourceCatalog + 'static>(catalog: C, options: ResourceOptions) -> Result<Self> {
		let catalog: Arc<dyn ResourceCatalog> = Arc::new(catalog);
		Self::with_catalogs(vec![catalog], options)
	}

	pub fn with_catalogs(
		catalogs: Vec<Arc<dyn ResourceCatalog>>,
		options: ResourceOptions,
	) -> Result<Self> {
		let mut index = NameIndex::new();

		for (position, catalog) in catalogs.iter().enumerate() {
			let mut resources = catalog.names()?;
			resources.sort();
			let origin = format!("resource catalog '{}'", catalog.label());

			for resource in resources {
				if let Some(name) = options.names.canonicalize(&resource, RESOURCE_SEPARATORS) {
					let locator = ResourceLocator {
						catalog: position,
						resource,
					};
					index.insert(name, locator, &origin)?;
				}
			}
		}

		#[cfg(feature = "logging")]
		log::debug!(
			"Indexed {} resource entries from {} catalog(s)",
			index.len(),
			catalogs.len()
		);

		Ok(Self { catalogs, index })
	}

	/// Canonical names of all indexed entries, sorted.
	pub fn entries(&self) -> Vec<&str> {
		self.index.names()
	}

	pub fn len(&self) -> usize {
		self.index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}
}

impl ContentSource for ResourceSource {
	fn describe(&self) -> String {
		let labels: Vec<&str> = self.catalogs.iter().map(|c| c.label()).collect();
		format!(
			"resource source [{}] ({} entries)",
			labels.join(", "),
			self.index.len()
		)
	}

	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
		match self.index.get(name) {
			Some(locator) => self.catalogs[locator.catalog]
				.read(&locator.resource)
				.map(Some),
			None => Ok(None),
		}
	}
}
