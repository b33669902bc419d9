use async_trait::async_trait;

use crate::{ContentSource, Result};

#[cfg(feature = "fs")]
use std::{path::PathBuf, sync::Arc};

#[cfg(feature = "fs")]
use super::{FileOptions, FileSource, ResourceCatalog, ResourceOptions, ResourceSource};
#[cfg(feature = "fs")]
use crate::name::{
	NameFilterFn, NameOptions, NameTransformFn, delegate_name_options, separators_to_dots,
};

/// Two sources packaged as one: the second is consulted only when the first misses.
pub struct ChainSource {
	first: Box<dyn ContentSource>,
	second: Box<dyn ContentSource>,
}

impl ChainSource {
	pub fn new(first: impl ContentSource + 'static, second: impl ContentSource + 'static) -> Self {
		Self {
			first: Box::new(first),
			second: Box::new(second),
		}
	}

	/// Files under `dir`, falling back to resources of `catalog`, both named by the
	/// same rules so an entry resolves the same way wherever it is stored.
	#[cfg(feature = "fs")]
	pub fn files_and_resources<C: ResourceCatalog + 'static>(
		dir: impl Into<PathBuf>,
		catalog: C,
		options: FileAndResourceOptions,
	) -> Result<Self> {
		let (file_options, resource_options) = options.split();
		Ok(Self::new(
			FileSource::new(dir, file_options)?,
			ResourceSource::new(catalog, resource_options)?,
		))
	}
}

#[async_trait]
impl ContentSource for ChainSource {
	fn describe(&self) -> String {
		format!("chain [{} -> {}]", self.first.describe(), self.second.describe())
	}

	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
		match self.first.load_binary(name)? {
			Some(content) => Ok(Some(content)),
			None => self.second.load_binary(name),
		}
	}

	fn load_string(&self, name: &str) -> Result<Option<String>> {
		match self.first.load_string(name)? {
			Some(content) => Ok(Some(content)),
			None => self.second.load_string(name),
		}
	}

	async fn load_binary_async(&self, name: &str) -> Result<Option<Vec<u8>>> {
		match self.first.load_binary_async(name).await? {
			Some(content) => Ok(Some(content)),
			None => self.second.load_binary_async(name).await,
		}
	}

	async fn load_string_async(&self, name: &str) -> Result<Option<String>> {
		match self.first.load_string_async(name).await? {
			Some(content) => Ok(Some(content)),
			None => self.second.load_string_async(name).await,
		}
	}
}

/// One naming scheme for a file source and a resource source used together.
///
/// File paths are normalised to dotted names (`sql/orders.sql` → `sql.orders`)
/// before filters and transformers run, which makes them line up with resource
/// identifiers below the namespace.
#[cfg(feature = "fs")]
#[derive(Debug, Clone, Default)]
pub struct FileAndResourceOptions {
	pub(crate) names: NameOptions,
	namespace: Option<String>,
}

#[cfg(feature = "fs")]
impl FileAndResourceOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Namespace stripped from resource identifiers.
	pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = Some(namespace.into());
		self
	}

	delegate_name_options!();

	/// Derives the options of the two underlying sources.
	pub fn split(self) -> (FileOptions, ResourceOptions) {
		let mut file_names = self.names.clone();
		if let Some(filter) = self.names.filter.clone() {
			let dotted: NameFilterFn = Arc::new(move |name: &str| filter(&separators_to_dots(name)));
			file_names.filter = Some(dotted);
		}
		let dotted: NameTransformFn = match self.names.transformer.clone() {
			Some(transform) => Arc::new(move |name: &str| transform(&separators_to_dots(name))),
			None => Arc::new(separators_to_dots),
		};
		file_names.transformer = Some(dotted);

		let file_options = FileOptions {
			names: file_names,
			..FileOptions::default()
		};

		let mut resource_options = ResourceOptions { names: self.names };
		if let Some(namespace) = self.namespace {
			resource_options = resource_options.namespace(namespace);
		}

		(file_options, resource_options)
	}
}
