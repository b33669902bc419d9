/* src/config.rs */

//!
//! Declarative registry configuration.
//!
//! Content sets can be described in TOML or JSON instead of code:
//!
//! ```toml
//! [[sets]]
//! name = "Sql"
//!
//! [[sets.sources]]
//! kind = "files"
//! dir = "sql"
//! extension = "sql"
//!
//! [[sets.sources]]
//! kind = "resources"
//! catalog = "queries"
//! namespace = "Queries"
//! extension = "sql"
//! ```
//!
//! Resource catalogs are compiled into the program, so they are referenced by
//! label and resolved against the [`Catalogs`] passed to [`RegistryConfig::apply`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::{
	ContentBuilder, ContentError, ContentRegistry, FileOptions, IndexPolicy, ResourceCatalog,
	ResourceOptions, Result,
};

/// Resource catalogs available to a configuration, keyed by label.
pub type Catalogs = HashMap<String, Arc<dyn ResourceCatalog>>;

/// Collects catalogs into a [`Catalogs`] map keyed by their labels.
pub fn catalogs<I>(items: I) -> Catalogs
where
	I: IntoIterator<Item = Arc<dyn ResourceCatalog>>,
{
	items
		.into_iter()
		.map(|catalog| (catalog.label().to_string(), catalog))
		.collect()
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
	#[serde(default)]
	pub sets: Vec<SetConfig>,
	/// Directory relative `dir` entries are resolved against.
	#[serde(skip)]
	pub base_dir: Option<PathBuf>,
}

/// One content set and its sources, in lookup order.
#[derive(Debug, Clone, Deserialize)]
pub struct SetConfig {
	pub name: String,
	#[serde(default)]
	pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
	Files {
		dir: PathBuf,
		extension: Option<String>,
		#[serde(default)]
		keep_extension: bool,
		/// Use dots instead of path separators in entry names.
		#[serde(default)]
		dotted: bool,
		#[serde(default = "default_recursive")]
		recursive: bool,
		pattern: Option<String>,
		#[serde(default)]
		rescan: bool,
	},
	Resources {
		catalog: String,
		namespace: Option<String>,
		extension: Option<String>,
		#[serde(default)]
		keep_extension: bool,
	},
	Memory {
		entries: BTreeMap<String, String>,
	},
}

fn default_recursive() -> bool {
	true
}

impl RegistryConfig {
	pub fn from_toml_str(text: &str) -> Result<Self> {
		toml::from_str(text).map_err(|e| ContentError::Config(e.to_string()))
	}

	pub fn from_json_str(text: &str) -> Result<Self> {
		serde_json::from_str(text).map_err(|e| ContentError::Config(e.to_string()))
	}

	/// Reads a `.toml` or `.json` document. Relative directories are resolved
	/// against the document's own directory.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path)?;

		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.map(str::to_ascii_lowercase);
		let mut config = match extension.as_deref() {
			Some("toml") => Self::from_toml_str(&text)?,
			Some("json") => Self::from_json_str(&text)?,
			_ => {
				return Err(ContentError::Config(format!(
					"unsupported config format: {}",
					path.display()
				)));
			}
		};

		config.base_dir = path.parent().map(Path::to_path_buf);
		Ok(config)
	}

	/// Registers every configured set.
	///
	/// All sets are built and their names checked before the first one is
	/// registered, so on error the registry is left unchanged.
	pub fn apply(&self, registry: &mut ContentRegistry, catalogs: &Catalogs) -> Result<()> {
		let mut seen = HashSet::new();
		let mut pending = Vec::with_capacity(self.sets.len());

		for set in &self.sets {
			registry.ensure_vacant(&set.name)?;
			if !seen.insert(set.name.to_lowercase()) {
				return Err(ContentError::DuplicateSet {
					name: set.name.clone(),
				});
			}

			let mut builder = ContentBuilder::new();
			for source in &set.sources {
				builder = self.add_source(builder, source, catalogs)?;
			}
			pending.push((set.name.as_str(), builder.build()?));
		}

		for (name, sources) in pending {
			registry.register(name, sources)?;
		}
		Ok(())
	}

	fn add_source(
		&self,
		builder: ContentBuilder,
		source: &SourceConfig,
		catalogs: &Catalogs,
	) -> Result<ContentBuilder> {
		let builder = match source {
			SourceConfig::Files {
				dir,
				extension,
				keep_extension,
				dotted,
				recursive,
				pattern,
				rescan,
			} => {
				let mut options = FileOptions::new().recursive(*recursive);
				if let Some(extension) = extension {
					options = options.extension(extension.as_str());
				}
				if *keep_extension {
					options = options.keep_extension();
				}
				if *dotted {
					options = options.dotted_names();
				}
				if *rescan {
					options = options.policy(IndexPolicy::Rescan);
				}
				if let Some(pattern) = pattern {
					options = with_pattern(options, pattern)?;
				}
				builder.files(self.resolve(dir), options)
			}
			SourceConfig::Resources {
				catalog,
				namespace,
				extension,
				keep_extension,
			} => {
				let found = catalogs.get(catalog).ok_or_else(|| {
					ContentError::Config(format!("unknown resource catalog '{}'", catalog))
				})?;
				let mut options = ResourceOptions::new();
				if let Some(namespace) = namespace {
					options = options.namespace(namespace.as_str());
				}
				if let Some(extension) = extension {
					options = options.extension(extension.as_str());
				}
				if *keep_extension {
					options = options.keep_extension();
				}
				builder.resources(Arc::clone(found), options)
			}
			SourceConfig::Memory { entries } => builder.memory(entries.clone()),
		};
		Ok(builder)
	}

	fn resolve(&self, dir: &Path) -> PathBuf {
		match &self.base_dir {
			Some(base) if dir.is_relative() => base.join(dir),
			_ => dir.to_path_buf(),
		}
	}
}

#[cfg(feature = "glob")]
fn with_pattern(options: FileOptions, pattern: &str) -> Result<FileOptions> {
	Ok(options.search_pattern(pattern))
}

#[cfg(not(feature = "glob"))]
fn with_pattern(_options: FileOptions, pattern: &str) -> Result<FileOptions> {
	Err(ContentError::Config(format!(
		"search pattern '{}' requires the `glob` feature",
		pattern
	)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_toml() {
		let config = RegistryConfig::from_toml_str(
			r#"
			[[sets]]
			name = "Sql"

			[[sets.sources]]
			kind = "files"
			dir = "sql"
			extension = "sql"

			[[sets.sources]]
			kind = "memory"
			entries = { fallback = "select 1" }
			"#,
		)
		.unwrap();

		assert_eq!(config.sets.len(), 1);
		assert_eq!(config.sets[0].sources.len(), 2);
		match &config.sets[0].sources[0] {
			SourceConfig::Files { recursive, rescan, .. } => {
				assert!(*recursive);
				assert!(!*rescan);
			}
			other => panic!("Expected files source, got {:?}", other),
		}
	}

	#[test]
	fn test_unknown_kind_is_rejected() {
		let result = RegistryConfig::from_json_str(
			r#"{ "sets": [{ "name": "Web", "sources": [{ "kind": "http" }] }] }"#,
		);
		assert!(matches!(result, Err(ContentError::Config(_))));
	}

	#[test]
	fn test_unknown_catalog() {
		let config = RegistryConfig::from_json_str(
			r#"{ "sets": [{ "name": "Text", "sources": [{ "kind": "resources", "catalog": "nope" }] }] }"#,
		)
		.unwrap();

		let mut registry = ContentRegistry::new();
		let result = config.apply(&mut registry, &Catalogs::new());
		assert!(matches!(result, Err(ContentError::Config(_))));
		assert!(registry.is_empty());
	}

	#[test]
	fn test_failed_apply_registers_nothing() {
		let config = RegistryConfig::from_json_str(
			r#"{ "sets": [
				{ "name": "Text", "sources": [{ "kind": "memory", "entries": { "a": "1" } }] },
				{ "name": "Data", "sources": [{ "kind": "resources", "catalog": "nope" }] }
			] }"#,
		)
		.unwrap();

		let mut registry = ContentRegistry::new();
		assert!(config.apply(&mut registry, &Catalogs::new()).is_err());
		assert!(registry.is_empty());

		// Nothing was left behind, so a corrected retry is not a duplicate
		let retry = RegistryConfig {
			sets: config.sets[..1].to_vec(),
			base_dir: None,
		};
		retry.apply(&mut registry, &Catalogs::new()).unwrap();
		assert_eq!(registry.names(), vec!["Text"]);
	}
}
