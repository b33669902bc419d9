/* src/source/file.rs */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use walkdir::WalkDir;

use crate::name::{NameIndex, NameOptions, PATH_SEPARATORS, delegate_name_options, separators_to_dots};
use crate::{ContentError, ContentSource, Result};

/// When a [`FileSource`] enumerates its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
	/// Scan once at construction; files added later are not seen.
	#[default]
	Eager,
	/// Scan on every lookup so newly added files are picked up, at the cost of repeated I/O.
	Rescan,
}

/// Options for [`FileSource`].
#[derive(Debug, Clone)]
pub struct FileOptions {
	pub(crate) names: NameOptions,
	pub(crate) recursive: bool,
	pub(crate) policy: IndexPolicy,
	#[cfg(feature = "glob")]
	pub(crate) pattern: Option<String>,
}

impl Default for FileOptions {
	fn default() -> Self {
		Self {
			names: NameOptions::default(),
			recursive: true,
			policy: IndexPolicy::default(),
			#[cfg(feature = "glob")]
			pattern: None,
		}
	}
}

impl FileOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Only index files directly inside the base directory.
	pub fn top_directory_only(mut self) -> Self {
		self.recursive = false;
		self
	}

	pub fn recursive(mut self, recursive: bool) -> Self {
		self.recursive = recursive;
		self
	}

	pub fn policy(mut self, policy: IndexPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Wildcard pattern matched against file names, e.g. `*.sql`.
	#[cfg(feature = "glob")]
	pub fn search_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.pattern = Some(pattern.into());
		self
	}

	/// Name entries with dots instead of path separators: `reports/daily.sql` → `reports.daily`.
	pub fn dotted_names(self) -> Self {
		self.transformer(separators_to_dots)
	}

	delegate_name_options!();
}

/// Content stored as files below a base directory.
///
/// Entry names are paths relative to the base directory, run through the
/// naming rules of [`FileOptions`].
pub struct FileSource {
	root: PathBuf,
	options: FileOptions,
	#[cfg(feature = "glob")]
	matcher: Option<globset::GlobMatcher>,
	index: Option<NameIndex<PathBuf>>,
}

impl FileSource {
	/// Creates a FileSource rooted at `root`, which must be an existing directory.
	pub fn new(root: impl Into<PathBuf>, options: FileOptions) -> Result<Self> {
		let root = root.into();
		if root.as_os_str().is_empty() {
			return Err(ContentError::InvalidName("base directory is blank".to_string()));
		}

		let root = match std::fs::canonicalize(&root) {
			Ok(path) if path.is_dir() => path,
			Ok(_) => return Err(ContentError::MissingDirectory(root)),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ContentError::MissingDirectory(root));
			}
			Err(e) => return Err(ContentError::Io(e)),
		};

		#[cfg(feature = "glob")]
		let matcher = match options.pattern.as_deref() {
			Some(pattern) => Some(
				globset::Glob::new(pattern)
					.map_err(|e| ContentError::Pattern(e.to_string()))?
					.compile_matcher(),
			),
			None => None,
		};

		let mut source = Self {
			root,
			options,
			#[cfg(feature = "glob")]
			matcher,
			index: None,
		};

		// Rescan sources are scanned once as well, so name collisions fail here.
		let index = source.scan()?;
		#[cfg(feature = "logging")]
		log::debug!("Indexed {} file entries under {:?}", index.len(), source.root);
		if source.options.policy == IndexPolicy::Eager {
			source.index = Some(index);
		}

		Ok(source)
	}

	/// The canonical base directory.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Canonical names of all entries, sorted. Rescans under [`IndexPolicy::Rescan`].
	pub fn entries(&self) -> Result<Vec<String>> {
		let names = match &self.index {
			Some(index) => index.names().into_iter().map(str::to_string).collect(),
			None => self.scan()?.names().into_iter().map(str::to_string).collect(),
		};
		Ok(names)
	}

	fn scan(&self) -> Result<NameIndex<PathBuf>> {
		let files = collect_files(&self.root, self.options.recursive)?;

		let origin = format!("file source {:?}", self.root);
		let mut index = NameIndex::new();

		for path in files {
			#[cfg(feature = "glob")]
			if let Some(matcher) = &self.matcher
				&& !path.file_name().is_some_and(|name| matcher.is_match(name))
			{
				continue;
			}

			let Ok(relative) = path.strip_prefix(&self.root) else {
				continue;
			};
			let Some(raw) = relative.to_str() else {
				#[cfg(feature = "logging")]
				log::warn!("Skipping non UTF-8 file name {:?}", path);
				continue;
			};

			if let Some(name) = self.options.names.canonicalize(raw, PATH_SEPARATORS) {
				index.insert(name, path, &origin)?;
			}
		}

		Ok(index)
	}

	fn locate(&self, name: &str) -> Result<Option<PathBuf>> {
		match &self.index {
			Some(index) => Ok(index.get(name).cloned()),
			None => Ok(self.scan()?.get(name).cloned()),
		}
	}

	async fn locate_async(&self, name: &str) -> Result<Option<PathBuf>> {
		if let Some(index) = &self.index {
			return Ok(index.get(name).cloned());
		}

		let scanner = Self {
			root: self.root.clone(),
			options: self.options.clone(),
			#[cfg(feature = "glob")]
			matcher: self.matcher.clone(),
			index: None,
		};
		let name = name.to_string();
		tokio::task::spawn_blocking(move || -> Result<Option<PathBuf>> {
			Ok(scanner.scan()?.get(&name).cloned())
		})
		.await
		.map_err(|e| ContentError::Io(std::io::Error::other(e)))?
	}
}

/// Every regular file below `root`, sorted. Symlinks are followed; cycles and
/// dangling links are skipped.
fn collect_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
	let mut walker = WalkDir::new(root).follow_links(true).min_depth(1);
	if !recursive {
		walker = walker.max_depth(1);
	}

	let mut files = Vec::new();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) if e.loop_ancestor().is_some() => {
				#[cfg(feature = "logging")]
				log::warn!("Skipping symlink cycle at {:?}", e.path());
				continue;
			}
			Err(e) if e.io_error().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) => {
				continue;
			}
			Err(e) => return Err(ContentError::Io(e.into())),
		};

		if entry.file_type().is_file() {
			files.push(entry.into_path());
		}
	}

	files.sort();
	Ok(files)
}

#[async_trait]
impl ContentSource for FileSource {
	fn describe(&self) -> String {
		match &self.index {
			Some(index) => format!("file source {:?} ({} entries)", self.root, index.len()),
			None => format!("file source {:?} (rescan)", self.root),
		}
	}

	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
		match self.locate(name)? {
			Some(path) => Ok(Some(std::fs::read(path)?)),
			None => Ok(None),
		}
	}

	async fn load_binary_async(&self, name: &str) -> Result<Option<Vec<u8>>> {
		match self.locate_async(name).await? {
			Some(path) => Ok(Some(fs::read(path).await?)),
			None => Ok(None),
		}
	}
}
