/* src/name/mod.rs */

//!
//! Canonical entry names derived from discovered file paths and resource identifiers.
//!
//! Every discovered identifier goes through the same steps, in order:
//!
//! 1. Scope check against the configured prefix (`prefix` + separator), excluded on mismatch.
//! 2. The prefix and its separator are stripped.
//! 3. Extension filter, excluded on mismatch.
//! 4. The trailing `.extension` is stripped unless `keep_extension` is set.
//! 5. Name filter predicate, excluded when it returns false.
//! 6. Custom transformer, its result is the final name.
//!
//! Comparisons are case-insensitive.

mod index;

pub use index::NameIndex;

use std::sync::Arc;

/// Predicate deciding whether a name is kept.
pub type NameFilterFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Final rename applied to a name that survived filtering.
pub type NameTransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Separators used by dotted resource identifiers.
pub const RESOURCE_SEPARATORS: &[char] = &['.'];

/// Separators used by relative file paths.
pub const PATH_SEPARATORS: &[char] = &['/', '\\'];

/// Naming rules shared by file and resource sources.
#[derive(Clone, Default)]
pub struct NameOptions {
	pub(crate) prefix: Option<String>,
	pub(crate) extension: Option<String>,
	pub(crate) keep_extension: bool,
	pub(crate) filter: Option<NameFilterFn>,
	pub(crate) transformer: Option<NameTransformFn>,
}

impl std::fmt::Debug for NameOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NameOptions")
			.field("prefix", &self.prefix)
			.field("extension", &self.extension)
			.field("keep_extension", &self.keep_extension)
			.field("filter", &self.filter.as_ref().map(|_| "<fn>"))
			.field("transformer", &self.transformer.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

impl NameOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Restrict discovery to identifiers under `prefix` and strip it.
	pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
		let prefix = prefix.into();
		let prefix = prefix.trim_end_matches(['.', '/', '\\']);
		self.prefix = (!prefix.is_empty()).then(|| prefix.to_string());
		self
	}

	/// Only keep identifiers with this extension. A leading dot is ignored.
	pub fn extension(mut self, extension: impl Into<String>) -> Self {
		let extension = extension.into();
		let extension = extension.trim_start_matches('.');
		self.extension = (!extension.is_empty()).then(|| extension.to_string());
		self
	}

	/// Keep the extension as part of the entry name.
	pub fn keep_extension(mut self) -> Self {
		self.keep_extension = true;
		self
	}

	pub fn filter<F>(mut self, f: F) -> Self
	where
		F: Fn(&str) -> bool + Send + Sync + 'static,
	{
		self.filter = Some(Arc::new(f));
		self
	}

	pub fn transformer<F>(mut self, f: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		self.transformer = Some(Arc::new(f));
		self
	}

	/// Keep only names matching a regular expression.
	#[cfg(feature = "regex")]
	pub fn matching(self, pattern: &str) -> crate::Result<Self> {
		let regex = fancy_regex::Regex::new(pattern)
			.map_err(|e| crate::ContentError::Pattern(e.to_string()))?;
		Ok(self.filter(move |name| regex.is_match(name).unwrap_or(false)))
	}

	/// Runs a raw identifier through the pipeline. `None` means the identifier is excluded.
	pub fn canonicalize(&self, raw: &str, separators: &[char]) -> Option<String> {
		let mut name = raw;

		if let Some(prefix) = self.prefix.as_deref() {
			name = strip_scope(name, prefix, separators)?;
		}

		if let Some(extension) = self.extension.as_deref()
			&& !extension_of(name).is_some_and(|ext| eq_ignore_case(ext, extension))
		{
			return None;
		}

		if !self.keep_extension {
			name = strip_extension(name);
		}

		if let Some(filter) = &self.filter
			&& !filter(name)
		{
			return None;
		}

		let name = match &self.transformer {
			Some(transform) => transform(name),
			None => name.to_string(),
		};

		if name.is_empty() { None } else { Some(name) }
	}
}

/// Generates the naming setters on a source options type holding a `names: NameOptions` field.
macro_rules! delegate_name_options {
	() => {
		/// Only keep identifiers with this extension. A leading dot is ignored.
		pub fn extension(mut self, extension: impl Into<String>) -> Self {
			self.names = self.names.extension(extension);
			self
		}

		/// Keep the extension as part of the entry name.
		pub fn keep_extension(mut self) -> Self {
			self.names = self.names.keep_extension();
			self
		}

		pub fn filter<F>(mut self, f: F) -> Self
		where
			F: Fn(&str) -> bool + Send + Sync + 'static,
		{
			self.names = self.names.filter(f);
			self
		}

		pub fn transformer<F>(mut self, f: F) -> Self
		where
			F: Fn(&str) -> String + Send + Sync + 'static,
		{
			self.names = self.names.transformer(f);
			self
		}

		#[cfg(feature = "regex")]
		pub fn matching(mut self, pattern: &str) -> $crate::Result<Self> {
			self.names = self.names.matching(pattern)?;
			Ok(self)
		}

		/// The naming rules in effect.
		pub fn names(&self) -> &$crate::name::NameOptions {
			&self.names
		}
	};
}

pub(crate) use delegate_name_options;

/// Rewrites path separators to dots: `sql/orders` → `sql.orders`.
pub fn separators_to_dots(name: &str) -> String {
	name.replace(PATH_SEPARATORS, ".")
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
	a.len() == b.len() && a.to_lowercase() == b.to_lowercase()
}

fn strip_scope<'a>(name: &'a str, prefix: &str, separators: &[char]) -> Option<&'a str> {
	let head = name.get(..prefix.len())?;
	if !eq_ignore_case(head, prefix) {
		return None;
	}
	let rest = &name[prefix.len()..];
	let mut chars = rest.chars();
	match chars.next() {
		Some(c) if separators.contains(&c) => {
			let rest = chars.as_str();
			(!rest.is_empty()).then_some(rest)
		}
		_ => None,
	}
}

/// Byte offset of the extension dot within the final path segment.
fn extension_dot(name: &str) -> Option<usize> {
	let segment_start = name.rfind(PATH_SEPARATORS).map(|i| i + 1).unwrap_or(0);
	let dot = name.rfind('.')?;
	(dot > segment_start).then_some(dot)
}

fn extension_of(name: &str) -> Option<&str> {
	extension_dot(name).map(|i| &name[i + 1..])
}

fn strip_extension(name: &str) -> &str {
	extension_dot(name).map(|i| &name[..i]).unwrap_or(name)
}
