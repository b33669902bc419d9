/* tests/registry_tests.rs */

use std::sync::Arc;

use shelf::{
	ContentError, ContentRegistry, ContentSet, ContentSetKind, ContentSource, MemorySource, Result,
};

struct Messages(Arc<ContentSet>);

impl ContentSetKind for Messages {
	const NAME: &'static str = "Messages";

	fn from_set(set: Arc<ContentSet>) -> Self {
		Self(set)
	}
}

impl Messages {
	fn greeting(&self) -> Result<String> {
		self.0.get_string("Greeting")
	}
}

struct Templates(#[allow(dead_code)] Arc<ContentSet>);

impl ContentSetKind for Templates {
	const NAME: &'static str = "Templates";

	fn from_set(set: Arc<ContentSet>) -> Self {
		Self(set)
	}
}

/// Counts lookups so tests can prove a source was never consulted.
struct Probe {
	inner: MemorySource,
	calls: std::sync::atomic::AtomicUsize,
}

impl ContentSource for Probe {
	fn describe(&self) -> String {
		"probe".to_string()
	}

	fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
		self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
		self.inner.load_binary(name)
	}
}

#[test]
fn test_memory_greeting() {
	let mut registry = ContentRegistry::new();
	registry
		.register_with("Text", |b| b.memory([("Greeting", "Hello")]))
		.unwrap();

	assert_eq!(registry.get_string("Text", "Greeting").unwrap(), "Hello");
	assert_eq!(registry.get_string("text", "GREETING").unwrap(), "Hello");
	assert_eq!(registry.get_binary("Text", "greeting").unwrap(), b"Hello");
}

#[test]
fn test_duplicate_registration_keeps_first() {
	let mut registry = ContentRegistry::new();
	registry
		.register_with("Sql", |b| b.memory([("q", "first")]))
		.unwrap();

	let err = registry
		.register_with("SQL", |b| b.memory([("q", "second")]))
		.unwrap_err();
	assert!(matches!(err, ContentError::DuplicateSet { .. }));

	assert_eq!(registry.len(), 1);
	assert_eq!(registry.get_string("Sql", "q").unwrap(), "first");
}

#[test]
fn test_unknown_set_and_entry() {
	let mut registry = ContentRegistry::new();
	registry.register("Empty", Vec::new()).unwrap();

	assert!(matches!(
		registry.get("Nope"),
		Err(ContentError::SetNotFound { .. })
	));

	let err = registry.get_string("Empty", "anything").unwrap_err();
	assert!(err.is_not_found());
}

#[test]
fn test_first_hit_stops_the_chain() {
	let probe = Arc::new(Probe {
		inner: MemorySource::from_pairs([("a", "from probe"), ("b", "from probe")]).unwrap(),
		calls: Default::default(),
	});

	struct Shared(Arc<Probe>);
	impl ContentSource for Shared {
		fn describe(&self) -> String {
			self.0.describe()
		}
		fn load_binary(&self, name: &str) -> Result<Option<Vec<u8>>> {
			self.0.load_binary(name)
		}
	}

	let mut registry = ContentRegistry::new();
	registry
		.register_with("Chain", |b| {
			b.memory([("a", "from memory")])
				.fallback(Shared(Arc::clone(&probe)))
		})
		.unwrap();

	assert_eq!(registry.get_string("Chain", "a").unwrap(), "from memory");
	assert_eq!(probe.calls.load(std::sync::atomic::Ordering::SeqCst), 0);

	assert_eq!(registry.get_string("Chain", "b").unwrap(), "from probe");
	assert_eq!(probe.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_typed_access() {
	let mut registry = ContentRegistry::new();
	registry
		.register_typed::<Messages>(|b| b.memory([("Greeting", "Hello")]))
		.unwrap()
		.register_with("Plain", |b| b.memory([("Greeting", "Hi")]))
		.unwrap();

	let messages = registry.get_typed::<Messages>().unwrap();
	assert_eq!(messages.greeting().unwrap(), "Hello");

	// The typed set is reachable by name as well
	assert_eq!(registry.get_string("messages", "greeting").unwrap(), "Hello");

	assert!(matches!(
		registry.get_typed_by_name::<Messages>("Plain"),
		Err(ContentError::TypeMismatch { .. })
	));
	assert!(matches!(
		registry.get_typed_by_name::<Templates>("Messages"),
		Err(ContentError::TypeMismatch { .. })
	));
	assert!(matches!(
		registry.get_typed::<Templates>(),
		Err(ContentError::SetNotFound { .. })
	));
}

#[test]
fn test_typed_under_explicit_name() {
	let mut registry = ContentRegistry::new();
	registry
		.register_typed_as::<Templates>("Mail", |b| b.memory([("welcome", "Welcome!")]))
		.unwrap();

	assert!(registry.get_typed_by_name::<Templates>("MAIL").is_ok());
	assert!(!registry.contains(Templates::NAME));
	assert_eq!(registry.names(), vec!["Mail"]);
}

#[test]
fn test_builder_error_aborts_registration() {
	let mut registry = ContentRegistry::new();
	let err = registry
		.register_with("Broken", |b| b.memory([("a", "1"), ("A", "2")]))
		.unwrap_err();

	assert!(matches!(err, ContentError::DuplicateEntry { .. }));
	assert!(registry.is_empty());
}

#[tokio::test]
async fn test_async_lookups() {
	let mut registry = ContentRegistry::new();
	registry
		.register_with("Text", |b| b.memory([("Greeting", "Hello")]))
		.unwrap();
	let registry = Arc::new(registry);

	let mut handles = Vec::new();
	for _ in 0..8 {
		let registry = Arc::clone(&registry);
		handles.push(tokio::spawn(async move {
			registry.get_string_async("Text", "greeting").await
		}));
	}

	for handle in handles {
		assert_eq!(handle.await.unwrap().unwrap(), "Hello");
	}

	let err = registry.get_binary_async("Text", "missing").await.unwrap_err();
	assert!(err.is_not_found());
}
