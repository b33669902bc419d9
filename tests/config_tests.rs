/* tests/config_tests.rs */

#![cfg(feature = "config")]

use std::fs;
use std::sync::Arc;

use shelf::config::{Catalogs, RegistryConfig, catalogs};
use shelf::{ContentError, ContentRegistry, Resource, ResourceCatalog, StaticCatalog};

static QUERIES: StaticCatalog = StaticCatalog::new(
	"queries",
	&[
		Resource::new("Queries.customers.sql", include_bytes!("fixtures/customers.sql")),
		Resource::new("Queries.orders.sql", include_bytes!("fixtures/orders.sql")),
	],
);

fn known_catalogs() -> Catalogs {
	let queries: Arc<dyn ResourceCatalog> = Arc::new(QUERIES);
	catalogs([queries])
}

#[test]
fn test_toml_file_with_relative_dir() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("sql")).unwrap();
	fs::write(dir.path().join("sql").join("orders.sql"), "Source: File").unwrap();

	let config_path = dir.path().join("content.toml");
	fs::write(
		&config_path,
		r#"
[[sets]]
name = "Sql"

[[sets.sources]]
kind = "files"
dir = "sql"
extension = "sql"

[[sets.sources]]
kind = "resources"
catalog = "queries"
namespace = "Queries"
extension = "sql"

[[sets]]
name = "Text"

[[sets.sources]]
kind = "memory"
entries = { Greeting = "Hello" }
"#,
	)
	.unwrap();

	let config = RegistryConfig::load(&config_path).unwrap();
	let mut registry = ContentRegistry::new();
	config.apply(&mut registry, &known_catalogs()).unwrap();

	assert_eq!(registry.names(), vec!["Sql", "Text"]);
	assert_eq!(registry.get_string("Sql", "orders").unwrap(), "Source: File");
	assert_eq!(registry.get_string("Sql", "customers").unwrap(), "Source: Resource");
	assert_eq!(registry.get_string("Text", "greeting").unwrap(), "Hello");
}

#[test]
fn test_json_config() {
	let config = RegistryConfig::from_json_str(
		r#"{
			"sets": [
				{
					"name": "Sql",
					"sources": [
						{ "kind": "resources", "catalog": "queries", "namespace": "Queries", "keep_extension": true }
					]
				}
			]
		}"#,
	)
	.unwrap();

	let mut registry = ContentRegistry::new();
	config.apply(&mut registry, &known_catalogs()).unwrap();
	assert_eq!(registry.get_string("Sql", "orders.sql").unwrap(), "Source: Resource");
	assert!(registry.get_string("Sql", "orders").unwrap_err().is_not_found());
}

#[test]
fn test_duplicate_sets_in_config() {
	let config = RegistryConfig::from_toml_str(
		r#"
[[sets]]
name = "Text"

[[sets]]
name = "text"
"#,
	)
	.unwrap();

	let mut registry = ContentRegistry::new();
	let err = config.apply(&mut registry, &Catalogs::new()).unwrap_err();
	assert!(matches!(err, ContentError::DuplicateSet { .. }));
	assert!(registry.is_empty());
}

#[test]
fn test_apply_does_not_shadow_existing_sets() {
	let mut registry = ContentRegistry::new();
	registry
		.register_with("Sql", |b| b.memory([("orders", "from code")]))
		.unwrap();

	let config = RegistryConfig::from_toml_str(
		r#"
[[sets]]
name = "Text"

[[sets]]
name = "SQL"
"#,
	)
	.unwrap();

	let err = config.apply(&mut registry, &known_catalogs()).unwrap_err();
	assert!(matches!(err, ContentError::DuplicateSet { .. }));
	assert_eq!(registry.names(), vec!["Sql"]);
	assert_eq!(registry.get_string("Sql", "orders").unwrap(), "from code");
}

#[test]
fn test_unsupported_extension() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("content.yaml");
	fs::write(&path, "sets: []").unwrap();

	assert!(matches!(
		RegistryConfig::load(&path),
		Err(ContentError::Config(_))
	));
}
