/* demos/basic.rs */

use std::fs;
use std::sync::Arc;

use serde::Deserialize;
use shelf::{
	ContentRegistry, ContentSet, ContentSetKind, FileOptions, Resource, ResourceOptions,
	StaticCatalog,
};

// Defaults compiled into the binary
static QUERIES: StaticCatalog = StaticCatalog::new(
	"queries",
	&[
		Resource::new("Demo.Sql.orders.sql", b"select * from orders"),
		Resource::new("Demo.Sql.customers.sql", b"select * from customers"),
		Resource::new(
			"Demo.Data.servers.json",
			br#"[{ "name": "alpha", "port": 8080 }, { "name": "beta", "port": 9090 }]"#,
		),
	],
);

#[derive(Debug, Deserialize)]
struct Server {
	name: String,
	port: u16,
}

/// Typed accessor over the "Sql" set.
struct Queries(Arc<ContentSet>);

impl ContentSetKind for Queries {
	const NAME: &'static str = "Sql";

	fn from_set(set: Arc<ContentSet>) -> Self {
		Self(set)
	}
}

impl Queries {
	fn orders(&self) -> shelf::Result<String> {
		self.0.get_string("orders")
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. An override directory on disk
	let overrides = "demo_overrides";
	let _ = fs::remove_dir_all(overrides);
	fs::create_dir_all(overrides)?;
	fs::write(
		format!("{}/orders.sql", overrides),
		"select * from orders where archived = false",
	)?;
	println!("Created {}", overrides);

	// 1. Register content sets: files first, embedded defaults second
	let mut registry = ContentRegistry::new();
	registry
		.register_typed::<Queries>(|b| {
			b.files(overrides, FileOptions::new().extension("sql"))
				.resources(
					&QUERIES,
					ResourceOptions::new().namespace("Demo.Sql").extension("sql"),
				)
		})?
		.register_with("Data", |b| {
			b.resources(&QUERIES, ResourceOptions::new().namespace("Demo.Data").extension("json"))
		})?
		.register_with("Text", |b| b.memory([("Greeting", "Hello from shelf")]))?;
	let registry = Arc::new(registry);

	// 2. Plain lookups
	println!("{}", registry.get_string("Text", "greeting")?);

	// 3. Typed access: the file on disk wins over the embedded default
	let queries = registry.get_typed::<Queries>()?;
	println!("orders: {}", queries.orders()?);
	println!("customers: {}", queries.0.get_string_async("Customers").await?);

	// 4. JSON content
	let data = registry.get("Data")?;
	let servers: Vec<Server> = data.get_json_async("servers").await?;
	for server in &servers {
		println!("server {} on port {}", server.name, server.port);
	}

	// 5. Misses are errors that can be told apart
	match registry.get_string("Text", "farewell") {
		Err(e) if e.is_not_found() => println!("Not found: {}", e),
		other => println!("Unexpected: {:?}", other),
	}

	// Cleanup
	fs::remove_dir_all(overrides)?;

	Ok(())
}
