//! Record types server example
//!
//! This example demonstrates:
//! - Declaring plain and polymorphic record types in YAML
//! - Auto-generated save, list and load routes per type
//! - A custom access-checked route served through a route controller
//!
//! Try it:
//!
//! ```text
//! curl -X POST localhost:3000/person -H 'content-type: application/json' \
//!      -d '{"name": "Ada", "email": "ada@example.com"}'
//! curl -X POST localhost:3000/content -H 'content-type: application/json' \
//!      -d '{"type": "article", "title": "Hello"}'
//! curl localhost:3000/person
//! ```

use this_schema::prelude::*;
use tracing_subscriber::EnvFilter;

const TYPES: &str = r#"
types:
  person:
    fields:
      name: { title: Name, type: text, required: true, max_length: 80 }
      email: { title: Email, type: email }
      age: { title: Age, type: number, min: 0, integer: true }
  content:
    polymorphic: true
    subtypes:
      article:
        fields:
          title: { title: Title, type: text, required: true }
          published: { title: Published, type: date }
      block:
        standalone: false
        fields:
          body: { title: Body, type: text, required: true }
"#;

/// Lets requests through when they carry the demo token
struct TokenCheck;

#[async_trait]
impl AccessCheck for TokenCheck {
    async fn allow(&self, request: &RouteRequest) -> bool {
        request
            .headers
            .get("x-token")
            .is_some_and(|token| token == "demo")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let types = TypesConfig::from_yaml_str(TYPES)?;

    println!("🚀 This-Schema Types Server");
    println!("📦 Types: {:?}", types.types.keys().collect::<Vec<_>>());

    let about = RouteSettings::new("/about")
        .access(Access::check(TokenCheck))
        .content(json!({ "name": "types_server", "version": env!("CARGO_PKG_VERSION") }));

    println!("\n🌐 Server running on http://127.0.0.1:3000");
    println!("  POST   /person            - Validate and save a person");
    println!("  GET    /person            - List people");
    println!("  GET    /person/{{id}}       - Get a person");
    println!("  POST   /content           - Validate and save an article or block");
    println!("  GET    /about             - Requires header x-token: demo");

    ServerBuilder::new()
        .with_store(InMemoryRecordStore::new())
        .with_types_config(types)
        .with_route(about)
        .serve("127.0.0.1:3000")
        .await
}
