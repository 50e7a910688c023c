//! # radix-router
//!
//! An embeddable HTTP request router built on a compressed radix trie.
//!
//! Routes map a method and a path pattern to a handler value of any type.
//! Lookups resolve a request path to a handler and extract its named
//! parameters without allocating; routes can be removed again and regenerated
//! as URLs from their name.
//!
//! # Quick Start
//!
//! ```rust
//! use radix_router::{Params, Result, Router};
//!
//! fn main() -> Result<()> {
//!     let mut router = Router::new("not found", "method not allowed");
//!     router.add("home", "GET", "/", "index")?;
//!     router.add("user", "GET", "/users/:id", "show_user")?;
//!     router.add("assets", "", "/assets/*path", "assets")?;
//!
//!     let mut params = Params::with_capacity(router.max_param_count());
//!     let (handler, count) = router.find("GET", "/users/42", &mut params);
//!     assert_eq!((*handler, count), ("show_user", 1));
//!     assert_eq!(params.get("id"), Some("42"));
//!
//!     assert_eq!(router.url("user", &[&42]), "/users/42");
//!     Ok(())
//! }
//! ```
//!
//! # Path Patterns
//!
//! | Syntax | Matches | Example |
//! |--------|---------|---------|
//! | `text` | the literal text | `/users` |
//! | `:name` | one segment, up to the next `/` | `/users/:id` |
//! | `*name` or `*` | the rest of the path, `/` included | `/assets/*path` |
//!
//! At every branch static text wins over a parameter, which wins over a
//! wildcard. When the preferred branch dead-ends further down, the lookup
//! backtracks and tries the alternatives.
//!
//! # Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Configuration loading and validation ([`Config`]) |
//! | [`router`] | Registration, lookup, removal and URL generation ([`Router`]) |
//! | [`shared`] | Thread-safe handle ([`SharedRouter`]) |
//! | [`error`] | Error types and handling ([`Error`]) |
//! | [`utils`] | Path and configuration helpers |
//!
//! # Configuration
//!
//! A route table can be declared in TOML, with `{{ VAR }}` placeholders
//! replaced from the environment, and turned into a router by resolving
//! handler ids:
//!
//! ```rust
//! use radix_router::{Config, Params, Router};
//!
//! let config: Config = r#"
//!     [router]
//!     not_found = "missing"
//!
//!     [logging]
//!     format = "compact"
//!
//!     [[routes]]
//!     name = "users.show"
//!     method = "GET"
//!     path = "/users/:id"
//!     handler = "show_user"
//! "#.parse().unwrap();
//!
//! config.setup_tracing();
//! let router = Router::from_config(&config, |id| Some(id.to_string())).unwrap();
//!
//! let mut params = Params::new();
//! assert_eq!(router.find("GET", "/users/1", &mut params).0, "show_user");
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type. Lookups never fail; errors come
//! from registration and configuration, each with a stable code:
//!
//! ```rust
//! use radix_router::{ErrorKind, Router};
//!
//! let mut router = Router::new((), ());
//! let err = router.add("", "GET", "/files/*path/raw", ()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidPattern);
//! assert_eq!(err.error_code(), "INVALID_PATTERN");
//! ```
mod config;
mod error;
mod router;
mod shared;
mod tree;
mod utils;

pub use config::*;
pub use error::*;
pub use router::*;
pub use shared::*;
pub use tree::Kind;
pub use utils::*;

pub type Result<T> = std::result::Result<T, Error>;
