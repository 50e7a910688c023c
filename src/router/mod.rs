//! The router: route table, lookup and URL generation.
//!
//! The implementation is split across submodules:
//!
//! - [`insert`] - `add` and the LCP-splitting trie insertion
//! - [`lookup`] - `find` and the backtracking search
//! - [`delete`] - `del` and bottom-up pruning
//! - [`url`] - reverse routing from a route name
//!
//! Route data lives in an arena trie (see [`crate::tree`]); the router adds
//! the name registry, the fallback handlers and the parameter bookkeeping.

mod delete;
mod insert;
mod lookup;
mod params;
mod pattern;
mod pool;
mod url;

pub use params::Params;
pub use pattern::RoutePattern;

use {
    crate::{Config, Error, Result, tree::Tree},
    pool::BufferPool,
    std::{collections::HashMap, fmt},
};

/// Registry record for one pristine pattern.
#[derive(Debug, Clone)]
struct Registered {
    /// Route name, empty for anonymous routes.
    name: String,
    /// Pattern with parameter names stripped; identifies the trie node.
    trie_path: String,
}

/// HTTP request router over a compressed radix trie.
///
/// Routes map a (method, path pattern) pair to a handler value of any type
/// `H`. Patterns are made of static text, `:name` parameters matching one
/// path segment and an optional trailing `*name` (or bare `*`) wildcard
/// matching the rest of the path.
///
/// Lookups never fail: a path that matches nothing resolves to the
/// `not_found` handler, a path that matches a route registered for other
/// methods resolves to `not_allowed`.
///
/// ```
/// use radix_router::{Params, Router};
///
/// let mut router = Router::new("404", "405");
/// router.add("static", "GET", "/static", "h1").unwrap();
/// router.add("param", "POST", "/test/:name", "h2").unwrap();
/// router.add("any", "GET", "/static1/*", "h3").unwrap();
///
/// let mut params = Params::new();
/// assert_eq!(router.find("POST", "/test/Aaron", &mut params), (&"h2", 1));
/// assert_eq!(params.get("name"), Some("Aaron"));
///
/// assert_eq!(router.find("GET", "/static1/path/to/file", &mut params), (&"h3", 1));
/// assert_eq!(params.get("*"), Some("path/to/file"));
///
/// assert_eq!(router.find("DELETE", "/static", &mut params).0, &"405");
/// assert_eq!(router.url("param", &[&"Aaron"]), "/test/Aaron");
/// ```
///
/// The router is not internally synchronized: mutation takes `&mut self`.
/// Use [`SharedRouter`](crate::SharedRouter) to share one between threads.
pub struct Router<H> {
    tree: Tree<H>,
    /// Route name to pristine pattern.
    names: HashMap<String, String>,
    /// Pristine pattern to its registry record.
    paths: HashMap<String, Registered>,
    not_found: H,
    not_allowed: H,
    max_param_count: usize,
    pool: BufferPool,
}

impl<H> Router<H> {
    /// Creates an empty router with its two fallback handlers.
    pub fn new(not_found: H, not_allowed: H) -> Self {
        Self {
            tree: Tree::new(),
            names: HashMap::new(),
            paths: HashMap::new(),
            not_found,
            not_allowed,
            max_param_count: 0,
            pool: BufferPool::default(),
        }
    }

    /// Builds a router from the `[router]` and `[[routes]]` sections of
    /// `config`, resolving handler ids through `resolve`.
    ///
    /// Fails with [`ErrorKind::InvalidHandler`](crate::ErrorKind::InvalidHandler)
    /// when an id does not resolve, and with the usual registration errors
    /// when the route table is inconsistent.
    ///
    /// ```
    /// use radix_router::{Config, Params, RouteConfig, Router};
    ///
    /// let config = Config::default()
    ///     .with_route(RouteConfig::new("users.show", "GET", "/users/:id", "show_user"));
    ///
    /// let router = Router::from_config(&config, |id| Some(id.to_string())).unwrap();
    /// let mut params = Params::new();
    /// assert_eq!(router.find("GET", "/users/7", &mut params).0, "show_user");
    /// assert_eq!(router.find("GET", "/nope", &mut params).0, "not_found");
    /// ```
    pub fn from_config<F>(config: &Config, resolve: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<H>,
    {
        config.validate()?;

        let lookup = |id: &str| {
            resolve(id).ok_or_else(|| Error::invalid_handler(format!("unknown handler `{id}`")))
        };

        let mut router = Self::new(
            lookup(&config.router.not_found)?,
            lookup(&config.router.method_not_allowed)?,
        );
        for route in &config.routes {
            let handler = lookup(&route.handler)?;
            router.add(&route.name, &route.method, &route.path, handler)?;
        }

        tracing::info!(
            routes = config.routes.len(),
            nodes = router.tree.len(),
            "Router built from configuration"
        );
        Ok(router)
    }

    /// Largest parameter count of any route added so far. Sizing a
    /// [`Params`] with it avoids reallocation during lookups.
    pub fn max_param_count(&self) -> usize {
        self.max_param_count
    }

    /// Pattern registered under `name`.
    pub fn route_path(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn not_found(&self) -> &H {
        &self.not_found
    }

    pub fn not_allowed(&self) -> &H {
        &self.not_allowed
    }

    /// True when no route is registered.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Calls `visit(name, method, pattern)` once per registered method of
    /// every route, depth-first. The any-method slot is reported as `""`.
    /// No ordering is guaranteed between sibling branches.
    pub fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &str, &str),
    {
        for id in self.tree.walk() {
            let node = self.tree.node(id);
            for method in node.handlers.methods() {
                visit(&node.name, method, &node.ppath);
            }
        }
    }

    /// Renders the trie, one node per line, indented by depth.
    pub fn print_tree(&self) -> String {
        self.tree.to_string()
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.paths.len())
            .field("nodes", &self.tree.len())
            .field("max_param_count", &self.max_param_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
