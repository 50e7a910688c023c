use {
    crate::{Error, Result},
    serde::Deserialize,
};

///
/// Configuration for the router's fallback handlers.
///
/// Handlers are referenced by id; the ids are resolved to handler values by
/// the resolver passed to [`Router::from_config`](crate::Router::from_config).
///
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Handler id answering lookups that match no route.
    /// The default `not_found` is "not_found".
    #[serde(default = "RouterConfig::default_not_found")]
    pub not_found: String,

    /// Handler id answering lookups whose path matches a route registered
    /// for other methods only.
    /// The default `method_not_allowed` is "method_not_allowed".
    #[serde(default = "RouterConfig::default_method_not_allowed")]
    pub method_not_allowed: String,
}

impl RouterConfig {
    fn default_not_found() -> String {
        "not_found".into()
    }

    fn default_method_not_allowed() -> String {
        "method_not_allowed".into()
    }

    pub fn validate(&self) -> Result<()> {
        if self.not_found.trim().is_empty() {
            return Err(Error::config("[router] not_found must name a handler"));
        }
        if self.method_not_allowed.trim().is_empty() {
            return Err(Error::config(
                "[router] method_not_allowed must name a handler",
            ));
        }
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            not_found: Self::default_not_found(),
            method_not_allowed: Self::default_method_not_allowed(),
        }
    }
}

///
/// A single entry of the declarative route table.
///
/// ```toml
/// [[routes]]
/// name = "users.show"
/// method = "GET"
/// path = "/users/:id"
/// handler = "show_user"
/// ```
///
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route name used for URL generation. Optional.
    #[serde(default)]
    pub name: String,

    /// HTTP method. Empty (the default) registers the route for any method.
    #[serde(default)]
    pub method: String,

    /// Path pattern, e.g. `/users/:id` or `/files/*path`.
    pub path: String,

    /// Handler id resolved at build time.
    pub handler: String,
}

impl RouteConfig {
    /// Creates a route entry.
    pub fn new(
        name: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        RouteConfig {
            name: name.into(),
            method: method.into(),
            path: path.into(),
            handler: handler.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.handler.trim().is_empty() {
            return Err(Error::config(format!(
                "route `{}` has no handler",
                self.path
            )));
        }
        if !self.method.is_empty() && http::Method::from_bytes(self.method.as_bytes()).is_err() {
            return Err(Error::config(format!(
                "route `{}` has an invalid method `{}`",
                self.path, self.method
            )));
        }
        Ok(())
    }
}
