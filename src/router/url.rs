//! Reverse routing.

use {
    super::{RoutePattern, Router},
    std::fmt::{self, Display, Write},
};

impl<H> Router<H> {
    /// Builds the URL of the route registered under `name`, substituting
    /// `params` positionally for its `:name` and `*name` placeholders.
    ///
    /// Returns an empty string when `name` is unknown. Missing parameters
    /// leave their placeholder in place; extra parameters are ignored.
    ///
    /// ```
    /// use radix_router::Router;
    ///
    /// let mut router = Router::new((), ());
    /// router.add("post", "GET", "/a/:x/b/:y", ()).unwrap();
    ///
    /// assert_eq!(router.url("post", &[&"users", &42]), "/a/users/b/42");
    /// assert_eq!(router.url("post", &[&1.5]), "/a/1.5/b/:y");
    /// assert_eq!(router.url("unknown", &[]), "");
    /// ```
    pub fn url(&self, name: &str, params: &[&dyn Display]) -> String {
        let Some(pattern) = self.names.get(name) else {
            tracing::warn!(name, "URL requested for an unknown route name");
            return String::new();
        };

        let mut buffer = self.pool.acquire();
        let url = match expand(pattern, params, &mut buffer) {
            Ok(()) => buffer.as_str().to_owned(),
            Err(_) => {
                tracing::warn!(name, "URL parameter failed to format");
                String::new()
            }
        };
        self.pool.release(buffer);
        url
    }
}

fn expand(pattern: &str, params: &[&dyn Display], out: &mut String) -> fmt::Result {
    let mut values = params.iter();
    let mut last = 0;
    for placeholder in RoutePattern::placeholders(pattern) {
        out.push_str(&pattern[last..placeholder.start]);
        match values.next() {
            Some(value) => write!(out, "{value}")?,
            None => out.push_str(&pattern[placeholder.clone()]),
        }
        last = placeholder.end;
    }
    out.push_str(&pattern[last..]);
    Ok(())
}
