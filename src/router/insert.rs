//! Route registration.

use {
    super::{Registered, RoutePattern, Router},
    crate::{
        Error, Result,
        tree::{Kind, Node, NodeId, Route, Tree},
        utils::longest_common_prefix,
    },
};

impl<H> Router<H> {
    /// Registers `handler` for `method` on the path pattern `path` and
    /// returns the pattern's parameter count.
    ///
    /// An empty `method` registers the handler for any method not registered
    /// explicitly. An empty `name` registers an anonymous route, which cannot
    /// be used for URL generation. Registering the same pattern again adds or
    /// replaces a method handler without creating nodes.
    ///
    /// Fails with [`ErrorKind::RouteConflict`](crate::ErrorKind::RouteConflict)
    /// when `name` is bound to another pattern or the pattern to another
    /// name, and with [`ErrorKind::InvalidPattern`](crate::ErrorKind::InvalidPattern)
    /// when text follows a wildcard. The router is unchanged on error.
    pub fn add(&mut self, name: &str, method: &str, path: &str, handler: H) -> Result<usize> {
        let pattern = RoutePattern::parse(path)?;
        self.check_conflict(name, &pattern)?;

        for (kind, prefix) in pattern.scaffolds() {
            self.insert(kind, prefix, None);
        }
        self.insert(
            pattern.terminal_kind(),
            pattern.trie_path(),
            Some(Route {
                method,
                handler,
                name,
                ppath: pattern.as_str(),
                pnames: pattern.param_names(),
            }),
        );
        self.register(name, &pattern);

        let count = pattern.param_names().len();
        self.max_param_count = self.max_param_count.max(count);
        tracing::debug!(
            name,
            method,
            path = pattern.as_str(),
            params = count,
            "Route registered"
        );
        Ok(count)
    }

    fn check_conflict(&self, name: &str, pattern: &RoutePattern) -> Result<()> {
        let path = pattern.as_str();
        if !name.is_empty()
            && let Some(existing) = self.names.get(name).filter(|p| *p != path)
        {
            return Err(Error::route_conflict(format!(
                "route name `{name}` is already bound to `{existing}`, cannot bind it to `{path}`"
            )));
        }
        if let Some(entry) = self.paths.get(path)
            && !name.is_empty()
            && !entry.name.is_empty()
            && entry.name != name
        {
            return Err(Error::route_conflict(format!(
                "path `{path}` is already registered as `{}`, cannot register it as `{name}`",
                entry.name
            )));
        }
        Ok(())
    }

    fn register(&mut self, name: &str, pattern: &RoutePattern) {
        let entry = self
            .paths
            .entry(pattern.as_str().to_string())
            .or_insert_with(|| Registered {
                name: String::new(),
                trie_path: pattern.trie_path().to_string(),
            });
        if entry.name.is_empty() && !name.is_empty() {
            entry.name = name.to_string();
            self.names
                .insert(name.to_string(), pattern.as_str().to_string());
        }
    }

    /// Inserts one segment of a decomposed pattern. `path` is the trie path
    /// up to and including the segment; `route` is `None` for scaffolds.
    fn insert(&mut self, kind: Kind, path: &str, route: Option<Route<'_, H>>) {
        let mut cn = Tree::<H>::ROOT;
        let mut search = path;

        loop {
            let prefix = &self.tree.node(cn).prefix;
            let prefix_len = prefix.len();
            let l = longest_common_prefix(search, prefix);

            if l == 0 {
                // Only the root of an empty tree shares nothing with a path.
                let root = self.tree.node_mut(cn);
                root.kind = kind;
                root.set_prefix(search.to_string());
                if let Some(route) = route {
                    root.attach(route);
                }
                return;
            }

            if l < prefix_len {
                self.tree.split(cn, l);
                if l == search.len() {
                    if let Some(route) = route {
                        self.tree.node_mut(cn).attach(route);
                    }
                } else {
                    self.add_leaf(cn, kind, &search[l..], route);
                }
                return;
            }

            if l < search.len() {
                search = &search[l..];
                let label = search.chars().next().unwrap_or_default();
                match self.tree.find_child_with_label(cn, label) {
                    Some(child) => {
                        cn = child;
                        continue;
                    }
                    None => {
                        self.add_leaf(cn, kind, search, route);
                        return;
                    }
                }
            }

            if let Some(route) = route {
                self.tree.node_mut(cn).attach(route);
            }
            return;
        }
    }

    fn add_leaf(&mut self, parent: NodeId, kind: Kind, prefix: &str, route: Option<Route<'_, H>>) {
        let mut node = Node::new(kind, prefix, None);
        if let Some(route) = route {
            node.attach(route);
        }
        let id = self.tree.alloc(node);
        self.tree.add_child(parent, id);
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, Router};

    fn router() -> Router<&'static str> {
        Router::new("404", "405")
    }

    #[test]
    fn test_add_returns_param_count() {
        let mut router = router();
        assert_eq!(router.add("", "GET", "/", "root").unwrap(), 0);
        assert_eq!(router.add("", "GET", "/users/:id", "user").unwrap(), 1);
        assert_eq!(router.add("", "GET", "/a/:x/b/:y/*rest", "deep").unwrap(), 3);
        assert_eq!(router.max_param_count(), 3);
        assert_eq!(router.add("", "GET", "/b/:x", "shallow").unwrap(), 1);
        assert_eq!(router.max_param_count(), 3);
    }

    #[test]
    fn test_split_on_divergence() {
        let mut router = router();
        router.add("", "GET", "/users", "users").unwrap();
        router.add("", "GET", "/uploads", "uploads").unwrap();

        assert_eq!(
            router.print_tree(),
            "/u (static)\n  sers (static) /users [GET]\n  ploads (static) /uploads [GET]\n"
        );
    }

    #[test]
    fn test_split_at_end_of_search() {
        let mut router = router();
        router.add("", "GET", "/users/all", "all").unwrap();
        router.add("", "GET", "/users", "users").unwrap();

        assert_eq!(
            router.print_tree(),
            "/users (static) /users [GET]\n  /all (static) /users/all [GET]\n"
        );
    }

    #[test]
    fn test_scaffolds_precede_placeholders() {
        let mut router = router();
        router.add("", "GET", "/users/:id/files/*path", "file").unwrap();

        assert_eq!(
            router.print_tree(),
            "/users/ (static)\n  : (param)\n    /files/ (static)\n      * (wildcard) /users/:id/files/*path [GET]\n"
        );
    }

    #[test]
    fn test_same_path_adds_methods() {
        let mut router = router();
        router.add("show", "GET", "/users/:id", "show").unwrap();
        let nodes = router.tree.len();
        router.add("show", "PUT", "/users/:id", "update").unwrap();
        router.add("", "", "/users/:id", "any").unwrap();

        assert_eq!(router.tree.len(), nodes);
        assert_eq!(
            router.print_tree(),
            "/users/ (static)\n  : (param) /users/:id [GET, PUT, *]\n"
        );
    }

    #[test]
    fn test_name_bound_to_other_path_conflicts() {
        let mut router = router();
        router.add("users", "GET", "/users", "list").unwrap();
        let before = router.print_tree();

        let err = router.add("users", "GET", "/accounts", "list").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RouteConflict);
        assert_eq!(router.print_tree(), before);
        assert_eq!(router.route_path("users"), Some("/users"));
    }

    #[test]
    fn test_path_bound_to_other_name_conflicts() {
        let mut router = router();
        router.add("users", "GET", "/users", "list").unwrap();

        let err = router.add("people", "POST", "/users", "create").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RouteConflict);
        assert_eq!(router.route_path("people"), None);
    }

    #[test]
    fn test_same_name_and_path_is_not_a_conflict() {
        let mut router = router();
        router.add("users", "GET", "/users", "list").unwrap();
        router.add("users", "POST", "users", "create").unwrap();
        router.add("", "DELETE", "/users", "purge").unwrap();
        assert_eq!(router.route_path("users"), Some("/users"));
    }

    #[test]
    fn test_anonymous_path_can_be_named_later() {
        let mut router = router();
        router.add("", "GET", "/users", "list").unwrap();
        router.add("users", "POST", "/users", "create").unwrap();
        assert_eq!(router.route_path("users"), Some("/users"));

        let mut names = Vec::new();
        router.each(|name, _, _| names.push(name.to_string()));
        assert_eq!(names, vec!["users", "users"]);
    }

    #[test]
    fn test_text_after_wildcard_is_rejected() {
        let mut router = router();
        let err = router.add("", "GET", "/files/*path/raw", "file").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPattern);
        assert!(router.is_empty());
    }

    #[test]
    fn test_multibyte_labels_do_not_collide() {
        let mut router = router();
        router.add("", "GET", "/é", "e-acute").unwrap();
        router.add("", "GET", "/è", "e-grave").unwrap();

        let mut params = crate::Params::new();
        assert_eq!(router.find("GET", "/é", &mut params).0, &"e-acute");
        assert_eq!(router.find("GET", "/è", &mut params).0, &"e-grave");
    }
}
