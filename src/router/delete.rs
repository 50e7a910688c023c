//! Route removal and trie pruning.

use {
    super::{Router, RoutePattern, params::Discard},
    crate::{
        Result,
        tree::{Kind, NodeId, Tree},
    },
};

impl<H> Router<H> {
    /// Removes a route.
    ///
    /// The route is `path` when given, otherwise the pattern registered under
    /// `name`. A non-empty `method` removes only that method's handler and
    /// keeps the route while other methods remain; an empty `method` removes
    /// the route with all its methods. Nodes left without a purpose are
    /// pruned and static chains merged back, so the trie ends up as if the
    /// route had never been added.
    ///
    /// Removing a route that does not exist is a no-op. Fails only when
    /// `path` is not a valid pattern.
    ///
    /// ```
    /// use radix_router::{Params, Router};
    ///
    /// let mut router = Router::new("404", "405");
    /// router.add("user", "GET", "/users/:id", "show").unwrap();
    /// router.add("user", "DELETE", "/users/:id", "destroy").unwrap();
    ///
    /// router.del("user", "DELETE", "").unwrap();
    /// let mut params = Params::new();
    /// assert_eq!(router.find("DELETE", "/users/1", &mut params).0, &"405");
    ///
    /// router.del("user", "", "").unwrap();
    /// let mut params = Params::new();
    /// assert_eq!(router.find("GET", "/users/1", &mut params).0, &"404");
    /// assert!(router.is_empty());
    /// ```
    pub fn del(&mut self, name: &str, method: &str, path: &str) -> Result<()> {
        let target = if path.is_empty() {
            match self.names.get(name) {
                Some(pattern) => pattern.clone(),
                None => {
                    tracing::debug!(name, "No route registered under this name");
                    return Ok(());
                }
            }
        } else {
            path.to_string()
        };
        let pattern = RoutePattern::parse(&target)?;

        let Some(id) = self.locate(&pattern) else {
            tracing::debug!(path = pattern.as_str(), "No route to remove");
            return Ok(());
        };

        if !method.is_empty() {
            let node = self.tree.node_mut(id);
            if node.handlers.del_handler(method).is_none() {
                tracing::debug!(
                    path = pattern.as_str(),
                    method,
                    "Method not registered on route"
                );
                return Ok(());
            }
            if node.has_route() {
                tracing::debug!(path = pattern.as_str(), method, "Route method removed");
                return Ok(());
            }
        }

        let trie_path = self.trie_path_of(id);
        self.tree.node_mut(id).clear_route();
        self.forget(&trie_path);
        self.prune(id);

        tracing::debug!(path = pattern.as_str(), method, "Route removed");
        Ok(())
    }

    /// Node carrying the route of `pattern`. Tries the exact trie path first,
    /// then resolves the pattern as a concrete request path.
    fn locate(&self, pattern: &RoutePattern) -> Option<NodeId> {
        if let Some(id) = self.walk_exact(pattern.trie_path())
            && self.tree.node(id).has_route()
        {
            return Some(id);
        }

        let id = self.resolve(pattern.as_str(), &mut Discard::default())?;
        if self.tree.node(id).has_route() {
            return Some(id);
        }
        self.tree
            .find_child_by_kind(id, Kind::Wildcard)
            .filter(|&w| self.tree.node(w).has_route())
    }

    fn walk_exact(&self, trie_path: &str) -> Option<NodeId> {
        let mut cn = Tree::<H>::ROOT;
        let mut search = trie_path;
        loop {
            search = search.strip_prefix(self.tree.node(cn).prefix.as_str())?;
            match search.chars().next() {
                Some(label) => cn = self.tree.find_child_with_label(cn, label)?,
                None => return Some(cn),
            }
        }
    }

    /// Concatenated prefixes from the root down to `id`.
    fn trie_path_of(&self, id: NodeId) -> String {
        let mut chain = vec![id];
        let mut cn = id;
        while let Some(parent) = self.tree.node(cn).parent {
            chain.push(parent);
            cn = parent;
        }
        chain
            .iter()
            .rev()
            .map(|&n| self.tree.node(n).prefix.as_str())
            .collect()
    }

    /// Drops the registry entries of every pattern stored under `trie_path`.
    fn forget(&mut self, trie_path: &str) {
        let names = &mut self.names;
        self.paths.retain(|_, entry| {
            if entry.trie_path != trie_path {
                return true;
            }
            if !entry.name.is_empty() {
                names.remove(&entry.name);
            }
            false
        });
    }

    /// Removes route-less leaves from `id` upwards and merges a structural
    /// static node left with a single static child.
    fn prune(&mut self, mut id: NodeId) {
        loop {
            let node = self.tree.node(id);
            if node.has_route() {
                return;
            }
            match (node.children.len(), node.parent) {
                (0, None) => {
                    self.tree.node_mut(id).reset();
                    return;
                }
                (0, Some(parent)) => {
                    self.tree.remove_child(parent, id);
                    self.tree.release(id);
                    id = parent;
                }
                (1, _) => {
                    self.tree.merge_single_child(id);
                    return;
                }
                _ => return,
            }
        }
    }
}
