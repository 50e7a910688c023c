//! Route lookup.
//!
//! The search walks the trie trying static, then param, then wildcard
//! children at every node. Whenever it descends while a lower-priority
//! alternative remains at the current node, it pushes a [`Memo`]; a dead end
//! pops the most recent memo and resumes from its alternative, dropping the
//! captures made since. Every alternative is eventually tried, so nested
//! ambiguous branches resolve the same way as single ones.

use {
    super::{
        Router,
        params::{Captures, Params},
    },
    crate::tree::{Kind, NodeId, Tree},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Match the current node's prefix, or accept it when the path is used up.
    Consume,
    Static,
    Param,
    Wildcard,
    Backtrack,
}

/// A branch point to resume from.
#[derive(Debug, Clone, Copy)]
struct Memo<'p> {
    node: NodeId,
    next: Kind,
    search: &'p str,
    captured: usize,
}

impl<H> Router<H> {
    /// Resolves `method` and `path` to a handler and fills `params` with the
    /// captured values, returning the handler and the number of parameters.
    ///
    /// Never fails: a path matching no route yields the not-found handler, a
    /// path matching a route without a handler for `method` (nor an
    /// any-method handler) yields the method-not-allowed handler. `params`
    /// is empty in both cases. An empty path is looked up as `/`.
    pub fn find<'r, 'p>(
        &'r self,
        method: &str,
        path: &'p str,
        params: &mut Params<'r, 'p>,
    ) -> (&'r H, usize) {
        params.clear();
        let path = if path.is_empty() { "/" } else { path };

        let Some(id) = self.resolve(path, &mut *params) else {
            return (&self.not_found, 0);
        };

        let node = self.tree.node(id);
        if let Some(handler) = node.handlers.find(method) {
            params.set_names(&node.pnames);
            return (handler, params.len());
        }

        // A directory-style path ending right before a wildcard child.
        let wildcard = self
            .tree
            .find_child_by_kind(id, Kind::Wildcard)
            .map(|w| self.tree.node(w));
        if let Some(wildcard) = wildcard
            && let Some(handler) = wildcard.handlers.find(method)
        {
            params.push("");
            params.set_names(&wildcard.pnames);
            return (handler, params.len());
        }

        params.clear();
        if node.has_route() || wildcard.is_some_and(|w| w.has_route()) {
            (&self.not_allowed, 0)
        } else {
            (&self.not_found, 0)
        }
    }

    /// [`find`](Self::find) using the method and URI path of `request`.
    ///
    /// ```
    /// use radix_router::{Params, Router};
    ///
    /// let mut router = Router::new("404", "405");
    /// router.add("", "GET", "/users/:id", "user").unwrap();
    ///
    /// let request = http::Request::get("/users/42?full=1").body(()).unwrap();
    /// let mut params = Params::new();
    /// assert_eq!(router.find_request(&request, &mut params), (&"user", 1));
    /// assert_eq!(params.get("id"), Some("42"));
    /// ```
    pub fn find_request<'r, 'p, B>(
        &'r self,
        request: &'p http::Request<B>,
        params: &mut Params<'r, 'p>,
    ) -> (&'r H, usize) {
        self.find(request.method().as_str(), request.uri().path(), params)
    }

    /// Finds the node `path` terminates on, recording captured values into
    /// `captures`. The node either carries a route or has a wildcard child.
    /// Nothing stays captured when no node matches.
    pub(crate) fn resolve<'p, C>(&self, path: &'p str, captures: &mut C) -> Option<NodeId>
    where
        C: Captures<'p>,
    {
        if self.tree.is_empty() {
            return None;
        }

        let mut cn = Tree::<H>::ROOT;
        let mut search = path;
        let mut memos: Vec<Memo<'p>> = Vec::new();
        let mut step = Step::Consume;

        loop {
            step = match step {
                Step::Consume => {
                    let node = self.tree.node(cn);
                    // Param and wildcard nodes are consumed on entry.
                    let rest = if node.kind == Kind::Static {
                        search.strip_prefix(node.prefix.as_str())
                    } else {
                        Some(search)
                    };
                    match rest {
                        None => Step::Backtrack,
                        Some(rest) if !rest.is_empty() => {
                            search = rest;
                            Step::Static
                        }
                        Some(_)
                            if node.has_route()
                                || self.tree.find_child_by_kind(cn, Kind::Wildcard).is_some() =>
                        {
                            return Some(cn);
                        }
                        Some(_) => Step::Backtrack,
                    }
                }

                Step::Static => {
                    let label = search.chars().next().unwrap_or_default();
                    match self.tree.find_child(cn, label, Kind::Static) {
                        Some(child) => {
                            if self.has_alternative(cn, Kind::Param) {
                                memos.push(Memo {
                                    node: cn,
                                    next: Kind::Param,
                                    search,
                                    captured: captures.captured(),
                                });
                            }
                            cn = child;
                            Step::Consume
                        }
                        None => Step::Param,
                    }
                }

                Step::Param => match self.tree.find_child_by_kind(cn, Kind::Param) {
                    Some(child) => {
                        let end = search.find('/').unwrap_or(search.len());
                        if end == 0 {
                            Step::Wildcard
                        } else {
                            if self.has_alternative(cn, Kind::Wildcard) {
                                memos.push(Memo {
                                    node: cn,
                                    next: Kind::Wildcard,
                                    search,
                                    captured: captures.captured(),
                                });
                            }
                            captures.capture(&search[..end]);
                            search = &search[end..];
                            cn = child;
                            Step::Consume
                        }
                    }
                    None => Step::Wildcard,
                },

                Step::Wildcard => match self.tree.find_child_by_kind(cn, Kind::Wildcard) {
                    Some(child) => {
                        captures.capture(search);
                        return Some(child);
                    }
                    None => Step::Backtrack,
                },

                Step::Backtrack => {
                    let Some(memo) = memos.pop() else {
                        captures.rewind(0);
                        return None;
                    };
                    captures.rewind(memo.captured);
                    cn = memo.node;
                    search = memo.search;
                    match memo.next {
                        Kind::Param => Step::Param,
                        _ => Step::Wildcard,
                    }
                }
            };
        }
    }

    /// True when `id` has a child of kind `from` or of a lower priority.
    fn has_alternative(&self, id: NodeId, from: Kind) -> bool {
        self.tree.node(id).children.iter().any(|&c| self.tree.node(c).kind >= from)
    }
}
