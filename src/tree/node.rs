use super::{MethodHandler, NodeId};

/// Node kinds, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Matches its prefix literally.
    Static,
    /// Matches one path segment, up to the next `/`.
    Param,
    /// Matches the remainder of the path, `/` included.
    Wildcard,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Static => write!(f, "static"),
            Kind::Param => write!(f, "param"),
            Kind::Wildcard => write!(f, "wildcard"),
        }
    }
}

/// Route data attached to the node a registration terminates on.
pub(crate) struct Route<'a, H> {
    pub(crate) method: &'a str,
    pub(crate) handler: H,
    pub(crate) name: &'a str,
    pub(crate) ppath: &'a str,
    pub(crate) pnames: &'a [String],
}

/// A trie node. Children and parent are arena indices owned by [`Tree`](super::Tree).
#[derive(Debug)]
pub(crate) struct Node<H> {
    pub(crate) kind: Kind,
    pub(crate) label: char,
    pub(crate) prefix: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Name of the route ending here, empty for anonymous or structural nodes.
    pub(crate) name: String,
    /// Pattern as registered, empty for structural nodes.
    pub(crate) ppath: String,
    pub(crate) pnames: Vec<String>,
    pub(crate) handlers: MethodHandler<H>,
}

impl<H> Node<H> {
    pub(crate) fn new(kind: Kind, prefix: &str, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            label: prefix.chars().next().unwrap_or_default(),
            prefix: prefix.to_string(),
            parent,
            children: Vec::new(),
            name: String::new(),
            ppath: String::new(),
            pnames: Vec::new(),
            handlers: MethodHandler::new(),
        }
    }

    /// True when a route terminates on this node.
    pub(crate) fn has_route(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Merges `route` into the node. The method handler is always added; the
    /// naming metadata is only filled while unset, so the first registration
    /// of a path keeps its name and parameter names.
    pub(crate) fn attach(&mut self, route: Route<'_, H>) {
        self.handlers.add_handler(route.method, route.handler);
        if self.ppath.is_empty() {
            self.ppath = route.ppath.to_string();
        }
        if self.pnames.is_empty() {
            self.pnames = route.pnames.to_vec();
        }
        if self.name.is_empty() {
            self.name = route.name.to_string();
        }
    }

    /// Drops the route terminating here, leaving a structural node.
    pub(crate) fn clear_route(&mut self) {
        self.handlers = MethodHandler::new();
        self.name.clear();
        self.ppath.clear();
        self.pnames.clear();
    }

    /// Resets the node to an empty structural static node.
    pub(crate) fn reset(&mut self) {
        self.clear_route();
        self.kind = Kind::Static;
        self.label = '\0';
        self.prefix.clear();
        self.parent = None;
        self.children.clear();
    }

    /// Replaces the prefix and keeps the label in sync.
    pub(crate) fn set_prefix(&mut self, prefix: String) {
        self.label = prefix.chars().next().unwrap_or_default();
        self.prefix = prefix;
    }
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self::new(Kind::Static, "", None)
    }
}
