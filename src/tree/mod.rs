//! Arena-backed radix trie.
//!
//! Nodes live in a vector and refer to each other by index: a node owns the
//! indices in its `children` list, while `parent` is a plain back-reference
//! used for pruning. Released slots go to a free list and are reused by later
//! insertions, so indices are only stable while a node is alive.

mod method;
mod node;

use std::{fmt, mem};

pub(crate) use method::MethodHandler;
pub use node::Kind;
pub(crate) use node::{Node, Route};

pub(crate) type NodeId = usize;

pub(crate) struct Tree<H> {
    nodes: Vec<Node<H>>,
    free: Vec<NodeId>,
}

impl<H> Tree<H> {
    pub(crate) const ROOT: NodeId = 0;

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            free: Vec::new(),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<H> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<H> {
        &mut self.nodes[id]
    }

    /// Number of live nodes, root included.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// True when no route has been added (or all were removed).
    pub(crate) fn is_empty(&self) -> bool {
        let root = self.node(Self::ROOT);
        root.prefix.is_empty() && root.children.is_empty()
    }

    pub(crate) fn alloc(&mut self, node: Node<H>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Returns the slot of a node that is no longer referenced to the free list.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, Self::ROOT, "the root is never released");
        self.nodes[id] = Node::default();
        self.free.push(id);
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    pub(crate) fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].children.retain(|&c| c != child);
    }

    /// Child of `id` with the given label and kind.
    pub(crate) fn find_child(&self, id: NodeId, label: char, kind: Kind) -> Option<NodeId> {
        self.nodes[id].children.iter().copied().find(|&c| {
            let child = &self.nodes[c];
            child.label == label && child.kind == kind
        })
    }

    /// Child of `id` with the given label, whatever its kind. Labels `:` and
    /// `*` only ever belong to param and wildcard nodes.
    pub(crate) fn find_child_with_label(&self, id: NodeId, label: char) -> Option<NodeId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].label == label)
    }

    pub(crate) fn find_child_by_kind(&self, id: NodeId, kind: Kind) -> Option<NodeId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].kind == kind)
    }

    /// Splits `id` at byte offset `at`. The node keeps `prefix[..at]` and
    /// becomes a structural static node; a new child takes the remainder
    /// along with the kind, route data and children. Returns the new child.
    pub(crate) fn split(&mut self, id: NodeId, at: usize) -> NodeId {
        let node = &mut self.nodes[id];
        let mut child = Node::new(node.kind, &node.prefix[at..], Some(id));
        node.prefix.truncate(at);
        node.kind = Kind::Static;
        child.children = mem::take(&mut node.children);
        child.handlers = mem::take(&mut node.handlers);
        child.name = mem::take(&mut node.name);
        child.ppath = mem::take(&mut node.ppath);
        child.pnames = mem::take(&mut node.pnames);

        let child_id = self.alloc(child);
        for i in 0..self.nodes[child_id].children.len() {
            let grandchild = self.nodes[child_id].children[i];
            self.nodes[grandchild].parent = Some(child_id);
        }
        self.add_child(id, child_id);
        child_id
    }

    /// Splices the single static child of a structural static node into it.
    /// Returns false when the node does not qualify.
    pub(crate) fn merge_single_child(&mut self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        if node.kind != Kind::Static || node.has_route() || node.children.len() != 1 {
            return false;
        }
        let child_id = node.children[0];
        if self.nodes[child_id].kind != Kind::Static {
            return false;
        }

        let child = mem::take(&mut self.nodes[child_id]);
        for &grandchild in &child.children {
            self.nodes[grandchild].parent = Some(id);
        }

        let node = &mut self.nodes[id];
        node.prefix.push_str(&child.prefix);
        node.children = child.children;
        node.handlers = child.handlers;
        node.name = child.name;
        node.ppath = child.ppath;
        node.pnames = child.pnames;

        self.free.push(child_id);
        true
    }

    /// Depth-first iterator over live node ids, parents before children.
    pub(crate) fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![Self::ROOT];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.nodes[id].children.iter().rev().copied());
            Some(id)
        })
    }
}

/// One line per node, indented by depth: prefix, kind and, on route
/// nodes, the registered pattern with its methods (`*` for any).
impl<H> fmt::Display for Tree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut stack = vec![(Self::ROOT, 0)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            write!(f, "{:indent$}{} ({})", "", node.prefix, node.kind, indent = depth * 2)?;
            if node.has_route() {
                write!(f, " {} [", node.ppath)?;
                for (i, method) in node.handlers.methods().enumerate() {
                    let method = if method.is_empty() { "*" } else { method };
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(method)?;
                }
                f.write_str("]")?;
            }
            writeln!(f)?;
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        Ok(())
    }
}
