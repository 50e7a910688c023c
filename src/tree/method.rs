use std::collections::BTreeMap;

/// Per-node map from HTTP method to handler, plus the "any method" slot used
/// by registrations with an empty method.
#[derive(Debug, Clone)]
pub(crate) struct MethodHandler<H> {
    handlers: BTreeMap<String, H>,
    any: Option<H>,
}

impl<H> MethodHandler<H> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            any: None,
        }
    }

    /// Registers `handler` under `method`, replacing a previous registration.
    /// An empty method fills the any slot.
    pub(crate) fn add_handler(&mut self, method: &str, handler: H) {
        if method.is_empty() {
            self.any = Some(handler);
        } else {
            self.handlers.insert(method.to_string(), handler);
        }
    }

    /// Removes the handler registered under `method` (the any slot when empty).
    pub(crate) fn del_handler(&mut self, method: &str) -> Option<H> {
        if method.is_empty() {
            self.any.take()
        } else {
            self.handlers.remove(method)
        }
    }

    /// Handler for `method`, falling back to the any slot.
    pub(crate) fn find(&self, method: &str) -> Option<&H> {
        self.handlers.get(method).or(self.any.as_ref())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.any.is_none()
    }

    /// Registered methods in order, the any slot last as `""`.
    pub(crate) fn methods(&self) -> impl Iterator<Item = &str> {
        self.handlers
            .keys()
            .map(String::as_str)
            .chain(self.any.as_ref().map(|_| ""))
    }
}

impl<H> Default for MethodHandler<H> {
    fn default() -> Self {
        Self::new()
    }
}
