/// Path parameters captured by [`Router::find`](crate::Router::find).
///
/// Names borrow from the router (`'r`), values from the request path (`'p`),
/// so a lookup does not allocate once the buffer has grown to the router's
/// [`max_param_count`](crate::Router::max_param_count). Reuse one `Params`
/// across lookups to keep that capacity.
///
/// A filled buffer borrows the router, so it cannot be kept across `add` or
/// `del`; start a new one after mutating the router.
///
/// ```
/// use radix_router::{Params, Router};
///
/// let mut router = Router::new("not found", "not allowed");
/// router.add("", "GET", "/users/:id/posts/:post", "post").unwrap();
///
/// let mut params = Params::with_capacity(router.max_param_count());
/// let (handler, count) = router.find("GET", "/users/7/posts/42", &mut params);
/// assert_eq!(*handler, "post");
/// assert_eq!(count, 2);
/// assert_eq!(params.get("post"), Some("42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params<'r, 'p> {
    names: &'r [String],
    values: Vec<&'p str>,
}

impl<'r, 'p> Params<'r, 'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer able to hold `capacity` values without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: &[],
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&'p str> {
        let index = self.names.iter().position(|n| n == name)?;
        self.values.get(index).copied()
    }

    pub fn name(&self, index: usize) -> Option<&'r str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn value(&self, index: usize) -> Option<&'p str> {
        self.values.get(index).copied()
    }

    /// (name, value) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &'p str)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn clear(&mut self) {
        self.names = &[];
        self.values.clear();
    }

    pub(crate) fn set_names(&mut self, names: &'r [String]) {
        self.names = names;
    }

    pub(crate) fn push(&mut self, value: &'p str) {
        self.values.push(value);
    }
}

/// Sink for the values captured while walking the trie. Lookup records them,
/// deletion only needs the walk and discards them.
pub(crate) trait Captures<'p> {
    fn captured(&self) -> usize;
    fn capture(&mut self, value: &'p str);
    fn rewind(&mut self, len: usize);
}

impl<'r, 'p> Captures<'p> for Params<'r, 'p> {
    fn captured(&self) -> usize {
        self.values.len()
    }

    fn capture(&mut self, value: &'p str) {
        self.values.push(value);
    }

    fn rewind(&mut self, len: usize) {
        self.values.truncate(len);
    }
}

/// Counts captures without storing them.
#[derive(Debug, Default)]
pub(crate) struct Discard(usize);

impl<'p> Captures<'p> for Discard {
    fn captured(&self) -> usize {
        self.0
    }

    fn capture(&mut self, _value: &'p str) {
        self.0 += 1;
    }

    fn rewind(&mut self, len: usize) {
        self.0 = len;
    }
}
