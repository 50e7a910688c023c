use {
    crate::{Error, Kind, Result, utils::normalize_path},
    std::ops::Range,
};

/// A path pattern decomposed into trie segments.
///
/// The trie path is the pattern with parameter names stripped: `/users/:id`
/// becomes `/users/:` and `/files/*path` becomes `/files/*`. Every param or
/// wildcard segment is preceded by a static scaffold ending right before it,
/// so the node boundary in front of a placeholder always exists.
///
/// ```
/// use radix_router::{Kind, RoutePattern};
///
/// let pattern = RoutePattern::parse("/users/:id/files/*path").unwrap();
/// assert_eq!(pattern.trie_path(), "/users/:/files/*");
/// assert_eq!(pattern.param_names(), ["id", "path"]);
/// assert_eq!(pattern.terminal_kind(), Kind::Wildcard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    pristine: String,
    trie_path: String,
    pnames: Vec<String>,
    /// Structural segments inserted before the terminal one, as (kind, end offset).
    scaffolds: Vec<(Kind, usize)>,
    terminal: Kind,
}

impl RoutePattern {
    /// Parses `path`, normalizing it to start with `/`.
    ///
    /// A `:` starts a parameter running to the next `/`. A `*` starts a
    /// wildcard consuming the rest of the pattern; its name is the trimmed
    /// remainder, or `*` when nothing follows. A remainder containing `/` is
    /// rejected since nothing may follow a wildcard.
    pub fn parse(path: &str) -> Result<Self> {
        let pristine = normalize_path(path).into_owned();
        let mut trie_path = String::with_capacity(pristine.len());
        let mut pnames = Vec::new();
        let mut scaffolds = Vec::new();
        let mut terminal = Kind::Static;

        let mut rest = pristine.as_str();
        while let Some(i) = rest.find([':', '*']) {
            trie_path.push_str(&rest[..i]);
            scaffolds.push((Kind::Static, trie_path.len()));

            if rest.as_bytes()[i] == b':' {
                let after = &rest[i + 1..];
                let end = after.find('/').unwrap_or(after.len());
                pnames.push(after[..end].to_string());
                trie_path.push(':');
                rest = &after[end..];
                if rest.is_empty() {
                    terminal = Kind::Param;
                } else {
                    scaffolds.push((Kind::Param, trie_path.len()));
                }
            } else {
                let name = rest[i + 1..].trim();
                if name.contains('/') {
                    return Err(Error::invalid_pattern(format!(
                        "nothing may follow the wildcard in `{pristine}`"
                    )));
                }
                pnames.push(if name.is_empty() { "*" } else { name }.to_string());
                trie_path.push('*');
                terminal = Kind::Wildcard;
                rest = "";
            }
        }
        trie_path.push_str(rest);

        Ok(Self {
            pristine,
            trie_path,
            pnames,
            scaffolds,
            terminal,
        })
    }

    /// The normalized pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.pristine
    }

    /// The pattern with parameter names stripped, as stored in the trie.
    pub fn trie_path(&self) -> &str {
        &self.trie_path
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.pnames
    }

    /// Kind of the node the route terminates on.
    pub fn terminal_kind(&self) -> Kind {
        self.terminal
    }

    /// Structural segments as (kind, trie path prefix) in insertion order.
    pub(crate) fn scaffolds(&self) -> impl Iterator<Item = (Kind, &str)> {
        self.scaffolds
            .iter()
            .map(|&(kind, end)| (kind, &self.trie_path[..end]))
    }

    /// Byte ranges of the placeholders (`:name`, `*name`) in the pristine pattern.
    pub(crate) fn placeholders(pattern: &str) -> impl Iterator<Item = Range<usize>> + '_ {
        let mut offset = 0;
        std::iter::from_fn(move || {
            let start = offset + pattern[offset..].find([':', '*'])?;
            let end = if pattern.as_bytes()[start] == b'*' {
                pattern.len()
            } else {
                pattern[start..]
                    .find('/')
                    .map_or(pattern.len(), |i| start + i)
            };
            offset = end;
            Some(start..end)
        })
    }
}
