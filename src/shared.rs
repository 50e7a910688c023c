//! A router shared between threads.
//!
//! Lookups, URL generation and traversal take a read lock and run in
//! parallel; `add` and `del` take the write lock.

use {
    crate::{Params, Result, Router},
    std::{
        fmt::Display,
        sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    },
};

/// Outcome of a [`SharedRouter::find`], owning its data so it outlives the
/// read lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<H> {
    pub handler: H,
    /// Captured (name, value) pairs in declaration order.
    pub params: Vec<(String, String)>,
}

impl<H> Resolved<H> {
    /// Value of the parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Cloneable handle to a [`Router`] behind a reader/writer lock.
///
/// A panic in another thread holding the lock does not disable the router:
/// the poisoned lock is recovered once, with a warning.
///
/// ```
/// use radix_router::{Router, SharedRouter};
///
/// let router = SharedRouter::new(Router::new("404", "405"));
/// router.add("user", "GET", "/users/:id", "user").unwrap();
///
/// let reader = router.clone();
/// let resolved = std::thread::spawn(move || reader.find("GET", "/users/7"))
///     .join()
///     .unwrap();
/// assert_eq!(resolved.handler, "user");
/// assert_eq!(resolved.param("id"), Some("7"));
/// ```
pub struct SharedRouter<H> {
    inner: Arc<RwLock<Router<H>>>,
}

impl<H> Clone for SharedRouter<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> From<Router<H>> for SharedRouter<H> {
    fn from(router: Router<H>) -> Self {
        Self::new(router)
    }
}

impl<H> SharedRouter<H> {
    pub fn new(router: Router<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(router)),
        }
    }

    /// Read access for several operations under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Router<H>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| self.recover(poisoned))
    }

    /// Exclusive access for several mutations under one lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, Router<H>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| self.recover(poisoned))
    }

    fn recover<G>(&self, poisoned: PoisonError<G>) -> G {
        tracing::warn!("Router lock poisoned by a panicking thread, recovering");
        self.inner.clear_poison();
        poisoned.into_inner()
    }

    /// See [`Router::add`].
    pub fn add(&self, name: &str, method: &str, path: &str, handler: H) -> Result<usize> {
        self.write().add(name, method, path, handler)
    }

    /// See [`Router::del`].
    pub fn del(&self, name: &str, method: &str, path: &str) -> Result<()> {
        self.write().del(name, method, path)
    }

    /// See [`Router::url`].
    pub fn url(&self, name: &str, params: &[&dyn Display]) -> String {
        self.read().url(name, params)
    }

    /// See [`Router::each`].
    pub fn each<F>(&self, visit: F)
    where
        F: FnMut(&str, &str, &str),
    {
        self.read().each(visit)
    }
}

impl<H: Clone> SharedRouter<H> {
    /// See [`Router::find`]. The handler is cloned out of the router.
    pub fn find(&self, method: &str, path: &str) -> Resolved<H> {
        let router = self.read();
        let mut params = Params::with_capacity(router.max_param_count());
        let (handler, _) = router.find(method, path, &mut params);
        Resolved {
            handler: handler.clone(),
            params: params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl<H> std::fmt::Debug for SharedRouter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_read() {
            Ok(router) => f.debug_tuple("SharedRouter").field(&*router).finish(),
            Err(_) => f.write_str("SharedRouter(<locked>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tracing_test::traced_test;

    fn shared() -> SharedRouter<u32> {
        let router = SharedRouter::new(Router::new(404, 405));
        router.add("user", "GET", "/users/:id", 1).unwrap();
        router.add("files", "GET", "/files/*path", 2).unwrap();
        router
    }

    #[test]
    fn test_find_returns_owned_result() {
        let router = shared();
        let resolved = router.find("GET", "/files/a/b");
        assert_eq!(
            resolved,
            Resolved {
                handler: 2,
                params: vec![("path".to_string(), "a/b".to_string())],
            }
        );
        assert_eq!(router.find("POST", "/users/1").handler, 405);
        assert_eq!(router.find("GET", "/nope").params, vec![]);
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let router = shared();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let router = router.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        let resolved = router.find("GET", &format!("/users/{i}"));
                        assert_eq!(resolved.handler, 1);
                        assert_eq!(resolved.param("id"), Some(i.to_string().as_str()));
                        assert_eq!(router.url("user", &[&i]), format!("/users/{i}"));
                    }
                })
            })
            .collect();

        let writer = {
            let router = router.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    let path = format!("/tmp/{i}");
                    router.add("", "GET", &path, 100 + i).unwrap();
                    router.del("", "", &path).unwrap();
                }
            })
        };

        for reader in readers {
            reader.join().unwrap();
        }
        writer.join().unwrap();

        assert_eq!(router.find("GET", "/tmp/3").handler, 404);
        let mut count = 0;
        router.each(|_, _, _| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let router = shared();
        let poisoner = router.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(router.find("GET", "/users/9").handler, 1);
        router.add("", "GET", "/after", 3).unwrap();
        assert_eq!(router.find("GET", "/after").handler, 3);
    }

    #[test]
    #[traced_test]
    fn test_poison_recovery_is_logged_once() {
        let router = shared();
        let poisoner = router.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("poison the lock");
        })
        .join();
        assert!(router.inner.is_poisoned());

        router.add("", "GET", "/after", 3).unwrap();
        assert!(logs_contain("Router lock poisoned by a panicking thread"));
        assert!(!router.inner.is_poisoned());
        assert_eq!(router.find("GET", "/after").handler, 3);
    }
}
