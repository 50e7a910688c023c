//! Router-level unit tests.
//!
//! Operation-specific tests live next to each operation (`insert`, `lookup`,
//! `delete`, `url`). This module covers behavior spanning several of them:
//! traversal, diagnostics, configuration and logging.

use {
    super::*,
    crate::{ErrorKind, LogFormat, RouteConfig},
    proptest::prelude::*,
    tracing_test::traced_test,
};

// ============================================================================
// Helpers
// ============================================================================

fn collect_each<H>(router: &Router<H>) -> Vec<(String, String, String)> {
    let mut seen = Vec::new();
    router.each(|name, method, path| {
        seen.push((name.to_string(), method.to_string(), path.to_string()))
    });
    seen.sort();
    seen
}

fn triple(name: &str, method: &str, path: &str) -> (String, String, String) {
    (name.to_string(), method.to_string(), path.to_string())
}

fn resolver(id: &str) -> Option<String> {
    Some(id.to_uppercase())
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_each_reports_every_method() {
    let mut router = Router::new(0, 0);
    router.add("home", "GET", "/", 1).unwrap();
    router.add("user", "GET", "/users/:id", 2).unwrap();
    router.add("user", "PUT", "/users/:id", 3).unwrap();
    router.add("", "", "/hooks/*", 4).unwrap();

    assert_eq!(
        collect_each(&router),
        vec![
            triple("", "", "/hooks/*"),
            triple("home", "GET", "/"),
            triple("user", "GET", "/users/:id"),
            triple("user", "PUT", "/users/:id"),
        ]
    );
}

#[test]
fn test_idempotent_registration() {
    let mut router = Router::new("404", "405");
    router.add("user", "GET", "/users/:id", "show").unwrap();
    let nodes = router.tree.len();
    let tree = router.print_tree();

    router.add("user", "GET", "/users/:id", "show").unwrap();

    assert_eq!(router.tree.len(), nodes);
    assert_eq!(router.print_tree(), tree);
    assert_eq!(
        collect_each(&router),
        vec![triple("user", "GET", "/users/:id")]
    );
}

#[test]
fn test_each_on_empty_router() {
    let router: Router<()> = Router::new((), ());
    assert!(collect_each(&router).is_empty());
}

#[test]
fn test_print_tree() {
    let mut router = Router::new((), ());
    router.add("", "GET", "/static", ()).unwrap();
    router.add("", "POST", "/test/:name", ()).unwrap();
    router.add("", "GET", "/static1/*", ()).unwrap();

    assert_eq!(
        router.print_tree(),
        "\
/ (static)
  static (static) /static [GET]
    1/ (static)
      * (wildcard) /static1/* [GET]
  test/ (static)
    : (param) /test/:name [POST]
"
    );
}

#[test]
fn test_debug_summarizes() {
    let mut router = Router::new((), ());
    router.add("", "GET", "/a/:b", ()).unwrap();
    let debug = format!("{router:?}");
    assert!(debug.contains("routes: 1"), "{debug}");
    assert!(debug.contains("max_param_count: 1"), "{debug}");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_from_config() {
    let config = Config::default()
        .with_not_found("missing")
        .with_route(RouteConfig::new("users.show", "GET", "/users/:id", "show_user"))
        .with_route(RouteConfig::new("", "", "/assets/*path", "assets"));

    let router = Router::from_config(&config, resolver).unwrap();
    let mut params = Params::new();

    assert_eq!(router.find("GET", "/users/7", &mut params), (&"SHOW_USER".to_string(), 1));
    assert_eq!(router.find("DELETE", "/assets/app.js", &mut params).0, "ASSETS");
    assert_eq!(router.find("POST", "/users/7", &mut params).0, "METHOD_NOT_ALLOWED");
    assert_eq!(router.find("GET", "/nope", &mut params).0, "MISSING");
    assert_eq!(router.url("users.show", &[&7]), "/users/7");
}

#[test]
fn test_from_config_file() {
    let config = Config::from_toml_file("test").unwrap();
    let router = Router::from_config(&config, resolver).unwrap();
    let mut params = Params::new();

    assert_eq!(router.find("GET", "/", &mut params).0, "INDEX");
    assert_eq!(router.find("PUT", "/users/3", &mut params).0, "UPDATE_USER");
    assert_eq!(router.route_path("assets"), Some("/assets/*path"));
}

#[test]
fn test_from_config_unknown_handler() {
    let config = Config::default().with_route(RouteConfig::new("", "GET", "/", "nope"));
    let err = Router::from_config(&config, |id| (id != "nope").then(|| id.to_string()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHandler);
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_from_config_unknown_fallback() {
    let config = Config::default().with_method_not_allowed("gone");
    let err = Router::from_config(&config, |id| (id != "gone").then(|| id.to_string()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHandler);
}

#[test]
fn test_from_config_conflicting_routes() {
    let config = Config::default()
        .with_log_format(LogFormat::Json)
        .with_route(RouteConfig::new("users", "GET", "/users", "list"))
        .with_route(RouteConfig::new("users", "GET", "/people", "list"));
    let err = Router::from_config(&config, resolver).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RouteConflict);
}

#[test]
fn test_from_config_invalid_method() {
    let config = Config::default().with_route(RouteConfig::new("", "GE T", "/", "index"));
    let err = Router::from_config(&config, resolver).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// Logging
// ============================================================================

#[test]
#[traced_test]
fn test_registration_is_logged() {
    let mut router = Router::new((), ());
    router.add("user", "GET", "/users/:id", ()).unwrap();
    assert!(logs_contain("Route registered"));
    assert!(logs_contain("/users/:id"));
}

#[test]
#[traced_test]
fn test_removal_is_logged() {
    let mut router = Router::new((), ());
    router.add("", "GET", "/a", ()).unwrap();
    router.del("", "", "/b").unwrap();
    assert!(logs_contain("No route to remove"));
    router.del("", "", "/a").unwrap();
    assert!(logs_contain("Route removed"));
}

#[test]
#[traced_test]
fn test_from_config_is_logged() {
    let config = Config::default().with_route(RouteConfig::new("", "GET", "/", "index"));
    Router::from_config(&config, resolver).unwrap();
    assert!(logs_contain("Router built from configuration"));
}

// ============================================================================
// Properties
// ============================================================================

fn literal() -> impl Strategy<Value = String> {
    "[a-c]{1,3}"
}

proptest! {
    #[test]
    fn prop_registered_routes_round_trip(
        segments in prop::collection::vec((literal(), any::<bool>()), 1..5),
        values in prop::collection::vec("[a-z0-9]{1,6}", 5),
    ) {
        let mut pattern = String::new();
        let mut request = String::new();
        let mut expected = Vec::new();
        for (i, (text, is_param)) in segments.iter().enumerate() {
            if *is_param {
                pattern.push_str(&format!("/:p{i}"));
                request.push('/');
                request.push_str(&values[i]);
                expected.push((format!("p{i}"), values[i].clone()));
            } else {
                pattern.push('/');
                pattern.push_str(text);
                request.push('/');
                request.push_str(text);
            }
        }

        let mut router = Router::new("404", "405");
        let count = router.add("route", "GET", &pattern, "route").unwrap();
        prop_assert_eq!(count, expected.len());

        let mut params = Params::with_capacity(router.max_param_count());
        let (handler, found) = router.find("GET", &request, &mut params);
        prop_assert_eq!(*handler, "route");
        prop_assert_eq!(found, expected.len());
        let captured: Vec<(String, String)> = params
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        prop_assert_eq!(captured, expected);

        let args: Vec<&dyn std::fmt::Display> = values.iter().map(|v| v as &dyn std::fmt::Display).collect();
        let param_values: Vec<&dyn std::fmt::Display> = segments
            .iter()
            .enumerate()
            .filter(|(_, (_, is_param))| *is_param)
            .map(|(i, _)| args[i])
            .collect();
        prop_assert_eq!(router.url("route", &param_values), request);
    }
}
