//!
//! Configuration structures for building a router from a declarative route table.
//!
//! A configuration can be created in many ways:
//! - From an environment-specific TOML file via `Config::from_rust_env` or `Config::from_toml_file`
//! - From a TOML string via `Config::from_toml`
//! - Constructed programmatically via the builder methods on `Config`
//!
//! In both TOML-based methods, environment variables can be referenced in the TOML
//! using the {{ VAR_NAME }} syntax, and they will be substituted with the corresponding
//! environment variable value. This is handy for mounting the whole route table
//! under a deployment-specific prefix.
//!
//! Configuration is split into logical sections, each represented by their own struct:
//!
//! - `RouterConfig` for the NotFound / MethodNotAllowed handler ids
//! - `LoggingConfig` for logging and tracing settings
//! - `RouteConfig` for each entry of the `[[routes]]` table
//!
mod logging;
mod router;

pub use logging::*;
pub use router::*;

use {
    crate::{Error, Result, utils::replace_handlebars_with_env},
    serde::Deserialize,
    std::{env, fs, str::FromStr},
};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl Config {
    ///
    /// Loads the configuration from a file based on the RUST_ENV environment variable.
    /// Fails if RUST_ENV is not set.
    ///
    pub fn from_rust_env() -> Result<Config> {
        Self::from_toml_file(env::var("RUST_ENV")?)
    }

    ///
    /// Given an environment name, loads the corresponding configuration file,
    /// substitutes any environment variables, and returns a Config struct.
    /// The configuration file is expected to be located at "config/{env}.toml"
    /// where {env} is the provided environment name (e.g., "dev", "prod").
    ///
    pub fn from_toml_file(env: impl AsRef<str>) -> Result<Config> {
        let path = format!("config/{}.toml", env.as_ref());
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    ///
    /// Parses a configuration string in TOML format into a Config struct.
    ///
    pub fn from_toml(toml_str: &str) -> Result<Config> {
        toml_str.parse()
    }

    /// Sets the handler id used for lookups that match no route.
    pub fn with_not_found(mut self, handler: impl Into<String>) -> Self {
        self.router.not_found = handler.into();
        self
    }

    /// Sets the handler id used when the path matches but the method does not.
    pub fn with_method_not_allowed(mut self, handler: impl Into<String>) -> Self {
        self.router.method_not_allowed = handler.into();
        self
    }

    /// Sets the log format of the LoggingConfig.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.logging.format = format;
        self
    }

    /// Sets the default filter directives of the LoggingConfig.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = Some(filter.into());
        self
    }

    /// Appends an entry to the route table.
    pub fn with_route(mut self, route: RouteConfig) -> Self {
        self.routes.push(route);
        self
    }

    /// Ensures that the configuration is valid.
    /// Name and path conflicts between routes are detected when the router
    /// is built, since they depend on pattern normalization.
    pub fn validate(&self) -> Result<()> {
        self.router.validate()?;
        self.logging.validate()?;
        for route in &self.routes {
            route.validate()?;
        }
        Ok(())
    }

    ///
    /// Sets up the tracing subscriber for logging based on the LoggingConfig.
    ///
    /// NOTE: This should be called early during startup to ensure logging is configured
    ///       before any log messages are emitted.
    ///
    pub fn setup_tracing(&self) {
        use tracing_subscriber::prelude::*;
        let env_filter = self.logging.env_filter();
        match self.logging.format {
            LogFormat::Json => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer().json())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Default => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Compact => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer().compact())
                    .with(env_filter)
                    .try_init();
            }
            LogFormat::Pretty => {
                let _ = tracing_subscriber::registry()
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .with(env_filter)
                    .try_init();
            }
        }
    }
}

///
/// Parses a configuration string with references to environment variables
/// into a Config struct by substituting the environment variables and then
/// parsing the resulting TOML.
///
impl FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let config_file = replace_handlebars_with_env(s);
        let config = toml::from_str::<Config>(&config_file)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_config_from_str_valid() {
        let config_str = r#"
[router]
not_found = "missing"

[logging]
format = "json"
filter = "radix_router=debug"

[[routes]]
name = "users.show"
method = "GET"
path = "/users/:id"
handler = "show_user"

[[routes]]
path = "/assets/*"
handler = "assets"
        "#;

        let config: Config = config_str.parse().unwrap();
        assert_eq!(config.router.not_found, "missing");
        assert_eq!(config.router.method_not_allowed, "method_not_allowed");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(
            config.routes[0],
            RouteConfig::new("users.show", "GET", "/users/:id", "show_user")
        );
        assert_eq!(config.routes[1].name, "");
        assert_eq!(config.routes[1].method, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_str_substitutes_env() {
        unsafe {
            env::set_var("ROUTER_TEST_API_PREFIX", "/api/v2");
        }

        let config_str = r#"
[[routes]]
name = "health"
method = "GET"
path = "{{ ROUTER_TEST_API_PREFIX }}/health"
handler = "health"
        "#;
        let config = Config::from_toml(config_str).unwrap();
        assert_eq!(config.routes[0].path, "/api/v2/health");

        unsafe {
            env::remove_var("ROUTER_TEST_API_PREFIX");
        }
    }

    #[test]
    fn test_config_from_str_invalid_toml() {
        let result = "this is not valid toml".parse::<Config>();
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_config_route_requires_path_and_handler() {
        let result = "[[routes]]\nname = \"x\"\n".parse::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder_matches_toml_equivalent() {
        let builder_config = Config::default()
            .with_not_found("nf")
            .with_method_not_allowed("mna")
            .with_log_format(LogFormat::Compact)
            .with_route(RouteConfig::new("home", "GET", "/", "index"));

        let toml_config: Config = r#"
[router]
not_found = "nf"
method_not_allowed = "mna"

[logging]
format = "compact"

[[routes]]
name = "home"
method = "GET"
path = "/"
handler = "index"
        "#
        .parse()
        .unwrap();

        assert_eq!(builder_config.router.not_found, toml_config.router.not_found);
        assert_eq!(
            builder_config.router.method_not_allowed,
            toml_config.router.method_not_allowed
        );
        assert_eq!(builder_config.logging.format, toml_config.logging.format);
        assert_eq!(builder_config.routes, toml_config.routes);
    }

    #[test]
    fn test_validate_rejects_bad_route() {
        let config = Config::default().with_route(RouteConfig::new("x", "GET", "/x", ""));
        assert_eq!(
            config.validate().unwrap_err().kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_validate_rejects_bad_log_filter() {
        let config = Config::default().with_log_filter("radix_router=verbose");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let config = Config::from_toml_file("test").expect("config/test.toml should load");
        assert!(config.validate().is_ok());
        assert!(!config.routes.is_empty());

        let missing = Config::from_toml_file("does-not-exist");
        assert_eq!(missing.unwrap_err().kind(), ErrorKind::Io);
    }
}
