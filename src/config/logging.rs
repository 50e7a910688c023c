use {crate::Result, serde::Deserialize, tracing_subscriber::EnvFilter};

///
/// Configuration for logging and tracing.
///
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Format for log output.
    /// The default format is `default`, which is "full" human-readable format.
    /// Other options are `json`, `compact`, and `pretty`.
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directives used when `RUST_LOG` is not set, e.g.
    /// `"radix_router=debug"`. Route registration is logged at debug level.
    #[serde(default)]
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(filter) = &self.filter {
            EnvFilter::try_new(filter).map_err(|e| {
                crate::Error::config(format!("invalid logging filter `{filter}`: {e}"))
            })?;
        }
        Ok(())
    }

    /// Builds the env filter: `RUST_LOG` wins, then the configured directives.
    pub(crate) fn env_filter(&self) -> EnvFilter {
        match &self.filter {
            Some(filter) => {
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
            }
            None => EnvFilter::from_default_env(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Default,
    Compact,
    Pretty,
}
