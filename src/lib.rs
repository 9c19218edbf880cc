//! Bind typed configuration records from environment-like key/value sources.
//!
//! Each field is looked up under its uppercased name, coerced to its declared
//! kind and either assigned or reported. Every field is always attempted, so a
//! single load surfaces every missing or malformed variable at once.
//!
//! ```rust
//! use envbind::{Bind, StaticSource, define_config, summarize};
//!
//! define_config! {
//!     #[derive(Debug)]
//!     pub struct ServerConfig {
//!         #[field(example = "localhost")]
//!         pub host: String,
//!         #[field(example = 9000)]
//!         pub port: u16,
//!         pub debug: bool,
//!     }
//! }
//!
//! let source = StaticSource::new()
//!     .with("HOST", "thepark")
//!     .with("PORT", "4242")
//!     .with("DEBUG", "yes");
//!
//! let loaded = ServerConfig::load_from(&source).unwrap();
//! assert_eq!(loaded.config.host, "thepark");
//! assert_eq!(loaded.config.port, 4242);
//! assert!(!loaded.config.debug);
//! assert!(!summarize(&loaded.result).ok);
//! ```

pub mod binder;
pub mod docs;
pub mod environment;
pub mod error;
pub mod field;
pub mod outcome;
pub mod prefix;
pub mod report;
pub mod source;
pub mod value;

// Re-export main types
pub use binder::{Binder, Loaded, bind, bind_field, load_into};
pub use environment::EnvSource;
pub use error::{ConfigError, SourceError};
pub use field::{FieldDescriptor, FieldKind, ParseFieldError};
pub use outcome::{BindingOutcome, LoadResult, OutcomeKind};
pub use prefix::PrefixSource;
pub use report::{Summary, format_config_errors, summarize};
pub use source::{ConfigSource, StaticSource};
pub use value::{FromValue, Value};

// Re-export macro
pub use envbind_macros::define_config;

/// A record whose fields can be bound from a [`ConfigSource`]
///
/// Usually implemented by [`define_config!`]; hand-written impls must list
/// the same fields in `fields` that `assign` accepts.
pub trait Bind: Sized {
    /// Field descriptors in declaration order
    fn fields() -> Vec<FieldDescriptor>;

    /// Store a coerced value into the field declared as `field`
    ///
    /// Returns the value back if the field does not exist or cannot hold it.
    fn assign(&mut self, field: &str, value: Value) -> Result<(), Value>;

    /// Bind into this instance in place, leaving failed fields untouched
    fn bind_from<S: ConfigSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<LoadResult, ConfigError> {
        load_into(self, source)
    }

    /// Load a fresh record from `source`, starting from `Default`
    fn load_from<S: ConfigSource + ?Sized>(source: &S) -> Result<Loaded<Self>, ConfigError>
    where
        Self: Default,
    {
        let mut config = Self::default();
        let result = load_into(&mut config, source)?;
        Ok(Loaded { config, result })
    }

    /// Load from the process-wide environment snapshot
    fn load() -> Result<Loaded<Self>, ConfigError>
    where
        Self: Default,
    {
        Self::load_from(EnvSource::global())
    }

    /// Load from the process environment, reading `PREFIX` + key for every field
    fn load_with_prefix(prefix: &str) -> Result<Loaded<Self>, ConfigError>
    where
        Self: Default,
    {
        Self::load_from(&EnvSource::global().prefixed(prefix))
    }

    /// Load from the process environment, returning every error instead of a partial record
    fn load_or_error() -> Result<Self, Vec<ConfigError>>
    where
        Self: Default,
    {
        Self::load()
            .map_err(|e| vec![e])
            .and_then(Loaded::into_result)
    }
}
