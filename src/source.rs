use crate::{error::SourceError, prefix::PrefixSource};
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    io::Read,
    path::Path,
    rc::Rc,
    sync::Arc,
};

/// Anything that can hand out string values by exact key
///
/// Sources are immutable once built; lookups never have side effects.
pub trait ConfigSource {
    /// Return the raw value stored under `key`, if any
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;

    /// The key as the underlying origin sees it
    ///
    /// Decorators that rewrite keys override this so diagnostics point at the
    /// variable an operator actually has to set.
    fn resolve_key(&self, key: &str) -> String {
        key.to_string()
    }

    /// Wrap this source so every lookup is prefixed with `prefix`
    fn prefixed(self, prefix: impl Into<String>) -> PrefixSource<Self>
    where
        Self: Sized,
    {
        PrefixSource::new(prefix, self)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }

    fn resolve_key(&self, key: &str) -> String {
        (**self).resolve_key(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }

    fn resolve_key(&self, key: &str) -> String {
        (**self).resolve_key(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Rc<S> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }

    fn resolve_key(&self, key: &str) -> String {
        (**self).resolve_key(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }

    fn resolve_key(&self, key: &str) -> String {
        (**self).resolve_key(key)
    }
}

impl<S: std::hash::BuildHasher> ConfigSource for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// A source backed by a caller-supplied mapping
///
/// Used for tests and for origins other than the process environment, such as
/// dotenv files or values fetched from a service before binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    values: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`StaticSource::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Parse dotenv-formatted data (`KEY=value` lines, `#` comments)
    pub fn from_env_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let values = dotenvy::from_read_iter(reader).collect::<Result<HashMap<_, _>, _>>()?;
        tracing::debug!(count = values.len(), "parsed env data");
        Ok(Self { values })
    }

    /// Read a dotenv file without touching the process environment
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let to_error = |source: dotenvy::Error| SourceError::EnvFile {
            path: path.to_path_buf(),
            source,
        };

        let values = dotenvy::from_path_iter(path)
            .map_err(to_error)?
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(to_error)?;

        tracing::debug!(path = %path.display(), count = values.len(), "loaded env file");
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for StaticSource {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.values.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for StaticSource {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}
