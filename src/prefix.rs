use crate::source::ConfigSource;
use std::borrow::Cow;

/// Wraps a source and prepends a fixed prefix to every key it is asked for
///
/// `PrefixSource::new("APP_", env).lookup("HOST")` reads `APP_HOST`. An empty
/// prefix is transparent, and decorators may wrap decorators: the outer prefix
/// ends up closest to the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSource<S> {
    prefix: String,
    inner: S,
}

impl<S> PrefixSource<S> {
    pub fn new(prefix: impl Into<String>, inner: S) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn prefixed_key(&self, key: &str) -> String {
        let mut full = String::with_capacity(self.prefix.len() + key.len());
        full.push_str(&self.prefix);
        full.push_str(key);
        full
    }
}

impl<S: ConfigSource> ConfigSource for PrefixSource<S> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.inner.lookup(&self.prefixed_key(key))
    }

    fn resolve_key(&self, key: &str) -> String {
        self.inner.resolve_key(&self.prefixed_key(key))
    }
}
