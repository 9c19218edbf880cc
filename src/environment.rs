use crate::source::ConfigSource;
use std::{borrow::Cow, collections::HashMap, env, sync::OnceLock};

static GLOBAL: OnceLock<EnvSource> = OnceLock::new();

/// A snapshot of the process environment
///
/// The environment is copied once at construction. Later changes to the
/// process environment are not observed, which keeps a load call a pure
/// function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Copy every variable of the current process environment
    ///
    /// Variables whose key or value is not valid UTF-8 are skipped.
    pub fn snapshot() -> Self {
        let mut vars = HashMap::new();
        let mut skipped = 0usize;

        for (key, value) in env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped non UTF-8 environment entries");
        }
        tracing::debug!(count = vars.len(), "captured environment snapshot");

        Self { vars }
    }

    /// Snapshot only the variables starting with `prefix`, with the prefix removed
    ///
    /// With `APP_HOST=x` in the environment, `EnvSource::filtered("APP_")`
    /// answers `lookup("HOST")` with `x`.
    pub fn filtered(prefix: &str) -> Self {
        let vars = Self::snapshot()
            .vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .map(|stripped| (stripped.to_string(), value))
            })
            .collect::<HashMap<_, _>>();

        tracing::debug!(prefix, count = vars.len(), "filtered environment snapshot");
        Self { vars }
    }

    /// Build a snapshot from raw `KEY=VALUE` entries
    ///
    /// Each entry is split on its first `=`; key and value are kept verbatim.
    /// Entries without any `=` are skipped.
    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        let mut vars = HashMap::new();

        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) => {
                    vars.insert(key.to_string(), value.to_string());
                }
                None => tracing::trace!(entry, "skipping entry without '='"),
            }
        }

        Self { vars }
    }

    /// A process-wide snapshot, taken on first use and never mutated afterwards
    pub fn global() -> &'static EnvSource {
        GLOBAL.get_or_init(Self::snapshot)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

impl ConfigSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.vars.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}
