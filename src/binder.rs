use crate::{
    Bind,
    error::ConfigError,
    field::FieldDescriptor,
    outcome::{BindingOutcome, LoadResult, OutcomeKind},
    report::{Summary, summarize},
    source::ConfigSource,
    value::FromValue,
};
use std::{borrow::Cow, collections::HashMap};

/// Bind every field against `source`, in declaration order
///
/// All fields are attempted; a missing or malformed value never stops the
/// remaining fields from being looked up. The only early exit is an invalid
/// descriptor set, which is rejected before any lookup happens.
///
/// # Example
/// ```rust
/// use envbind::{FieldDescriptor, StaticSource, bind};
///
/// let source = StaticSource::new().with("HOST", "thepark").with("PORT", "nope");
/// let fields = [
///     FieldDescriptor::string("host"),
///     FieldDescriptor::integer("port").with_example("9000"),
/// ];
///
/// let result = bind(&fields, &source).unwrap();
/// assert_eq!(result.len(), 2);
/// assert!(result.has_errors());
/// ```
pub fn bind<S: ConfigSource + ?Sized>(
    fields: &[FieldDescriptor],
    source: &S,
) -> Result<LoadResult, ConfigError> {
    validate_fields(fields)?;
    Ok(fields.iter().map(|field| bind_field(field, source)).collect())
}

/// Look up, coerce and classify a single field
pub fn bind_field<S: ConfigSource + ?Sized>(
    field: &FieldDescriptor,
    source: &S,
) -> BindingOutcome {
    let key = field.key();
    let raw = source.lookup(&key).map(Cow::into_owned);

    let (kind, value) = match raw.as_deref() {
        None => (OutcomeKind::Missing, None),
        Some(raw) => match field.kind().coerce(raw) {
            Some(value) => (OutcomeKind::Ok, Some(value)),
            None => (OutcomeKind::TypeMismatch, None),
        },
    };

    BindingOutcome {
        field: field.name().to_string(),
        key: source.resolve_key(&key),
        expected: field.kind(),
        kind,
        raw,
        value,
        example: field.example().map(str::to_string),
    }
}

fn validate_fields(fields: &[FieldDescriptor]) -> Result<(), ConfigError> {
    let mut keys = KeyRegistry::with_capacity(fields.len());
    fields.iter().try_for_each(|field| keys.register(field))
}

/// Uppercased keys claimed so far, mapped to the field name that claimed them
#[derive(Debug, Default)]
struct KeyRegistry {
    seen: HashMap<String, String>,
}

impl KeyRegistry {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashMap::with_capacity(capacity),
        }
    }

    fn register(&mut self, field: &FieldDescriptor) -> Result<(), ConfigError> {
        if field.name().is_empty() {
            return Err(ConfigError::InvalidTarget {
                reason: "field names must not be empty".to_string(),
            });
        }

        let key = field.key();
        if let Some(previous) = self.seen.get(&key) {
            return Err(ConfigError::InvalidTarget {
                reason: format!(
                    "fields '{}' and '{}' both bind to key {}",
                    previous,
                    field.name(),
                    key
                ),
            });
        }

        self.seen.insert(key, field.name().to_string());
        Ok(())
    }
}

/// Bind `T`'s fields against `source` and assign the successful ones into `target`
///
/// Fields that are missing or fail coercion keep whatever value `target`
/// already held. A value the field type refuses (e.g. `70000` for a `u16`) is
/// reported as a type mismatch.
pub fn load_into<T: Bind, S: ConfigSource + ?Sized>(
    target: &mut T,
    source: &S,
) -> Result<LoadResult, ConfigError> {
    let fields = T::fields();
    let mut result = bind(&fields, source)?;

    for outcome in result.outcomes_mut() {
        if let Some(value) = outcome.value.clone()
            && target.assign(&outcome.field, value).is_err()
        {
            outcome.reject();
        }
    }

    Ok(result)
}

/// A populated record together with the outcome of loading it
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub config: T,
    pub result: LoadResult,
}

impl<T> Loaded<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.result)
    }

    /// The record if every field bound, otherwise every collected error
    pub fn into_result(self) -> Result<T, Vec<ConfigError>> {
        self.result.into_result().map(|_| self.config)
    }
}

/// Request-scoped, builder-style loader for code that does not use `define_config!`
///
/// # Example
/// ```rust
/// use envbind::{Binder, StaticSource};
///
/// let source = StaticSource::new().with("PORT", "4242");
/// let mut binder = Binder::new(&source);
/// let port = binder.field::<u16>("port", "9000");
/// let debug = binder.field::<bool>("debug", None);
///
/// assert_eq!(port, Some(4242));
/// assert_eq!(debug, None);
/// assert!(binder.finish().unwrap().has_errors());
/// ```
pub struct Binder<'a, S: ?Sized> {
    source: &'a S,
    result: LoadResult,
    keys: KeyRegistry,
    invalid: Option<ConfigError>,
}

impl<'a, S: ConfigSource + ?Sized> Binder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            result: LoadResult::default(),
            keys: KeyRegistry::default(),
            invalid: None,
        }
    }

    /// Bind one field whose kind follows from `T`
    pub fn field<T: FromValue>(
        &mut self,
        name: &'static str,
        example: impl Into<Option<&'static str>>,
    ) -> Option<T> {
        let mut descriptor = FieldDescriptor::new(name, T::KIND);
        if let Some(example) = example.into() {
            descriptor = descriptor.with_example(example);
        }
        self.descriptor(&descriptor)
    }

    /// Bind one field from an explicit descriptor
    ///
    /// A descriptor whose kind does not match `T` never yields a value; the
    /// outcome is recorded as a type mismatch. A descriptor with an empty
    /// name, or whose key was already bound, is not looked up at all and
    /// makes [`Binder::finish`] fail with `InvalidTarget`.
    pub fn descriptor<T: FromValue>(&mut self, descriptor: &FieldDescriptor) -> Option<T> {
        if let Err(error) = self.keys.register(descriptor) {
            self.invalid.get_or_insert(error);
            return None;
        }

        let mut outcome = bind_field(descriptor, self.source);

        let value = match outcome.value.clone().map(T::from_value) {
            Some(Ok(value)) => Some(value),
            Some(Err(_)) => {
                outcome.reject();
                None
            }
            None => None,
        };

        self.result.push(outcome);
        value
    }

    /// Outcomes collected so far
    pub fn result(&self) -> &LoadResult {
        &self.result
    }

    /// The collected outcomes, or the first invalid descriptor seen
    pub fn finish(self) -> Result<LoadResult, ConfigError> {
        match self.invalid {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}
