use crate::{error::ConfigError, field::FieldKind, value::Value};

/// How binding a single field ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutcomeKind {
    Ok,
    Missing,
    TypeMismatch,
}

/// Per-field result of a bind attempt
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingOutcome {
    /// Field name as declared on the record
    pub field: String,
    /// Key as seen by the source, prefixes included
    pub key: String,
    pub expected: FieldKind,
    pub kind: OutcomeKind,
    /// Raw string found in the source; `None` when the key was missing
    pub raw: Option<String>,
    /// Coerced value; only set when `kind` is `Ok`
    pub value: Option<Value>,
    pub example: Option<String>,
}

impl BindingOutcome {
    pub fn is_ok(&self) -> bool {
        self.kind == OutcomeKind::Ok
    }

    /// Downgrade an `Ok` outcome whose value the target refused to hold
    pub(crate) fn reject(&mut self) {
        self.kind = OutcomeKind::TypeMismatch;
        self.value = None;
    }

    /// The diagnostic for this outcome, or `None` when it bound cleanly
    pub fn error(&self) -> Option<ConfigError> {
        match self.kind {
            OutcomeKind::Ok => None,
            OutcomeKind::Missing => Some(ConfigError::MissingKey {
                key: self.key.clone(),
                kind: self.expected,
                example: self.example.clone(),
            }),
            OutcomeKind::TypeMismatch => Some(ConfigError::TypeMismatch {
                key: self.key.clone(),
                kind: self.expected,
                value: self.raw.clone().unwrap_or_default(),
                example: self.example.clone(),
            }),
        }
    }
}

/// Ordered outcomes of one load call, one per field in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadResult {
    outcomes: Vec<BindingOutcome>,
}

impl LoadResult {
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_ok())
    }

    pub fn is_ok(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BindingOutcome> {
        self.outcomes.iter()
    }

    pub fn outcomes(&self) -> &[BindingOutcome] {
        &self.outcomes
    }

    pub(crate) fn outcomes_mut(&mut self) -> &mut [BindingOutcome] {
        &mut self.outcomes
    }

    pub(crate) fn push(&mut self, outcome: BindingOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcome for the field declared as `field`
    pub fn get(&self, field: &str) -> Option<&BindingOutcome> {
        self.outcomes.iter().find(|o| o.field == field)
    }

    /// Coerced value for `field`, if it bound successfully
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.get(field).and_then(|o| o.value.as_ref())
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    /// One error per non-`Ok` outcome, in declaration order
    pub fn errors(&self) -> Vec<ConfigError> {
        self.outcomes.iter().filter_map(BindingOutcome::error).collect()
    }

    pub fn into_result(self) -> Result<Self, Vec<ConfigError>> {
        if self.has_errors() {
            Err(self.errors())
        } else {
            Ok(self)
        }
    }
}

impl FromIterator<BindingOutcome> for LoadResult {
    fn from_iter<I: IntoIterator<Item = BindingOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LoadResult {
    type Item = BindingOutcome;
    type IntoIter = std::vec::IntoIter<BindingOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a LoadResult {
    type Item = &'a BindingOutcome;
    type IntoIter = std::slice::Iter<'a, BindingOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
