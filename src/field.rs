use crate::value::Value;
use std::{borrow::Cow, fmt, str::FromStr};
use thiserror::Error;

/// The primitive kind a configuration field is declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

impl FieldKind {
    /// Coerce a raw source string into a value of this kind
    ///
    /// Strings are taken verbatim. Integers are parsed as base-10 `i64`, so an
    /// empty string, trailing garbage or overflow is rejected. Booleans accept
    /// exactly `true` and `false`; `1`, `yes` and friends are rejected.
    pub fn coerce(self, raw: &str) -> Option<Value> {
        match self {
            Self::String => Some(Value::String(raw.to_string())),
            Self::Integer => raw.parse::<i64>().ok().map(Value::Integer),
            Self::Boolean => match raw {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a field kind or descriptor cannot be parsed from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFieldError {
    #[error("unknown field kind '{0}', expected one of: string, integer, boolean")]
    UnknownKind(String),
    #[error("field '{0}' must be written as name:kind[=example]")]
    MissingKind(String),
    #[error("field name must not be empty")]
    EmptyName,
}

impl FromStr for FieldKind {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "str" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(ParseFieldError::UnknownKind(s.to_string())),
        }
    }
}

/// Static metadata describing one configuration field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    kind: FieldKind,
    example: Option<Cow<'static, str>>,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind,
            example: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Build a descriptor from owned parts, e.g. when the shape comes from user input
    pub fn owned(name: impl Into<String>, kind: FieldKind, example: Option<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            kind,
            example: example.map(Cow::Owned),
        }
    }

    /// Attach a human-readable example shown in diagnostics and docs
    pub fn with_example(mut self, example: impl Into<Cow<'static, str>>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// The lookup key: the field name uppercased with ASCII semantics
    pub fn key(&self) -> String {
        self.name.to_ascii_uppercase()
    }
}

// name:kind[=example]
impl FromStr for FieldDescriptor {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s
            .split_once(':')
            .ok_or_else(|| ParseFieldError::MissingKind(s.to_string()))?;
        if name.is_empty() {
            return Err(ParseFieldError::EmptyName);
        }

        let (kind, example) = match rest.split_once('=') {
            Some((kind, example)) => (kind, Some(example.to_string())),
            None => (rest, None),
        };

        Ok(Self::owned(name, kind.parse()?, example))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_string_is_verbatim() {
        assert_eq!(
            FieldKind::String.coerce("  thepark "),
            Some(Value::String("  thepark ".to_string()))
        );
        assert_eq!(
            FieldKind::String.coerce(""),
            Some(Value::String(String::new()))
        );
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(FieldKind::Integer.coerce("4242"), Some(Value::Integer(4242)));
        assert_eq!(FieldKind::Integer.coerce("-17"), Some(Value::Integer(-17)));
        assert_eq!(FieldKind::Integer.coerce(""), None);
        assert_eq!(FieldKind::Integer.coerce("notanumber"), None);
        assert_eq!(FieldKind::Integer.coerce("42abc"), None);
        assert_eq!(FieldKind::Integer.coerce("4.2"), None);
        assert_eq!(FieldKind::Integer.coerce("99999999999999999999"), None);
    }

    #[test]
    fn test_coerce_boolean_is_strict() {
        assert_eq!(FieldKind::Boolean.coerce("true"), Some(Value::Boolean(true)));
        assert_eq!(
            FieldKind::Boolean.coerce("false"),
            Some(Value::Boolean(false))
        );
        for raw in ["1", "0", "yes", "no", "TRUE", "False", "t", ""] {
            assert_eq!(FieldKind::Boolean.coerce(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn test_kind_display_and_parse() {
        assert_eq!(FieldKind::Integer.to_string(), "integer");
        assert_eq!("bool".parse::<FieldKind>(), Ok(FieldKind::Boolean));
        assert_eq!("string".parse::<FieldKind>(), Ok(FieldKind::String));
        assert_eq!(
            "float".parse::<FieldKind>(),
            Err(ParseFieldError::UnknownKind("float".to_string()))
        );
    }

    #[test]
    fn test_key_is_ascii_uppercase() {
        assert_eq!(FieldDescriptor::string("Host").key(), "HOST");
        assert_eq!(FieldDescriptor::string("db_url").key(), "DB_URL");
        assert_eq!(FieldDescriptor::string("straße").key(), "STRAßE");
    }

    #[test]
    fn test_descriptor_with_example() {
        let field = FieldDescriptor::integer("port").with_example("9000");

        assert_eq!(field.name(), "port");
        assert_eq!(field.kind(), FieldKind::Integer);
        assert_eq!(field.example(), Some("9000"));
    }

    #[test]
    fn test_descriptor_without_example() {
        let field = FieldDescriptor::boolean("debug");
        assert_eq!(field.example(), None);
    }

    #[test]
    fn test_parse_descriptor() {
        let field: FieldDescriptor = "port:int=9000".parse().unwrap();
        assert_eq!(field, FieldDescriptor::integer("port").with_example("9000"));

        let field: FieldDescriptor = "host:string".parse().unwrap();
        assert_eq!(field, FieldDescriptor::string("host"));

        let field: FieldDescriptor = "url:string=a=b".parse().unwrap();
        assert_eq!(field.example(), Some("a=b"));
    }

    #[test]
    fn test_parse_descriptor_errors() {
        assert_eq!(
            "port".parse::<FieldDescriptor>(),
            Err(ParseFieldError::MissingKind("port".to_string()))
        );
        assert_eq!(
            ":int".parse::<FieldDescriptor>(),
            Err(ParseFieldError::EmptyName)
        );
        assert!("port:float".parse::<FieldDescriptor>().is_err());
    }
}
