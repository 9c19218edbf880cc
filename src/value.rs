use crate::field::FieldKind;
use std::fmt;

/// A raw configuration string after coercion to its declared kind
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Integer(_) => FieldKind::Integer,
            Self::Boolean(_) => FieldKind::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Conversion from a coerced [`Value`] into a record field type
///
/// `KIND` decides how the raw string is coerced before `from_value` is called.
/// Returning `Err` hands the value back and marks the field as a type mismatch.
pub trait FromValue: Sized {
    const KIND: FieldKind;

    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FromValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(other),
        }
    }
}

macro_rules! impl_from_value_for_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i).map_err(|_| Value::Integer(i)),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_value_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
