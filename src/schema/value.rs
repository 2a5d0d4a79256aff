//! Runtime values carried by source objects, row instances and conditions.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TypeTag;

/// A single field value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Null,
    Int64(i64),
    Float64(f64),
    Text(String),
    Int32(i32),
    Bool(bool),
    Decimal(Decimal),
    Date(NaiveDateTime),
    /// Right-hand operand of `IN` / `NOT IN`.
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The report tag of this value. `Null` and `List` have none.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Value::Int64(_) => Some(TypeTag::Int64),
            Value::Float64(_) => Some(TypeTag::Float64),
            Value::Text(_) => Some(TypeTag::Text),
            Value::Int32(_) => Some(TypeTag::Int32),
            Value::Bool(_) => Some(TypeTag::Bool),
            Value::Decimal(_) => Some(TypeTag::Decimal),
            Value::Date(_) => Some(TypeTag::Date),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Short kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::List(_) => "List",
            other => other.tag().map(|t| t.name()).unwrap_or("Unknown"),
        }
    }

    /// Whether this value may be stored in a field of the given tag.
    ///
    /// `Null` is assignable everywhere.
    pub fn is_assignable_to(&self, tag: TypeTag) -> bool {
        self.is_null() || self.tag() == Some(tag)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }
}

/// Default textual form: no quoting, dates as `yyyy-MM-dd HH:mm:ss`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int64(v) => write!(f, "{}", v),
            // whole numbers keep their fractional digit: 3.0, not 3
            Value::Float64(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{}.0", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
