//! Filter conditions.
//!
//! Constructors validate their inputs and return `None` ("no condition")
//! instead of an error when a required part is missing. A right-hand
//! [`Value::Null`] counts as missing. Absent conditions are skipped when
//! conditions are combined.

use crate::schema::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    IsNull,
    IsNotNull,
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    In,
    NotIn,
}

impl Operator {
    /// Fixed textual token, including its surrounding spaces.
    pub fn token(&self) -> &'static str {
        match self {
            Operator::IsNull => " IS NULL ",
            Operator::IsNotNull => " IS NOT NULL ",
            Operator::Eq => " = ",
            Operator::NotEq => " <> ",
            Operator::Gt => " > ",
            Operator::Gte => " >= ",
            Operator::Lt => " < ",
            Operator::Lte => " <= ",
            Operator::Like => " LIKE ",
            Operator::NotLike => " NOT LIKE ",
            Operator::In => " IN ",
            Operator::NotIn => " NOT IN ",
        }
    }

    /// Nullary operators take no right-hand value.
    pub fn is_nullary(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

/// Where the wildcard goes in a LIKE pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeDirection {
    /// `%value`
    Left,
    /// `value%`
    Right,
    /// `%value%`
    Center,
}

impl LikeDirection {
    /// Wildcard marker used in LIKE patterns.
    pub const WILDCARD: &'static str = "%";

    /// Wrap a value with the wildcard on the configured side(s).
    pub fn wrap(&self, value: &Value) -> Value {
        let w = Self::WILDCARD;
        let pattern = match self {
            LikeDirection::Left => format!("{}{}", w, value),
            LikeDirection::Right => format!("{}{}", value, w),
            LikeDirection::Center => format!("{}{}{}", w, value, w),
        };
        Value::Text(pattern)
    }
}

/// A single filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Operator,
    right_value: Option<Value>,
}

impl Condition {
    fn nullary(operator: Operator, column: Option<&str>) -> Option<Self> {
        column.map(|column| Self {
            column: column.to_string(),
            operator,
            right_value: None,
        })
    }

    fn binary(operator: Operator, column: Option<&str>, right_value: Option<Value>) -> Option<Self> {
        match (column, present(right_value)) {
            (Some(column), Some(value)) => Some(Self {
                column: column.to_string(),
                operator,
                right_value: Some(value),
            }),
            _ => None,
        }
    }

    pub fn is_null(column: Option<&str>) -> Option<Self> {
        Self::nullary(Operator::IsNull, column)
    }

    pub fn is_not_null(column: Option<&str>) -> Option<Self> {
        Self::nullary(Operator::IsNotNull, column)
    }

    pub fn equals_to(column: Option<&str>, right_value: Option<Value>) -> Option<Self> {
        Self::binary(Operator::Eq, column, right_value)
    }

    pub fn not_equals_to(column: Option<&str>, right_value: Option<Value>) -> Option<Self> {
        Self::binary(Operator::NotEq, column, right_value)
    }

    /// `>` or, when `inclusive`, `>=`.
    pub fn greater_than(
        inclusive: bool,
        column: Option<&str>,
        right_value: Option<Value>,
    ) -> Option<Self> {
        let op = if inclusive { Operator::Gte } else { Operator::Gt };
        Self::binary(op, column, right_value)
    }

    /// `<` or, when `inclusive`, `<=`.
    pub fn less_than(
        inclusive: bool,
        column: Option<&str>,
        right_value: Option<Value>,
    ) -> Option<Self> {
        let op = if inclusive { Operator::Lte } else { Operator::Lt };
        Self::binary(op, column, right_value)
    }

    pub fn like(
        direction: LikeDirection,
        column: Option<&str>,
        right_value: Option<Value>,
    ) -> Option<Self> {
        Self::binary(
            Operator::Like,
            column,
            present(right_value).map(|v| direction.wrap(&v)),
        )
    }

    pub fn not_like(
        direction: LikeDirection,
        column: Option<&str>,
        right_value: Option<Value>,
    ) -> Option<Self> {
        Self::binary(
            Operator::NotLike,
            column,
            present(right_value).map(|v| direction.wrap(&v)),
        )
    }

    pub fn in_list(column: Option<&str>, right_value: Option<Value>) -> Option<Self> {
        Self::binary(Operator::In, column, right_value)
    }

    pub fn not_in_list(column: Option<&str>, right_value: Option<Value>) -> Option<Self> {
        Self::binary(Operator::NotIn, column, right_value)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn right_value(&self) -> Option<&Value> {
        self.right_value.as_ref()
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}
