use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::common::value::num_cmp_float;
use crate::common::Value;
use crate::errors::{CollectionError, ErrorKind};

/// Relational operator used by the `where` family of filters.
///
/// Numbers compare numerically across `Int` and `Float`, so `Equal` matches `30`
/// against `30.0`. Every other pair uses the total order of [Value].
///
/// `ThreeWay` is the spaceship operator: it holds whenever the operands differ.
///
/// ```rust
/// use collectable::common::{Comparison, Value};
///
/// assert!(Comparison::Greater.compare(&Value::Int(3), &Value::Float(2.5)));
/// assert!(Comparison::Equal.compare(&Value::Int(30), &Value::Float(30.0)));
/// assert!(!Comparison::ThreeWay.compare(&Value::Int(1), &Value::Int(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    ThreeWay,
}

impl Comparison {
    /// Evaluates `left <op> right`.
    pub fn compare(&self, left: &Value, right: &Value) -> bool {
        let ordering = Comparison::ordering(left, right);
        match self {
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::NotEqual => ordering != Ordering::Equal,
            Comparison::Greater => ordering == Ordering::Greater,
            Comparison::GreaterOrEqual => ordering != Ordering::Less,
            Comparison::Less => ordering == Ordering::Less,
            Comparison::LessOrEqual => ordering != Ordering::Greater,
            Comparison::ThreeWay => ordering != Ordering::Equal,
        }
    }

    /// Three-way comparison of two values as seen by the operators.
    pub fn ordering(left: &Value, right: &Value) -> Ordering {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                num_cmp_float(left.to_number(), right.to_number())
            }
            _ => left.cmp(right),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::ThreeWay => "<=>",
        }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Comparison {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" | "=" => Ok(Comparison::Equal),
            "!=" | "<>" => Ok(Comparison::NotEqual),
            ">" => Ok(Comparison::Greater),
            ">=" => Ok(Comparison::GreaterOrEqual),
            "<" => Ok(Comparison::Less),
            "<=" => Ok(Comparison::LessOrEqual),
            "<=>" => Ok(Comparison::ThreeWay),
            other => {
                log::error!("Unknown comparison operator {}", other);
                Err(CollectionError::new(
                    &format!("Unknown comparison operator {}", other),
                    ErrorKind::InvalidArgument,
                ))
            }
        }
    }
}
