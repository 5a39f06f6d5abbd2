use crate::common::{ArrayMap, Key, Value};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::primitives::arr::list;

/// Bound or step of a [ValueRange].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBound {
    Int(i64),
    Float(f64),
    Char(char),
}

impl RangeBound {
    fn as_f64(&self) -> Option<f64> {
        match self {
            RangeBound::Int(v) => Some(*v as f64),
            RangeBound::Float(v) => Some(*v),
            RangeBound::Char(_) => None,
        }
    }
}

macro_rules! bound_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RangeBound {
                #[inline]
                fn from(value: $t) -> Self {
                    RangeBound::Int(value as i64)
                }
            }
        )*
    };
}

bound_from_int!(i8, u8, i16, u16, i32, u32, i64);

impl From<f32> for RangeBound {
    fn from(value: f32) -> Self {
        RangeBound::Float(value as f64)
    }
}

impl From<f64> for RangeBound {
    fn from(value: f64) -> Self {
        RangeBound::Float(value)
    }
}

impl From<char> for RangeBound {
    fn from(value: char) -> Self {
        RangeBound::Char(value)
    }
}

/// A validated, inclusive arithmetic progression of numbers or characters.
///
/// The progression is only described, never stored: [ValueRange::values] produces the
/// elements on demand, so a range can back a lazy collection.
///
/// ```rust
/// use collectable::primitives::ValueRange;
/// use collectable::common::Value;
///
/// let range = ValueRange::new(1, 5, 2).unwrap();
/// let values: Vec<Value> = range.values().collect();
/// assert_eq!(values, vec![Value::Int(1), Value::Int(3), Value::Int(5)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    kind: RangeKind,
    len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RangeKind {
    Int { start: i64, end: i64, step: u64 },
    Float { start: f64, step: f64 },
    Char { start: u32, end: u32, step: u32 },
}

fn invalid_range(message: &str) -> CollectionError {
    log::error!("{}", message);
    CollectionError::new(message, ErrorKind::InvalidRange)
}

fn too_many_elements(steps: impl std::fmt::Display) -> CollectionError {
    log::error!("Range of {} steps has too many elements", steps);
    CollectionError::new(
        &format!("Range of {} steps has too many elements", steps),
        ErrorKind::CapacityExceeded,
    )
}

// Element count of an inclusive progression, `steps + 1`.
fn element_count(steps: u128) -> CollectionResult<usize> {
    usize::try_from(steps)
        .ok()
        .and_then(|steps| steps.checked_add(1))
        .ok_or_else(|| too_many_elements(steps))
}

impl ValueRange {
    /// Validates the bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if `start > end`, if a numeric `step` is greater than
    /// `end`, if `step <= 0`, or if characters and numbers are mixed.
    /// Returns `CapacityExceeded` if the number of elements does not fit in a `usize`.
    pub fn new(
        start: impl Into<RangeBound>,
        end: impl Into<RangeBound>,
        step: impl Into<RangeBound>,
    ) -> CollectionResult<ValueRange> {
        let (start, end, step) = (start.into(), end.into(), step.into());

        let step_value = step
            .as_f64()
            .ok_or_else(|| invalid_range("Range step has to be a number"))?;
        if step_value.is_nan() || step_value <= 0.0 {
            return Err(invalid_range(&format!(
                "Range step {} has to be greater than zero",
                step_value
            )));
        }

        let (kind, len) = match (start, end) {
            (RangeBound::Char(s), RangeBound::Char(e)) => {
                if s > e {
                    return Err(invalid_range(&format!(
                        "Your start {} is bigger then the end of range {}",
                        s, e
                    )));
                }
                let step = (step_value.floor() as u32).max(1);
                let (start, end) = (s as u32, e as u32);
                let len = element_count(((end - start) / step) as u128)?;
                (RangeKind::Char { start, end, step }, len)
            }
            (RangeBound::Char(_), _) | (_, RangeBound::Char(_)) => {
                return Err(invalid_range(
                    "Range bounds have to be both characters or both numbers",
                ));
            }
            (RangeBound::Int(s), RangeBound::Int(e)) if matches!(step, RangeBound::Int(_)) => {
                Self::check_numeric(s as f64, e as f64, step_value)?;
                let step = step_value as u64;
                let span = (e as i128 - s as i128) as u128;
                let len = element_count(span / step as u128)?;
                (RangeKind::Int { start: s, end: e, step }, len)
            }
            (s, e) => {
                let s = s.as_f64().unwrap_or_default();
                let e = e.as_f64().unwrap_or_default();
                Self::check_numeric(s, e, step_value)?;
                let steps = ((e - s) / step_value + 1e-9).floor();
                // `usize::MAX as f64` rounds up to 2^64, so equality is already too large
                if !steps.is_finite() || steps >= usize::MAX as f64 {
                    return Err(too_many_elements(steps));
                }
                let len = element_count(steps as u128)?;
                (RangeKind::Float { start: s, step: step_value }, len)
            }
        };
        Ok(ValueRange { kind, len })
    }

    fn check_numeric(start: f64, end: f64, step: f64) -> CollectionResult<()> {
        if start > end {
            return Err(invalid_range(&format!(
                "Your start {} is bigger then the end of range {}",
                start, end
            )));
        }
        if step > end {
            return Err(invalid_range(&format!(
                "Your step {} is bigger then the end of range {}",
                step, end
            )));
        }
        Ok(())
    }

    /// Number of elements in the range.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produces the elements in order.
    pub fn values(&self) -> Box<dyn Iterator<Item = Value>> {
        match self.kind {
            RangeKind::Int { start, end, step } => Box::new(
                (start..=end)
                    .step_by(usize::try_from(step).unwrap_or(usize::MAX))
                    .map(Value::Int),
            ),
            RangeKind::Float { start, step } => {
                Box::new((0..self.len).map(move |i| Value::Float(start + step * i as f64)))
            }
            RangeKind::Char { start, end, step } => Box::new(
                (start..=end)
                    .step_by(step as usize)
                    .filter_map(char::from_u32)
                    .map(Value::from),
            ),
        }
    }
}

/// Builds the list of elements from `start` to `end` inclusive.
///
/// # Errors
///
/// See [ValueRange::new].
pub fn range(
    start: impl Into<RangeBound>,
    end: impl Into<RangeBound>,
    step: impl Into<RangeBound>,
) -> CollectionResult<ArrayMap> {
    Ok(list(ValueRange::new(start, end, step)?.values()))
}

/// Builds `length` copies of `value` under consecutive integer keys from `start_index`.
///
/// # Errors
///
/// Returns `CapacityExceeded` if the keys would overflow.
pub fn fill(start_index: i64, length: usize, value: &Value) -> CollectionResult<ArrayMap> {
    let mut items = ArrayMap::with_capacity(length);
    for offset in 0..length {
        let key = i64::try_from(offset)
            .ok()
            .and_then(|offset| start_index.checked_add(offset))
            .ok_or_else(|| {
                log::error!("Cannot fill {} items from index {}", length, start_index);
                CollectionError::new(
                    &format!("Cannot fill {} items from index {}", length, start_index),
                    ErrorKind::CapacityExceeded,
                )
            })?;
        items.insert(Key::Int(key), value.clone());
    }
    Ok(items)
}

/// Uses the values of `keys` as keys, each holding a copy of `value`.
///
/// # Errors
///
/// Returns `InvalidKeyType` if a value of `keys` is neither an integer nor a string.
pub fn fill_keys(keys: &ArrayMap, value: &Value) -> CollectionResult<ArrayMap> {
    let mut items = ArrayMap::with_capacity(keys.len());
    for candidate in keys.values() {
        let key = candidate.as_key().ok_or_else(|| {
            log::error!("Cannot use {:?} as key, keys have to be integers or strings", candidate);
            CollectionError::new(
                "Keys have to be integers or strings",
                ErrorKind::InvalidKeyType,
            )
        })?;
        items.insert(key, value.clone());
    }
    Ok(items)
}
