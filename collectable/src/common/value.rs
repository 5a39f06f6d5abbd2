use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// Ordered key/value storage backing the dynamic map collection and nested records.
///
/// Insertion order is iteration order. Keys are [Key]s, values are [Value]s.
pub type ArrayMap = IndexMap<Key, Value>;

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Compare two floats with proper NaN and total ordering.
#[inline]
pub(crate) fn num_cmp_float(a: f64, b: f64) -> Ordering {
    // Handle NaN: treat NaN as greater than all other values
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Parses a string holding a number, allowing surrounding whitespace.
pub(crate) fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    // reject words such as "inf" or "nan" that f64 parsing accepts
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Key of a collection entry.
///
/// A key is either an integer or a string. Building a key from a string that holds a
/// canonical decimal integer (`"12"`, `"-3"`, but not `"012"` or `"+3"`) yields an
/// integer key, so `key!("5")` and `key!(5)` address the same entry.
///
/// Keys are totally ordered: every integer key sorts before every string key, integers
/// compare numerically and strings byte-wise.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer key.
    Int(i64),
    /// String key.
    Str(String),
}

impl Key {
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(v) => Some(*v),
            Key::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(v) => Some(v.as_str()),
        }
    }

    /// An empty string key stands for "no key" when inserting into a dynamic map.
    pub fn is_empty(&self) -> bool {
        matches!(self, Key::Str(v) if v.is_empty())
    }

    fn from_string(value: String) -> Key {
        match canonical_int(&value) {
            Some(int) => Key::Int(int),
            None => Key::Str(value),
        }
    }
}

fn canonical_int(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if value == "-0" {
        return None;
    }
    value.parse::<i64>().ok()
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::Int(_), Key::Str(_)) => Ordering::Less,
            (Key::Str(_), Key::Int(_)) => Ordering::Greater,
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Str(v) => write!(f, "{}", v),
        }
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{}", v),
            Key::Str(v) => write!(f, "{:?}", v),
        }
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                #[inline]
                fn from(value: $t) -> Self {
                    Key::Int(value as i64)
                }
            }
        )*
    };
}

key_from_int!(i8, u8, i16, u16, i32, u32, i64, isize);

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::from_string(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::from_string(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::from_string(value.clone())
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Key::from_string(value.to_string())
    }
}

/// Binary form of a [Key], used by non self-describing formats.
#[derive(Serialize, Deserialize)]
enum KeyRepr {
    Int(i64),
    Str(String),
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            match self {
                Key::Int(v) => serializer.serialize_i64(*v),
                Key::Str(v) => serializer.serialize_str(v),
            }
        } else {
            match self {
                Key::Int(v) => KeyRepr::Int(*v).serialize(serializer),
                Key::Str(v) => KeyRepr::Str(v.clone()).serialize(serializer),
            }
        }
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("an integer or a string key")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
        i64::try_from(v)
            .map(Key::Int)
            .map_err(|_| E::custom(format!("key {} is out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(KeyVisitor)
        } else {
            Ok(match KeyRepr::deserialize(deserializer)? {
                KeyRepr::Int(v) => Key::Int(v),
                KeyRepr::Str(v) => Key::Str(v),
            })
        }
    }
}

/// Represents a collection value. It can be a scalar like [Value::Int], [Value::String]
/// or a nested record / list in [Value::Array].
///
/// # Variants
/// - Null: Absence of a value, also the padding of fixed index collections
/// - Bool(bool): Boolean true/false
/// - Int(i64): Integer value
/// - Float(f64): Floating point value
/// - String(String): Text value
/// - Array(ArrayMap): Ordered key/value record (lists use keys `0..n`)
///
/// # Characteristics
/// - **Strict equality**: values are equal only when the variant and content match
///   (`Int(1) != Float(1.0)`, `NaN == NaN`)
/// - **Totally ordered**: `Null < Bool < numbers < numeric strings < strings < Array`;
///   numbers compare numerically across `Int` and `Float`, numeric strings by value
/// - **Serializable**: lists become JSON arrays, other records JSON objects
///
/// # Usage
/// ```rust
/// use collectable::common::Value;
/// use collectable::{assoc, val};
///
/// let v1: Value = 42.into();
/// let v2 = val!("hello");
/// let record = assoc! { "name" => "Alice", "age" => 30 };
/// assert_eq!(record.column(&"age".into()), Some(&val!(30)));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents an integer value.
    Int(i64),
    /// Represents a floating point value.
    Float(f64),
    /// Represents a string value.
    String(String),
    /// Represents a nested record or list.
    Array(ArrayMap),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => num_eq_float(*a, *b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                // ordered comparison, IndexMap equality ignores order
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = self.rank().cmp(&other.rank());
        if rank != Ordering::Equal {
            return rank;
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => num_cmp_float(*a, *b),
            (Value::Int(a), Value::Float(b)) => {
                num_cmp_float(*a as f64, *b).then(Ordering::Less)
            }
            (Value::Float(a), Value::Int(b)) => {
                num_cmp_float(*a, *b as f64).then(Ordering::Greater)
            }
            (Value::String(a), Value::String(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => num_cmp_float(x, y).then_with(|| a.cmp(b)),
                _ => a.cmp(b),
            },
            (Value::Array(a), Value::Array(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.values().cmp(b.values()))
                .then_with(|| a.keys().cmp(b.keys())),
            _ => Ordering::Equal,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "bool({})", v),
            Value::Int(v) => write!(f, "int({})", v),
            Value::Float(v) => write!(f, "float({})", v),
            Value::String(v) => write!(f, "string({:?})", v),
            Value::Array(v) => {
                write!(f, "array(")?;
                f.debug_map().entries(v.iter()).finish()?;
                write!(f, ")")
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Value {
    /// Creates a new [Value] from the given value that implements [`Into<Value>`].
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Creates a list value (keys `0..n`) from the given values.
    pub fn list<T: Into<Value>>(values: Vec<T>) -> Value {
        Value::Array(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::from(i), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true for values that can be used as keys (integers and strings).
    pub fn is_key_like(&self) -> bool {
        matches!(self, Value::Int(_) | Value::String(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayMap> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayMap> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Converts an integer or string value into a [Key]. Any other value yields `None`.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Value::Int(v) => Some(Key::Int(*v)),
            Value::String(v) => Some(Key::from(v.as_str())),
            _ => None,
        }
    }

    /// Returns the value stored under `column` when this value is a record.
    pub fn column(&self, column: &Key) -> Option<&Value> {
        self.as_array().and_then(|record| record.get(column))
    }

    /// Numeric interpretation of the value: numbers as is, booleans as 0/1,
    /// numeric strings parsed, everything else 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
            Value::String(v) => parse_numeric(v).unwrap_or(0.0),
            Value::Array(v) => {
                if v.is_empty() {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    /// String form of the value used by set algebra and string sorting.
    ///
    /// `Null` and `false` become `""`, `true` becomes `"1"`, numbers use their shortest
    /// decimal form and records their compact JSON form.
    pub fn to_plain_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Array(_) => self.to_json_string(),
        }
    }

    /// Useful for extracting a value from mutable reference while leaving placeholder behind.
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(v) => {
                if parse_numeric(v).is_some() {
                    3
                } else {
                    4
                }
            }
            Value::Array(_) => 5,
        }
    }

    pub(crate) fn to_json_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => {
                if v.is_finite() {
                    v.to_string()
                } else {
                    "null".to_string()
                }
            }
            Value::String(v) => format!("{:?}", v),
            Value::Array(v) => {
                if is_list(v) {
                    let items: Vec<String> = v.values().map(|it| it.to_json_string()).collect();
                    format!("[{}]", items.join(","))
                } else {
                    let items: Vec<String> = v
                        .iter()
                        .map(|(k, it)| format!("{:?}:{}", k.to_string(), it.to_json_string()))
                        .collect();
                    format!("{{{}}}", items.join(","))
                }
            }
        }
    }
}

/// Returns true when the keys of the map are exactly `0..len` in order.
pub(crate) fn is_list(map: &ArrayMap) -> bool {
    map.keys()
        .enumerate()
        .all(|(i, key)| matches!(key, Key::Int(k) if *k == i as i64))
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(value: $t) -> Self {
                    Value::Int(value as i64)
                }
            }
        )*
    };
}

value_from_int!(i8, u8, i16, u16, i32, u32, i64, isize);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Float(value as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        match value {
            Key::Int(v) => Value::Int(v),
            Key::Str(v) => Value::String(v),
        }
    }
}

impl From<&Key> for Value {
    fn from(value: &Key) -> Self {
        Value::from(value.clone())
    }
}

impl From<ArrayMap> for Value {
    fn from(value: ArrayMap) -> Self {
        Value::Array(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::list(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

/// Borrowed binary form of a [Value], used by non self-describing formats.
#[derive(Serialize)]
enum ValueRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(&'a str),
    Array(&'a ArrayMap),
}

/// Owned binary form of a [Value].
#[derive(Deserialize)]
enum ValueRepr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(ArrayMap),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            let repr = match self {
                Value::Null => ValueRef::Null,
                Value::Bool(v) => ValueRef::Bool(*v),
                Value::Int(v) => ValueRef::Int(*v),
                Value::Float(v) => ValueRef::Float(*v),
                Value::String(v) => ValueRef::String(v),
                Value::Array(v) => ValueRef::Array(v),
            };
            return repr.serialize(serializer);
        }

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Array(v) => serialize_array_map(v, serializer),
        }
    }
}

/// Serializes an [ArrayMap]: lists become sequences in human readable formats,
/// everything else a map.
pub(crate) fn serialize_array_map<S: Serializer>(
    array: &ArrayMap,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() && is_list(array) {
        let mut seq = serializer.serialize_seq(Some(array.len()))?;
        for item in array.values() {
            seq.serialize_element(item)?;
        }
        seq.end()
    } else {
        let mut map = serializer.serialize_map(Some(array.len()))?;
        for (key, item) in array {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

/// Reads an [ArrayMap] written by [serialize_array_map].
pub(crate) fn deserialize_array_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ArrayMap, D::Error> {
    if deserializer.is_human_readable() {
        match Value::deserialize(deserializer)? {
            Value::Array(array) => Ok(array),
            Value::Null => Ok(ArrayMap::new()),
            other => Err(de::Error::custom(format!("expected an array, found {:?}", other))),
        }
    } else {
        ArrayMap::deserialize(deserializer)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a collection value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = ArrayMap::with_capacity(seq.size_hint().unwrap_or(0));
        let mut index = 0i64;
        while let Some(item) = seq.next_element::<Value>()? {
            items.insert(Key::Int(index), item);
            index += 1;
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut items = ArrayMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, item)) = map.next_entry::<Key, Value>()? {
            items.insert(key, item);
        }
        Ok(Value::Array(items))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(ValueVisitor)
        } else {
            Ok(match ValueRepr::deserialize(deserializer)? {
                ValueRepr::Null => Value::Null,
                ValueRepr::Bool(v) => Value::Bool(v),
                ValueRepr::Int(v) => Value::Int(v),
                ValueRepr::Float(v) => Value::Float(v),
                ValueRepr::String(v) => Value::String(v),
                ValueRepr::Array(v) => Value::Array(v),
            })
        }
    }
}

/// A macro to create a `Value` from a given expression.
///
/// # Examples
///
/// ```rust
/// use collectable::common::Value;
/// use collectable::val;
///
/// assert_eq!(val!(42), Value::Int(42));
/// assert_eq!(val!("hello"), Value::String("hello".to_string()));
/// assert_eq!(val!(true), Value::Bool(true));
/// ```
#[macro_export]
macro_rules! val {
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

/// A macro to create a `Key` from a given expression.
#[macro_export]
macro_rules! key {
    ($value:expr) => {
        $crate::common::Key::from($value)
    };
}

/// Builds an [ArrayMap] list (keys `0..n`) from the given values.
///
/// ```rust
/// use collectable::{arr, key, val};
///
/// let items = arr![1, "two", 3.0];
/// assert_eq!(items.get(&key!(1)), Some(&val!("two")));
/// ```
#[macro_export]
macro_rules! arr {
    () => {
        $crate::common::ArrayMap::new()
    };
    ($($value:expr),+ $(,)?) => {
        {
            let mut items = $crate::common::ArrayMap::new();
            $(
                let index = items.len() as i64;
                items.insert($crate::common::Key::Int(index), $crate::common::Value::from($value));
            )+
            items
        }
    };
}

/// Builds a record [Value] from `key => value` pairs.
///
/// ```rust
/// use collectable::{assoc, key, val};
///
/// let record = assoc! { "id" => 1, "name" => "Ada" };
/// assert_eq!(record.column(&key!("name")), Some(&val!("Ada")));
/// ```
#[macro_export]
macro_rules! assoc {
    () => {
        $crate::common::Value::Array($crate::common::ArrayMap::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::common::Value::Array($crate::assoc_map! { $($key => $value),+ })
    };
}

/// Builds an [ArrayMap] from `key => value` pairs.
///
/// ```rust
/// use collectable::{assoc_map, key, val};
///
/// let map = assoc_map! { "a" => 1, 5 => "five" };
/// assert_eq!(map.get(&key!(5)), Some(&val!("five")));
/// ```
#[macro_export]
macro_rules! assoc_map {
    () => {
        $crate::common::ArrayMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut items = $crate::common::ArrayMap::new();
            $(
                items.insert($crate::common::Key::from($key), $crate::common::Value::from($value));
            )+
            items
        }
    };
}
