// Record values and the capabilities rules dispatch on

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Values within this distance of zero count as zero for presence checks.
pub const ZERO_EPSILON: f64 = 1e-6;

/// A single field value, as decoded from a request body.
///
/// Integers of every width collapse into [`Value::Int`] or [`Value::UInt`]
/// depending on signedness, and both float widths into [`Value::Float`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Ordered sequence
    List(Vec<Value>),
    /// Unordered collection without duplicates
    Set(ValueSet),
    /// String-keyed mapping
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// View this value as a comparable scalar, if it is one.
    ///
    /// Strings become [`Scalar::Text`] carrying their character count, so
    /// bound checks never see byte lengths.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Int(v) => Some(Scalar::Signed(*v)),
            Value::UInt(v) => Some(Scalar::Unsigned(*v)),
            Value::Float(v) => Some(Scalar::Float(*v)),
            Value::Str(s) => Some(Scalar::Text(s.chars().count())),
            _ => None,
        }
    }

    /// View this value as a container with an item count, if it is one.
    pub fn as_lengthable(&self) -> Option<&dyn Lengthable> {
        match self {
            Value::List(items) => Some(items),
            Value::Set(items) => Some(items),
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short shape name, used in log lines and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }
}

/// Comparable view over numeric and string values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    /// Number of Unicode scalar values in a string
    Text(usize),
}

impl Scalar {
    /// Whether this is the zero or empty representative of its type.
    pub fn is_zero(&self) -> bool {
        match *self {
            Scalar::Signed(v) => v == 0,
            Scalar::Unsigned(v) => v == 0,
            Scalar::Float(v) => v.abs() < ZERO_EPSILON,
            Scalar::Text(len) => len == 0,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Scalar::Text(_))
    }

    /// Compare against an integer limit without losing precision.
    ///
    /// Returns `None` only for NaN.
    pub fn compare_to(&self, limit: i64) -> Option<Ordering> {
        match *self {
            Scalar::Signed(v) => Some(v.cmp(&limit)),
            Scalar::Unsigned(v) => Some(i128::from(v).cmp(&i128::from(limit))),
            Scalar::Float(v) => v.partial_cmp(&(limit as f64)),
            Scalar::Text(len) => Some((len as i128).cmp(&i128::from(limit))),
        }
    }
}

/// Containers that can report how many items they hold.
pub trait Lengthable {
    fn item_count(&self) -> usize;
}

impl Lengthable for Vec<Value> {
    fn item_count(&self) -> usize {
        self.len()
    }
}

impl Lengthable for ValueSet {
    fn item_count(&self) -> usize {
        self.len()
    }
}

impl Lengthable for BTreeMap<String, Value> {
    fn item_count(&self) -> usize {
        self.len()
    }
}

/// Set of values.
///
/// Values may hold floats, so membership is decided by equality rather than
/// hashing.
#[derive(Debug, Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `false` if an equal one was already present.
    pub fn insert(&mut self, value: impl Into<Value>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|item| item == value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<V: Into<Value>> FromIterator<V> for ValueSet {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::UInt(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::Set(set)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(entries: BTreeMap<String, V>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
    fn from(entries: HashMap<String, V>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Field name to value mapping handed to the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
