use core::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

/// A runtime value produced during evaluation or bound in an environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    Integer(i64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Array(Array),
}

/// Homogeneous array of scalars. Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Double(Arc<[f64]>),
    Integer(Arc<[i64]>),
    Boolean(Arc<[bool]>),
}

/// Runtime type of a [`Value`], used in error messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Double,
    Integer,
    Boolean,
    Timestamp,
    Array(ElementType),
}

/// Element type of an [`Array`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    Double,
    Integer,
    Boolean,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Double(_) => ValueType::Double,
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::Array(array) => ValueType::Array(array.element_type()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of Double and Integer values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Integer when `value` is integral and fits in an `i64`, Double otherwise.
    pub fn integral_or_double(value: f64) -> Value {
        // 2^63 is exactly representable; i64::MAX is not.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
            Value::Integer(value as i64)
        } else {
            Value::Double(value)
        }
    }
}

impl Array {
    pub fn element_type(&self) -> ElementType {
        match self {
            Array::Double(_) => ElementType::Double,
            Array::Integer(_) => ElementType::Integer,
            Array::Boolean(_) => ElementType::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Array::Double(items) => items.len(),
            Array::Integer(items) => items.len(),
            Array::Boolean(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` when negative or past the end.
    pub fn get(&self, index: i64) -> Option<Value> {
        let index = usize::try_from(index).ok()?;
        match self {
            Array::Double(items) => items.get(index).copied().map(Value::Double),
            Array::Integer(items) => items.get(index).copied().map(Value::Integer),
            Array::Boolean(items) => items.get(index).copied().map(Value::Boolean),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Array(Array::Double(v.into()))
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::Array(Array::Integer(v.into()))
    }
}

impl From<Vec<bool>> for Value {
    fn from(v: Vec<bool>) -> Self {
        Value::Array(Array::Boolean(v.into()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Double(v) => format_float(f, *v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Array(array) => write!(f, "{}", array),
        }
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        match self {
            Array::Double(items) => write_items(f, items.iter().map(|v| Value::Double(*v))),
            Array::Integer(items) => write_items(f, items.iter().map(|v| Value::Integer(*v))),
            Array::Boolean(items) => write_items(f, items.iter().map(|v| Value::Boolean(*v))),
        }?;
        write!(f, "]")
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = Value>) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Double => write!(f, "Double"),
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Boolean => write!(f, "Boolean"),
            ValueType::Timestamp => write!(f, "Timestamp"),
            ValueType::Array(element) => write!(f, "Array[{}]", element),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Double => write!(f, "Double"),
            ElementType::Integer => write!(f, "Integer"),
            ElementType::Boolean => write!(f, "Boolean"),
        }
    }
}

/// Format a float ensuring it always has a decimal point
fn format_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(f, "nan")
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            write!(f, "inf")
        } else {
            write!(f, "-inf")
        }
    } else {
        let s = value.to_string();
        if s.contains('.') || s.contains('e') || s.contains('E') {
            write!(f, "{}", s)
        } else {
            write!(f, "{}.", s)
        }
    }
}
