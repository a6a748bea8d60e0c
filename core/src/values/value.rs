use core::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use ecow::{EcoString, EcoVec};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::Culture;
use crate::numeric::Number;
use crate::parser::{Literal, format_time_span};

/// A dynamically-typed runtime value.
///
/// Equality between two numeric values compares magnitudes across
/// representations, so `Value::I64(14) == Value::F64(14.0)`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    String(EcoString),
    DateTime(NaiveDateTime),
    TimeSpan(TimeDelta),
    Guid(Uuid),
    List(EcoVec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Char(_) => "Char",
            Value::I8(_) => "SByte",
            Value::U8(_) => "Byte",
            Value::I16(_) => "Int16",
            Value::U16(_) => "UInt16",
            Value::I32(_) => "Int32",
            Value::U32(_) => "UInt32",
            Value::I64(_) => "Int64",
            Value::U64(_) => "UInt64",
            Value::F32(_) => "Single",
            Value::F64(_) => "Double",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::DateTime(_) => "DateTime",
            Value::TimeSpan(_) => "TimeSpan",
            Value::Guid(_) => "Guid",
            Value::List(_) => "List",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        Number::from_value(self).is_some()
    }

    /// Floating point or fixed-point decimal.
    pub fn is_real(&self) -> bool {
        matches!(self, Value::F32(_) | Value::F64(_) | Value::Decimal(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Any numeric representation widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        Number::from_value(self).map(Number::to_f64)
    }

    /// Integer representations that fit in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        Number::from_value(self).and_then(Number::to_i64)
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        Number::from_value(self).and_then(Number::to_decimal)
    }

    /// Text form using `culture`'s decimal separator for numbers.
    pub fn to_text(&self, culture: &Culture) -> String {
        match self {
            Value::F32(_) | Value::F64(_) | Value::Decimal(_) => {
                culture.localize_number(&self.to_string())
            }
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => write!(f, "true"),
            Value::Bool(false) => write!(f, "false"),
            Value::Char(c) => write!(f, "{c}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => format_float(f, f64::from(*v)),
            Value::F64(v) => format_float(f, *v),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            Value::TimeSpan(v) => write!(f, "{}", format_time_span(v)),
            Value::Guid(v) => write!(f, "{v}"),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn format_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(f, "NaN")
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            write!(f, "Infinity")
        } else {
            write!(f, "-Infinity")
        }
    } else {
        write!(f, "{value}")
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (Number::from_value(self), Number::from_value(other)) {
            return Number::compare(a, b) == Some(core::cmp::Ordering::Equal);
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::TimeSpan(a), Value::TimeSpan(b)) => a == b,
            (Value::Guid(a), Value::Guid(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(v) => Value::I64(*v),
            Literal::Decimal(v) => Value::Decimal(*v),
            Literal::Float(v) => Value::F64(*v),
            Literal::Bool(v) => Value::Bool(*v),
            Literal::Str(v) => Value::String(v.clone()),
            Literal::Char(v) => Value::Char(*v),
            Literal::DateTime(v) => Value::DateTime(*v),
            Literal::TimeSpan(v) => Value::TimeSpan(*v),
            Literal::Guid(v) => Value::Guid(*v),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    EcoString => String,
    NaiveDateTime => DateTime,
    TimeDelta => TimeSpan,
    Uuid => Guid,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}
