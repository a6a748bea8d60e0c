//! The numeric representations a [`Value`] can carry, and promotion between them.

use core::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::values::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
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
}

/// Promotion rank, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Narrow,
    I64,
    U64,
    F32,
    F64,
    Decimal,
}

impl Number {
    /// The numeric payload of `value`, if it has one.
    pub fn from_value(value: &Value) -> Option<Number> {
        Some(match *value {
            Value::I8(v) => Number::I8(v),
            Value::U8(v) => Number::U8(v),
            Value::I16(v) => Number::I16(v),
            Value::U16(v) => Number::U16(v),
            Value::I32(v) => Number::I32(v),
            Value::U32(v) => Number::U32(v),
            Value::I64(v) => Number::I64(v),
            Value::U64(v) => Number::U64(v),
            Value::F32(v) => Number::F32(v),
            Value::F64(v) => Number::F64(v),
            Value::Decimal(v) => Number::Decimal(v),
            _ => return None,
        })
    }

    pub fn into_value(self) -> Value {
        match self {
            Number::I8(v) => Value::I8(v),
            Number::U8(v) => Value::U8(v),
            Number::I16(v) => Value::I16(v),
            Number::U16(v) => Value::U16(v),
            Number::I32(v) => Value::I32(v),
            Number::U32(v) => Value::U32(v),
            Number::I64(v) => Value::I64(v),
            Number::U64(v) => Value::U64(v),
            Number::F32(v) => Value::F32(v),
            Number::F64(v) => Value::F64(v),
            Number::Decimal(v) => Value::Decimal(v),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.into_value().type_name()
    }

    pub fn rank(&self) -> Rank {
        match self {
            Number::I64(_) => Rank::I64,
            Number::U64(_) => Rank::U64,
            Number::F32(_) => Rank::F32,
            Number::F64(_) => Rank::F64,
            Number::Decimal(_) => Rank::Decimal,
            _ => Rank::Narrow,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Number::F32(_) | Number::F64(_) | Number::Decimal(_))
    }

    fn is_signed(&self) -> bool {
        matches!(
            self,
            Number::I8(_) | Number::I16(_) | Number::I32(_) | Number::I64(_)
        )
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Number::F32(v) => v == 0.0,
            Number::F64(v) => v == 0.0,
            Number::Decimal(v) => v.is_zero(),
            other => other.to_i128() == Some(0),
        }
    }

    /// Exact integer value for the integer representations.
    pub fn to_i128(self) -> Option<i128> {
        Some(match self {
            Number::I8(v) => v.into(),
            Number::U8(v) => v.into(),
            Number::I16(v) => v.into(),
            Number::U16(v) => v.into(),
            Number::I32(v) => v.into(),
            Number::U32(v) => v.into(),
            Number::I64(v) => v.into(),
            Number::U64(v) => v.into(),
            Number::F32(_) | Number::F64(_) | Number::Decimal(_) => return None,
        })
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::F32(v) => v.into(),
            Number::F64(v) => v,
            Number::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
            other => other.to_i128().map(|v| v as f64).unwrap_or(f64::NAN),
        }
    }

    /// Exact conversion; `None` for NaN, infinities and out-of-range floats.
    pub fn to_decimal(self) -> Option<Decimal> {
        match self {
            Number::Decimal(v) => Some(v),
            Number::F32(v) => Decimal::from_f32(v),
            Number::F64(v) => Decimal::from_f64(v),
            other => other.to_i128().and_then(Decimal::from_i128),
        }
    }

    pub fn to_i64(self) -> Option<i64> {
        match self {
            Number::F32(_) | Number::F64(_) | Number::Decimal(_) => None,
            other => other.to_i128().and_then(|v| i64::try_from(v).ok()),
        }
    }

    pub fn to_u64(self) -> Option<u64> {
        match self {
            Number::F32(_) | Number::F64(_) | Number::Decimal(_) => None,
            other => other.to_i128().and_then(|v| u64::try_from(v).ok()),
        }
    }

    /// Brings both operands to the representation of the higher-ranked one.
    ///
    /// Narrow integers meet at signed 64-bit when either side is signed and at
    /// unsigned 64-bit otherwise. `None` when a value does not fit the target,
    /// such as a negative integer promoted to unsigned 64-bit.
    pub fn promote(a: Number, b: Number) -> Option<(Number, Number)> {
        if core::mem::discriminant(&a) == core::mem::discriminant(&b) {
            return Some((a, b));
        }
        let target = match a.rank().max(b.rank()) {
            Rank::Narrow if a.is_signed() || b.is_signed() => Rank::I64,
            Rank::Narrow => Rank::U64,
            rank => rank,
        };
        Some((a.convert(target)?, b.convert(target)?))
    }

    fn convert(self, target: Rank) -> Option<Number> {
        Some(match target {
            Rank::Decimal => Number::Decimal(self.to_decimal()?),
            Rank::F64 => Number::F64(self.to_f64()),
            Rank::F32 => Number::F32(match self {
                Number::F32(v) => v,
                other => other.to_f64() as f32,
            }),
            Rank::U64 => Number::U64(self.to_u64()?),
            Rank::I64 | Rank::Narrow => Number::I64(self.to_i64()?),
        })
    }

    /// Orders two numbers after promotion. `None` when promotion fails or a
    /// NaN is involved.
    pub fn compare(a: Number, b: Number) -> Option<Ordering> {
        match Number::promote(a, b)? {
            (Number::Decimal(x), Number::Decimal(y)) => Some(x.cmp(&y)),
            (Number::F64(x), Number::F64(y)) => x.partial_cmp(&y),
            (Number::F32(x), Number::F32(y)) => x.partial_cmp(&y),
            (x, y) => Some(x.to_i128()?.cmp(&y.to_i128()?)),
        }
    }
}
