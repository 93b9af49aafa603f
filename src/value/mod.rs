// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

mod date;
mod datetime;
mod decimal;
mod ordered_float;
mod rational;
mod r#type;
mod varint;

use std::fmt::{self, Display, Formatter};

use half::f16;
use serde::{Deserialize, Serialize};

pub use date::{DAY_MILLIS, Date, EPOCH_START_DAYS, EPOCH_START_MILLIS};
pub use datetime::DateTime;
pub use decimal::Decimal;
pub use ordered_float::{OrderedF16, OrderedF32, OrderedF64};
pub use rational::Rational;
pub use r#type::Type;
pub use varint::{VarInt, VarUint};

/// A single value carried by a relation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
	/// The absence of a value
	Undefined,
	/// A boolean
	Boolean(bool),
	/// A 16-bit float
	Float2(OrderedF16),
	/// A 32-bit float
	Float4(OrderedF32),
	/// A 64-bit float
	Float8(OrderedF64),
	/// An 8-bit signed integer
	Int1(i8),
	/// A 16-bit signed integer
	Int2(i16),
	/// A 32-bit signed integer
	Int4(i32),
	/// A 64-bit signed integer
	Int8(i64),
	/// An 8-bit unsigned integer
	Uint1(u8),
	/// A 16-bit unsigned integer
	Uint2(u16),
	/// A 32-bit unsigned integer
	Uint4(u32),
	/// A 64-bit unsigned integer
	Uint8(u64),
	/// A UTF-8 encoded string
	Utf8(String),
	/// A single Unicode character
	Char(char),
	/// An interned name, rendered with a leading colon
	Symbol(String),
	/// A calendar date
	Date(Date),
	/// A calendar timestamp
	DateTime(DateTime),
	/// An arbitrary-precision scaled decimal
	Decimal(Decimal),
	/// An exact rational
	Rational(Rational),
	/// An arbitrary-precision signed integer
	VarInt(VarInt),
	/// An arbitrary-precision unsigned integer
	VarUint(VarUint),
	/// The missing marker
	Missing,
	/// An ordered group of values
	Tuple(Vec<Value>),
}

impl Value {
	pub fn float2(v: f16) -> Self {
		Value::Float2(OrderedF16::from(v))
	}

	pub fn float4(v: f32) -> Self {
		Value::Float4(OrderedF32::from(v))
	}

	pub fn float8(v: f64) -> Self {
		Value::Float8(OrderedF64::from(v))
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn symbol(v: impl Into<String>) -> Self {
		Value::Symbol(v.into())
	}

	/// The element type this value belongs to.
	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Bool,
			Value::Float2(_) => Type::Float2,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Uint1(_) => Type::Uint1,
			Value::Uint2(_) => Type::Uint2,
			Value::Uint4(_) => Type::Uint4,
			Value::Uint8(_) => Type::Uint8,
			Value::Utf8(_) => Type::Utf8,
			Value::Char(_) => Type::Char,
			Value::Symbol(_) => Type::Utf8,
			Value::Date(_) => Type::Date,
			Value::DateTime(_) => Type::DateTime,
			Value::Decimal(_) => Type::Decimal,
			Value::Rational(_) => Type::Rational,
			Value::VarInt(_) => Type::VarInt,
			Value::VarUint(_) => Type::VarUint,
			Value::Missing => Type::Missing,
			Value::Tuple(_) => Type::Mixed,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(v) => Display::fmt(v, f),
			Value::Float2(v) => Display::fmt(v, f),
			Value::Float4(v) => Display::fmt(v, f),
			Value::Float8(v) => Display::fmt(v, f),
			Value::Int1(v) => Display::fmt(v, f),
			Value::Int2(v) => Display::fmt(v, f),
			Value::Int4(v) => Display::fmt(v, f),
			Value::Int8(v) => Display::fmt(v, f),
			Value::Uint1(v) => Display::fmt(v, f),
			Value::Uint2(v) => Display::fmt(v, f),
			Value::Uint4(v) => Display::fmt(v, f),
			Value::Uint8(v) => Display::fmt(v, f),
			Value::Utf8(v) => write!(f, "\"{}\"", v),
			Value::Char(v) => write!(f, "'{}'", v),
			Value::Symbol(v) => write!(f, ":{}", v),
			Value::Date(v) => Display::fmt(v, f),
			Value::DateTime(v) => Display::fmt(v, f),
			Value::Decimal(v) => Display::fmt(v, f),
			Value::Rational(v) => Display::fmt(v, f),
			Value::VarInt(v) => Display::fmt(v, f),
			Value::VarUint(v) => Display::fmt(v, f),
			Value::Missing => f.write_str("missing"),
			Value::Tuple(values) => {
				f.write_str("(")?;
				for (i, value) in values.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(value, f)?;
				}
				f.write_str(")")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Value::Int8(42).to_string(), "42");
		assert_eq!(Value::utf8("abc").to_string(), "\"abc\"");
		assert_eq!(Value::symbol("name").to_string(), ":name");
		assert_eq!(Value::Char('x').to_string(), "'x'");
		assert_eq!(Value::Missing.to_string(), "missing");
		assert_eq!(Value::Undefined.to_string(), "undefined");
	}

	#[test]
	fn test_tuple_display() {
		let v = Value::Tuple(vec![Value::Int8(1), Value::utf8("a")]);
		assert_eq!(v.to_string(), "(1, \"a\")");
	}

	#[test]
	fn test_get_type() {
		assert_eq!(Value::Boolean(true).get_type(), Type::Bool);
		assert_eq!(Value::float4(1.5).get_type(), Type::Float4);
		assert_eq!(Value::symbol("a").get_type(), Type::Utf8);
		assert_eq!(Value::Tuple(vec![]).get_type(), Type::Mixed);
	}
}
