// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The element type of a relation column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// A boolean
	Bool,
	/// A single Unicode character
	Char,
	/// A 16-bit float
	Float2,
	/// A 32-bit float
	Float4,
	/// A 64-bit float
	Float8,
	/// An 8-bit signed integer
	Int1,
	/// A 16-bit signed integer
	Int2,
	/// A 32-bit signed integer
	Int4,
	/// A 64-bit signed integer
	Int8,
	/// A 128-bit signed integer
	Int16,
	/// An 8-bit unsigned integer
	Uint1,
	/// A 16-bit unsigned integer
	Uint2,
	/// A 32-bit unsigned integer
	Uint4,
	/// A 64-bit unsigned integer
	Uint8,
	/// A 128-bit unsigned integer
	Uint16,
	/// A UTF-8 encoded string
	Utf8,
	/// A calendar date
	Date,
	/// A calendar timestamp
	DateTime,
	/// An arbitrary-precision scaled decimal
	Decimal,
	/// An exact rational
	Rational,
	/// An arbitrary-precision signed integer
	VarInt,
	/// An arbitrary-precision unsigned integer
	VarUint,
	/// The missing marker
	Missing,
	/// A column whose rows carry more than one type
	Mixed,
	/// A declared but otherwise untyped element
	Unspecified,
	/// A type the decoder does not recognize
	Unknown,
	/// The absence of a value
	Undefined,
	/// A fixed-width list of elements of one type
	List(Box<Type>),
	/// A nested record of named fields
	Record,
}

impl Type {
	/// Whether values of this type arrive in a partition column as-is,
	/// with no reconstruction step.
	pub fn is_relation_primitive(&self) -> bool {
		matches!(
			self,
			Type::Bool | Type::Float2
				| Type::Float4 | Type::Float8
				| Type::Int1 | Type::Int2
				| Type::Int4 | Type::Int8
				| Type::Uint1 | Type::Uint2
				| Type::Uint4 | Type::Uint8
				| Type::Utf8
		)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Type::Bool => f.write_str("Bool"),
			Type::Char => f.write_str("Char"),
			Type::Float2 => f.write_str("Float2"),
			Type::Float4 => f.write_str("Float4"),
			Type::Float8 => f.write_str("Float8"),
			Type::Int1 => f.write_str("Int1"),
			Type::Int2 => f.write_str("Int2"),
			Type::Int4 => f.write_str("Int4"),
			Type::Int8 => f.write_str("Int8"),
			Type::Int16 => f.write_str("Int16"),
			Type::Uint1 => f.write_str("Uint1"),
			Type::Uint2 => f.write_str("Uint2"),
			Type::Uint4 => f.write_str("Uint4"),
			Type::Uint8 => f.write_str("Uint8"),
			Type::Uint16 => f.write_str("Uint16"),
			Type::Utf8 => f.write_str("Utf8"),
			Type::Date => f.write_str("Date"),
			Type::DateTime => f.write_str("DateTime"),
			Type::Decimal => f.write_str("Decimal"),
			Type::Rational => f.write_str("Rational"),
			Type::VarInt => f.write_str("VarInt"),
			Type::VarUint => f.write_str("VarUint"),
			Type::Missing => f.write_str("Missing"),
			Type::Mixed => f.write_str("Mixed"),
			Type::Unspecified => f.write_str("Unspecified"),
			Type::Unknown => f.write_str("Unknown"),
			Type::Undefined => f.write_str("Undefined"),
			Type::List(inner) => write!(f, "List({})", inner),
			Type::Record => f.write_str("Record"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Type::Int8.to_string(), "Int8");
		assert_eq!(Type::List(Box::new(Type::Uint8)).to_string(), "List(Uint8)");
	}

	#[test]
	fn test_relation_primitive() {
		assert!(Type::Int8.is_relation_primitive());
		assert!(Type::Utf8.is_relation_primitive());
		assert!(!Type::Int16.is_relation_primitive());
		assert!(!Type::Char.is_relation_primitive());
		assert!(!Type::Date.is_relation_primitive());
	}
}
