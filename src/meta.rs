// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Native object model for decoded result metadata.
//!
//! The wire protocol delivers one metadata tree per result identifier;
//! the upstream response decoder maps it onto these types before the
//! signature interpreter runs.

use serde::{Deserialize, Serialize};

/// A primitive type code as it appears on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveTag {
	UnspecifiedType,
	Bool,
	Char,
	Float16,
	Float32,
	Float64,
	Int8,
	Int16,
	Int32,
	Int64,
	Int128,
	Uint8,
	Uint16,
	Uint32,
	Uint64,
	Uint128,
	String,
	/// A code this decoder does not recognize.
	Unknown,
}

/// A folded literal value carried by a constant metadata node.
///
/// 128-bit values arrive as low/high word pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
	Bool(bool),
	/// A Unicode scalar transmitted as its code point.
	Char(u32),
	Float16(half::f16),
	Float32(f32),
	Float64(f64),
	Int8(i8),
	Int16(i16),
	Int32(i32),
	Int64(i64),
	Int128 { lo: u64, hi: u64 },
	Uint8(u8),
	Uint16(u16),
	Uint32(u32),
	Uint64(u64),
	Uint128 { lo: u64, hi: u64 },
	String(String),
	Unknown,
}

/// One node of a metadata signature tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MetaNode {
	Primitive(PrimitiveTag),
	Constant(ConstantNode),
	Value(ValueNode),
	/// A node kind this decoder does not recognize.
	Unknown,
}

/// A constant-folded type: a declared base type plus the literal argument
/// tuple that was folded into the type during compilation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantNode {
	pub base: Box<MetaNode>,
	pub values: Vec<MetaValue>,
}

/// A value (compositor) type with its argument types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueNode {
	pub argument_types: Vec<MetaNode>,
}

impl MetaNode {
	pub fn primitive(tag: PrimitiveTag) -> Self {
		MetaNode::Primitive(tag)
	}

	pub fn constant(base: MetaNode, values: Vec<MetaValue>) -> Self {
		MetaNode::Constant(ConstantNode {
			base: Box::new(base),
			values,
		})
	}

	pub fn value(argument_types: Vec<MetaNode>) -> Self {
		MetaNode::Value(ValueNode {
			argument_types,
		})
	}

	/// Convenience for the ubiquitous symbol element: a constant string
	/// type folding one literal name.
	pub fn symbol(name: impl Into<String>) -> Self {
		Self::constant(MetaNode::Primitive(PrimitiveTag::String), vec![MetaValue::String(name.into())])
	}
}
