// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Signature interpretation: metadata trees become flat, closed
//! signature elements with constant literals folded back in.

use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DecodeError;
use crate::meta::{MetaNode, MetaValue, PrimitiveTag, ValueNode};
use crate::value::{Type, Value, VarInt, VarUint};

/// One element of a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SigElem {
	/// A typed slot backed by a physical column.
	Type(Type),
	/// A constant composite; its children are literals or nested consts.
	Const(Vec<SigElem>),
	/// A value compositor over argument elements.
	Value(Vec<SigElem>),
	/// A folded literal.
	Lit(Value),
}

impl Display for SigElem {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			SigElem::Type(t) => Display::fmt(t, f),
			SigElem::Lit(v) => Display::fmt(v, f),
			SigElem::Const(children) => {
				f.write_str("const(")?;
				write_elems(f, children)?;
				f.write_str(")")
			}
			SigElem::Value(children) => {
				f.write_str("value(")?;
				write_elems(f, children)?;
				f.write_str(")")
			}
		}
	}
}

fn write_elems(f: &mut Formatter<'_>, elems: &[SigElem]) -> fmt::Result {
	for (i, elem) in elems.iter().enumerate() {
		if i > 0 {
			f.write_str(", ")?;
		}
		Display::fmt(elem, f)?;
	}
	Ok(())
}

/// An ordered sequence of signature elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature(pub Vec<SigElem>);

impl Signature {
	/// Interprets a decoded metadata tree into a signature.
	pub fn interpret(nodes: &[MetaNode]) -> Result<Signature, DecodeError> {
		let mut elems = Vec::with_capacity(nodes.len());
		for node in nodes {
			elems.push(interpret_node(node)?);
		}
		Ok(Signature(elems))
	}

	pub fn elements(&self) -> &[SigElem] {
		&self.0
	}

	/// Whether this signature starts with the given terms. `"_"` matches
	/// any element; other terms match symbol literals by name. An empty
	/// term list matches every signature.
	pub fn matches_prefix(&self, terms: &[&str]) -> bool {
		if terms.len() > self.0.len() {
			return false;
		}
		terms.iter().zip(self.0.iter()).all(|(term, elem)| {
			*term == "_"
				|| matches!(elem, SigElem::Lit(Value::Symbol(name)) if name == term)
		})
	}
}

impl Deref for Signature {
	type Target = [SigElem];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<SigElem>> for Signature {
	fn from(elems: Vec<SigElem>) -> Self {
		Signature(elems)
	}
}

impl Display for Signature {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("(")?;
		write_elems(f, &self.0)?;
		f.write_str(")")
	}
}

fn interpret_node(node: &MetaNode) -> Result<SigElem, DecodeError> {
	match node {
		MetaNode::Primitive(tag) => Ok(SigElem::Type(primitive_type(*tag))),
		MetaNode::Value(vnode) => Ok(SigElem::Value(interpret_args(vnode)?)),
		MetaNode::Constant(cnode) => match cnode.base.as_ref() {
			MetaNode::Primitive(_) => Ok(literal_elem(&cnode.values)),
			MetaNode::Value(vnode) => {
				let args = interpret_args(vnode)?;
				let expected = count_slots(&args);
				if cnode.values.len() < expected {
					return Err(DecodeError::LiteralUnderflow {
						expected,
						found: cnode.values.len(),
					});
				}
				let mut tail: Vec<Value> =
					cnode.values.iter().map(native_value).collect();
				tail.reverse(); // consume via pop from the front
				let merged = merge_literals(args, &mut tail);
				if !tail.is_empty() {
					debug!(surplus = tail.len(), "discarding trailing constant literals");
				}
				Ok(SigElem::Const(merged))
			}
			other => {
				debug!(?other, "unrecognized constant base type");
				Ok(SigElem::Type(Type::Unknown))
			}
		},
		MetaNode::Unknown => Ok(SigElem::Type(Type::Unknown)),
	}
}

fn interpret_args(vnode: &ValueNode) -> Result<Vec<SigElem>, DecodeError> {
	vnode.argument_types.iter().map(interpret_node).collect()
}

/// A constant over a primitive base folds to a single literal, or to a
/// literal tuple when it carries several values.
fn literal_elem(values: &[MetaValue]) -> SigElem {
	match values {
		[] => SigElem::Type(Type::Unknown),
		[value] => SigElem::Lit(native_value(value)),
		_ => SigElem::Lit(Value::Tuple(values.iter().map(native_value).collect())),
	}
}

/// Number of literals a merged constant needs: one per typed slot,
/// counted depth-first through nested composites.
fn count_slots(elems: &[SigElem]) -> usize {
	elems.iter()
		.map(|elem| match elem {
			SigElem::Type(_) => 1,
			SigElem::Const(children) | SigElem::Value(children) => count_slots(children),
			SigElem::Lit(_) => 0,
		})
		.sum()
}

/// Folds the literal tail into the argument elements, depth-first. Each
/// typed slot consumes one literal; a value compositor nested under a
/// constant is itself constant and consumes through its own slots.
fn merge_literals(elems: Vec<SigElem>, tail: &mut Vec<Value>) -> Vec<SigElem> {
	elems.into_iter()
		.map(|elem| match elem {
			SigElem::Type(_) => match tail.pop() {
				Some(value) => SigElem::Lit(value),
				None => elem,
			},
			SigElem::Const(children) => SigElem::Const(merge_literals(children, tail)),
			SigElem::Value(children) => SigElem::Const(merge_literals(children, tail)),
			SigElem::Lit(_) => elem,
		})
		.collect()
}

fn primitive_type(tag: PrimitiveTag) -> Type {
	match tag {
		PrimitiveTag::Bool => Type::Bool,
		PrimitiveTag::Char => Type::Char,
		PrimitiveTag::Float16 => Type::Float2,
		PrimitiveTag::Float32 => Type::Float4,
		PrimitiveTag::Float64 => Type::Float8,
		PrimitiveTag::Int8 => Type::Int1,
		PrimitiveTag::Int16 => Type::Int2,
		PrimitiveTag::Int32 => Type::Int4,
		PrimitiveTag::Int64 => Type::Int8,
		PrimitiveTag::Int128 => Type::Int16,
		PrimitiveTag::Uint8 => Type::Uint1,
		PrimitiveTag::Uint16 => Type::Uint2,
		PrimitiveTag::Uint32 => Type::Uint4,
		PrimitiveTag::Uint64 => Type::Uint8,
		PrimitiveTag::Uint128 => Type::Uint16,
		PrimitiveTag::String => Type::Utf8,
		PrimitiveTag::UnspecifiedType => Type::Unspecified,
		PrimitiveTag::Unknown => Type::Unknown,
	}
}

/// Converts a wire literal to its semantic value. Strings in constant
/// position are interned names.
fn native_value(value: &MetaValue) -> Value {
	match value {
		MetaValue::Bool(v) => Value::Boolean(*v),
		MetaValue::Char(v) => match char::from_u32(*v) {
			Some(c) => Value::Char(c),
			None => Value::Undefined,
		},
		MetaValue::Float16(v) => Value::float2(*v),
		MetaValue::Float32(v) => Value::float4(*v),
		MetaValue::Float64(v) => Value::float8(*v),
		MetaValue::Int8(v) => Value::Int1(*v),
		MetaValue::Int16(v) => Value::Int2(*v),
		MetaValue::Int32(v) => Value::Int4(*v),
		MetaValue::Int64(v) => Value::Int8(*v),
		MetaValue::Int128 {
			lo,
			hi,
		} => Value::VarInt(VarInt::from_words(*lo, *hi)),
		MetaValue::Uint8(v) => Value::Uint1(*v),
		MetaValue::Uint16(v) => Value::Uint2(*v),
		MetaValue::Uint32(v) => Value::Uint4(*v),
		MetaValue::Uint64(v) => Value::Uint8(*v),
		MetaValue::Uint128 {
			lo,
			hi,
		} => Value::VarUint(VarUint::from_words(*lo, *hi)),
		MetaValue::String(v) => Value::Symbol(v.clone()),
		MetaValue::Unknown => Value::Undefined,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod interpret {
		use super::*;

		#[test]
		fn test_primitives() {
			let sig = Signature::interpret(&[
				MetaNode::primitive(PrimitiveTag::Int64),
				MetaNode::primitive(PrimitiveTag::String),
				MetaNode::primitive(PrimitiveTag::Int128),
			])
			.unwrap();
			assert_eq!(
				sig.elements(),
				&[
					SigElem::Type(Type::Int8),
					SigElem::Type(Type::Utf8),
					SigElem::Type(Type::Int16),
				]
			);
		}

		#[test]
		fn test_symbol_constant() {
			let sig = Signature::interpret(&[MetaNode::symbol("foo")]).unwrap();
			assert_eq!(sig.elements(), &[SigElem::Lit(Value::symbol("foo"))]);
			assert_eq!(sig.to_string(), "(:foo)");
		}

		#[test]
		fn test_primitive_constant_tuple() {
			let node = MetaNode::constant(
				MetaNode::primitive(PrimitiveTag::Int64),
				vec![MetaValue::Int64(1), MetaValue::Int64(2)],
			);
			let sig = Signature::interpret(&[node]).unwrap();
			assert_eq!(
				sig.elements(),
				&[SigElem::Lit(Value::Tuple(vec![Value::Int8(1), Value::Int8(2)]))]
			);
		}

		#[test]
		fn test_value_constant_merge() {
			// const over value(Utf8, Int64) folds two literals.
			let node = MetaNode::constant(
				MetaNode::value(vec![
					MetaNode::primitive(PrimitiveTag::String),
					MetaNode::primitive(PrimitiveTag::Int64),
				]),
				vec![MetaValue::String("rel".into()), MetaValue::Int64(7)],
			);
			let sig = Signature::interpret(&[node]).unwrap();
			assert_eq!(
				sig.elements(),
				&[SigElem::Const(vec![
					SigElem::Lit(Value::symbol("rel")),
					SigElem::Lit(Value::Int8(7)),
				])]
			);
		}

		#[test]
		fn test_nested_value_merges_depth_first() {
			let node = MetaNode::constant(
				MetaNode::value(vec![
					MetaNode::primitive(PrimitiveTag::String),
					MetaNode::value(vec![
						MetaNode::primitive(PrimitiveTag::Int64),
						MetaNode::primitive(PrimitiveTag::Int64),
					]),
				]),
				vec![
					MetaValue::String("base".into()),
					MetaValue::Int64(1),
					MetaValue::Int64(2),
				],
			);
			let sig = Signature::interpret(&[node]).unwrap();
			assert_eq!(
				sig.elements(),
				&[SigElem::Const(vec![
					SigElem::Lit(Value::symbol("base")),
					SigElem::Const(vec![
						SigElem::Lit(Value::Int8(1)),
						SigElem::Lit(Value::Int8(2)),
					]),
				])]
			);
		}

		#[test]
		fn test_literal_underflow() {
			let node = MetaNode::constant(
				MetaNode::value(vec![
					MetaNode::primitive(PrimitiveTag::String),
					MetaNode::primitive(PrimitiveTag::Int64),
				]),
				vec![MetaValue::String("rel".into())],
			);
			assert_eq!(
				Signature::interpret(&[node]),
				Err(DecodeError::LiteralUnderflow {
					expected: 2,
					found: 1,
				})
			);
		}

		#[test]
		fn test_literal_surplus_discarded() {
			let node = MetaNode::constant(
				MetaNode::value(vec![MetaNode::primitive(PrimitiveTag::Int64)]),
				vec![MetaValue::Int64(1), MetaValue::Int64(2)],
			);
			let sig = Signature::interpret(&[node]).unwrap();
			assert_eq!(sig.elements(), &[SigElem::Const(vec![SigElem::Lit(Value::Int8(1))])]);
		}

		#[test]
		fn test_unknown_degrades() {
			let sig = Signature::interpret(&[
				MetaNode::Unknown,
				MetaNode::primitive(PrimitiveTag::Unknown),
			])
			.unwrap();
			assert_eq!(
				sig.elements(),
				&[SigElem::Type(Type::Unknown), SigElem::Type(Type::Unknown)]
			);
		}
	}

	mod prefix {
		use super::*;

		fn sig(names: &[&str]) -> Signature {
			Signature(names.iter().map(|n| SigElem::Lit(Value::symbol(*n))).collect())
		}

		#[test]
		fn test_exact_match() {
			assert!(sig(&["output", "foo"]).matches_prefix(&["output", "foo"]));
			assert!(sig(&["output", "foo"]).matches_prefix(&["output"]));
			assert!(!sig(&["output"]).matches_prefix(&["output", "foo"]));
		}

		#[test]
		fn test_wildcard() {
			assert!(sig(&["output", "foo"]).matches_prefix(&["_", "foo"]));
			assert!(!sig(&["output", "foo"]).matches_prefix(&["_", "bar"]));
		}

		#[test]
		fn test_empty_terms_match_all() {
			assert!(sig(&["anything"]).matches_prefix(&[]));
		}

		#[test]
		fn test_non_symbol_element() {
			let s = Signature(vec![SigElem::Type(Type::Int8)]);
			assert!(!s.matches_prefix(&["output"]));
			assert!(s.matches_prefix(&["_"]));
		}
	}
}
