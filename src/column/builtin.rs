// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Recognition of builtin value compositors and the semantic columns
//! that reconstruct their values from physical storage.
//!
//! A builtin is a composite whose first three elements are the symbols
//! `rel`, `base` and a kind discriminator. Everything after the
//! discriminator is kind-specific: literals carrying parameters (bit
//! width, decimal digits) and the storage type of the payload.

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use tracing::debug;

use super::physical::UnknownColumn;
use super::{Column, ColumnRef};
use crate::signature::SigElem;
use crate::value::{Date, DateTime, Decimal, Rational, Type, Value, VarInt, VarUint};

/// Time period kinds are plain pass-throughs of their int64 payload.
const PERIOD_KINDS: &[&str] = &[
	"Year",
	"Month",
	"Week",
	"Day",
	"Hour",
	"Minute",
	"Second",
	"Millisecond",
	"Microsecond",
	"Nanosecond",
];

/// Extracts the kind discriminator when the elements form a builtin.
pub fn builtin_kind(elems: &[SigElem]) -> Option<&str> {
	match elems {
		[SigElem::Lit(Value::Symbol(a)), SigElem::Lit(Value::Symbol(b)), SigElem::Lit(Value::Symbol(kind)), ..]
			if a == "rel" && b == "base" =>
		{
			Some(kind)
		}
		_ => None,
	}
}

/// Reconstructs the semantic value of a fully-constant builtin from its
/// folded literal slots.
pub fn builtin_value(elems: &[SigElem]) -> Option<Value> {
	let kind = builtin_kind(elems)?;
	match kind {
		"AutoNumber" | "FilePos" => lit(elems, 3).cloned(),
		_ if PERIOD_KINDS.contains(&kind) => lit(elems, 3).cloned(),
		"Date" => Some(match lit_i64(elems, 3) {
			Some(days) => Value::Date(Date::from_rata_die(days)),
			None => Value::Undefined,
		}),
		"DateTime" => Some(match lit_i64(elems, 3) {
			Some(millis) => Value::DateTime(DateTime::from_rata_millis(millis)),
			None => Value::Undefined,
		}),
		"FixedDecimal" => {
			let bits = lit_i64(elems, 3)?;
			let digits = lit_i64(elems, 4)?;
			if !valid_bits(bits) {
				return Some(Value::Undefined);
			}
			Some(match lit(elems, 5).and_then(signed_int) {
				Some(mantissa) => Value::Decimal(Decimal::from_bigint(mantissa, digits)),
				None => Value::Undefined,
			})
		}
		"Rational" => {
			let (numer, denom) = pair(elems.get(4)?)?;
			Some(
				match (signed_int(&numer), signed_int(&denom)) {
					(Some(n), Some(d)) => match Rational::new(n, d) {
						Some(r) => Value::Rational(r),
						None => Value::Undefined,
					},
					_ => Value::Undefined,
				},
			)
		}
		"Hash" => Some(match lit(elems, 3).and_then(unsigned_int) {
			Some(v) => Value::VarUint(VarUint::from(v)),
			None => Value::Undefined,
		}),
		"Missing" => Some(Value::Missing),
		_ => {
			debug!(kind, "unrecognized builtin constant");
			None
		}
	}
}

/// Wraps the physical payload column of a builtin value compositor in
/// its semantic reconstruction. `None` means the elements are not a
/// recognized builtin and structural handling should take over.
pub fn builtin_value_column(
	elems: &[SigElem],
	col: &ColumnRef,
	num_rows: usize,
) -> Option<ColumnRef> {
	let kind = builtin_kind(elems)?;
	match kind {
		"AutoNumber" | "FilePos" => Some(col.clone()),
		_ if PERIOD_KINDS.contains(&kind) => Some(col.clone()),
		"Date" => Some(Arc::new(DateColumn {
			inner: col.clone(),
		})),
		"DateTime" => Some(Arc::new(DateTimeColumn {
			inner: col.clone(),
		})),
		"FixedDecimal" => {
			let bits = elems.get(3).and_then(elem_i64)?;
			let digits = elems.get(4).and_then(elem_i64)?;
			if !valid_bits(bits) {
				debug!(bits, "unsupported decimal bit width");
				return Some(Arc::new(UnknownColumn {
					num_rows,
				}));
			}
			Some(Arc::new(DecimalColumn {
				inner: col.clone(),
				digits,
			}))
		}
		"Rational" => Some(Arc::new(RationalColumn {
			inner: col.clone(),
		})),
		"Hash" => Some(Arc::new(Uint128Column {
			inner: col.clone(),
		})),
		"Missing" => Some(Arc::new(MissingColumn {
			num_rows,
		})),
		_ => {
			debug!(kind, "unrecognized builtin value type");
			None
		}
	}
}

fn valid_bits(bits: i64) -> bool {
	matches!(bits, 8 | 16 | 32 | 64 | 128)
}

fn lit(elems: &[SigElem], index: usize) -> Option<&Value> {
	match elems.get(index) {
		Some(SigElem::Lit(value)) => Some(value),
		_ => None,
	}
}

fn lit_i64(elems: &[SigElem], index: usize) -> Option<i64> {
	lit(elems, index).and_then(signed_int).and_then(|v| v.to_i64())
}

fn elem_i64(elem: &SigElem) -> Option<i64> {
	match elem {
		SigElem::Lit(value) => signed_int(value).and_then(|v| v.to_i64()),
		_ => None,
	}
}

/// A numerator/denominator (or similar) pair, either a literal tuple or
/// a nested constant of two literals.
fn pair(elem: &SigElem) -> Option<(Value, Value)> {
	match elem {
		SigElem::Lit(Value::Tuple(items)) => match items.as_slice() {
			[a, b] => Some((a.clone(), b.clone())),
			_ => None,
		},
		SigElem::Const(children) => match children.as_slice() {
			[SigElem::Lit(a), SigElem::Lit(b)] => Some((a.clone(), b.clone())),
			_ => None,
		},
		_ => None,
	}
}

/// Reconstructs a signed integer of any transmitted width: native
/// integers, arbitrary-precision values, or a (lo, hi) 64-bit word pair.
pub(crate) fn signed_int(value: &Value) -> Option<BigInt> {
	match value {
		Value::Int1(v) => Some(BigInt::from(*v)),
		Value::Int2(v) => Some(BigInt::from(*v)),
		Value::Int4(v) => Some(BigInt::from(*v)),
		Value::Int8(v) => Some(BigInt::from(*v)),
		Value::VarInt(v) => Some(v.inner().clone()),
		Value::Tuple(items) => match items.as_slice() {
			[Value::Uint8(lo), Value::Uint8(hi)] => {
				Some(VarInt::from_words(*lo, *hi).0)
			}
			_ => None,
		},
		_ => None,
	}
}

/// Unsigned counterpart of [`signed_int`]; word pairs keep their full
/// magnitude.
pub(crate) fn unsigned_int(value: &Value) -> Option<BigInt> {
	match value {
		Value::Uint1(v) => Some(BigInt::from(*v)),
		Value::Uint2(v) => Some(BigInt::from(*v)),
		Value::Uint4(v) => Some(BigInt::from(*v)),
		Value::Uint8(v) => Some(BigInt::from(*v)),
		Value::VarUint(v) => Some(v.inner().clone()),
		Value::Tuple(items) => match items.as_slice() {
			[Value::Uint8(lo), Value::Uint8(hi)] => {
				Some(VarUint::from_words(*lo, *hi).0)
			}
			_ => None,
		},
		_ => None,
	}
}

/// Reinterprets a code point column as characters.
pub(crate) struct CharColumn {
	pub inner: ColumnRef,
}

impl Column for CharColumn {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		let code = match self.inner.value(row) {
			Value::Uint4(v) => v,
			Value::Int4(v) => v as u32,
			_ => return Value::Undefined,
		};
		match char::from_u32(code) {
			Some(c) => Value::Char(c),
			None => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Char)
	}
}

/// Signed 128-bit values over a (lo, hi) word-pair column.
pub(crate) struct Int128Column {
	pub inner: ColumnRef,
}

impl Column for Int128Column {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		match signed_int(&self.inner.value(row)) {
			Some(v) => Value::VarInt(VarInt::from(v)),
			None => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::VarInt)
	}
}

/// Unsigned 128-bit values over a (lo, hi) word-pair column.
pub(crate) struct Uint128Column {
	pub inner: ColumnRef,
}

impl Column for Uint128Column {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		match unsigned_int(&self.inner.value(row)) {
			Some(v) => Value::VarUint(VarUint(v)),
			None => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::VarUint)
	}
}

/// Calendar dates over a Rata Die day-count column.
struct DateColumn {
	inner: ColumnRef,
}

impl Column for DateColumn {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		match self.inner.value(row) {
			Value::Int8(days) => Value::Date(Date::from_rata_die(days)),
			_ => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Date)
	}
}

/// Timestamps over a Rata Die millisecond column.
struct DateTimeColumn {
	inner: ColumnRef,
}

impl Column for DateTimeColumn {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		match self.inner.value(row) {
			Value::Int8(millis) => Value::DateTime(DateTime::from_rata_millis(millis)),
			_ => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::DateTime)
	}
}

/// Scaled decimals over a mantissa column of any supported width.
struct DecimalColumn {
	inner: ColumnRef,
	digits: i64,
}

impl Column for DecimalColumn {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		match signed_int(&self.inner.value(row)) {
			Some(mantissa) => Value::Decimal(Decimal::from_bigint(mantissa, self.digits)),
			None => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Decimal)
	}
}

/// Rationals over a column of signed numerator/denominator pairs. At
/// 128 bits the flattened storage carries four words per row.
struct RationalColumn {
	inner: ColumnRef,
}

impl Column for RationalColumn {
	fn num_rows(&self) -> usize {
		self.inner.num_rows()
	}

	fn value(&self, row: usize) -> Value {
		let items = match self.inner.value(row) {
			Value::Tuple(items) => items,
			_ => return Value::Undefined,
		};
		let (numer, denom) = match items.as_slice() {
			[n, d] => (signed_int(n), signed_int(d)),
			[Value::Uint8(nlo), Value::Uint8(nhi), Value::Uint8(dlo), Value::Uint8(dhi)] => (
				Some(VarInt::from_words(*nlo, *nhi).0),
				Some(VarInt::from_words(*dlo, *dhi).0),
			),
			_ => (None, None),
		};
		match (numer, denom) {
			(Some(n), Some(d)) => match Rational::new(n, d) {
				Some(r) => Value::Rational(r),
				None => Value::Undefined,
			},
			_ => Value::Undefined,
		}
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Rational)
	}
}

/// The missing marker; carries no physical payload.
struct MissingColumn {
	num_rows: usize,
}

impl Column for MissingColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, _row: usize) -> Value {
		Value::Missing
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Missing)
	}
}
