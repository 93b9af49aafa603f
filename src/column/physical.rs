// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Adapters from Arrow storage to [`Column`], dispatching purely on the
//! physical storage kind. Semantic reinterpretation happens later,
//! driven by the signature.

use std::sync::Arc;

use arrow::array::{
	Array, ArrayRef, BooleanArray, FixedSizeListArray, PrimitiveArray, StringArray, StructArray,
};
use arrow::datatypes::{
	ArrowPrimitiveType, DataType, Float16Type, Float32Type, Float64Type, Int8Type, Int16Type,
	Int32Type, Int64Type, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use half::f16;
use tracing::debug;

use super::{Column, ColumnRef, Tabular};
use crate::signature::SigElem;
use crate::value::{Type, Value};

/// A native storage value that maps one-to-one onto a semantic value.
trait NativeValue: Copy {
	const TYPE: Type;

	fn to_value(self) -> Value;
}

macro_rules! native_value {
	($native:ty, $type:expr, $value:expr) => {
		impl NativeValue for $native {
			const TYPE: Type = $type;

			fn to_value(self) -> Value {
				$value(self)
			}
		}
	};
}

native_value!(i8, Type::Int1, Value::Int1);
native_value!(i16, Type::Int2, Value::Int2);
native_value!(i32, Type::Int4, Value::Int4);
native_value!(i64, Type::Int8, Value::Int8);
native_value!(u8, Type::Uint1, Value::Uint1);
native_value!(u16, Type::Uint2, Value::Uint2);
native_value!(u32, Type::Uint4, Value::Uint4);
native_value!(u64, Type::Uint8, Value::Uint8);
native_value!(f16, Type::Float2, Value::float2);
native_value!(f32, Type::Float4, Value::float4);
native_value!(f64, Type::Float8, Value::float8);

/// Wraps one Arrow array in a column adapter. Storage kinds outside the
/// protocol degrade to an unknown column of the partition's row count.
pub fn physical_column(array: &ArrayRef, num_rows: usize) -> ColumnRef {
	match array.data_type() {
		DataType::Boolean => match array.as_any().downcast_ref::<BooleanArray>() {
			Some(values) => Arc::new(BoolColumn {
				values: values.clone(),
			}),
			None => unknown(num_rows),
		},
		DataType::Int8 => primitive::<Int8Type>(array, num_rows),
		DataType::Int16 => primitive::<Int16Type>(array, num_rows),
		DataType::Int32 => primitive::<Int32Type>(array, num_rows),
		DataType::Int64 => primitive::<Int64Type>(array, num_rows),
		DataType::UInt8 => primitive::<UInt8Type>(array, num_rows),
		DataType::UInt16 => primitive::<UInt16Type>(array, num_rows),
		DataType::UInt32 => primitive::<UInt32Type>(array, num_rows),
		DataType::UInt64 => primitive::<UInt64Type>(array, num_rows),
		DataType::Float16 => primitive::<Float16Type>(array, num_rows),
		DataType::Float32 => primitive::<Float32Type>(array, num_rows),
		DataType::Float64 => primitive::<Float64Type>(array, num_rows),
		DataType::Utf8 => match array.as_any().downcast_ref::<StringArray>() {
			Some(values) => Arc::new(StringColumn {
				values: values.clone(),
			}),
			None => unknown(num_rows),
		},
		DataType::FixedSizeList(..) => {
			match array.as_any().downcast_ref::<FixedSizeListArray>() {
				Some(values) => list_column(values, num_rows),
				None => unknown(num_rows),
			}
		}
		DataType::Struct(_) => match array.as_any().downcast_ref::<StructArray>() {
			Some(values) => Arc::new(StructColumn {
				cols: values.columns().iter().map(|c| physical_column(c, num_rows)).collect(),
				num_rows,
			}),
			None => unknown(num_rows),
		},
		other => {
			debug!(kind = %other, "unrecognized storage kind");
			unknown(num_rows)
		}
	}
}

fn unknown(num_rows: usize) -> ColumnRef {
	Arc::new(UnknownColumn {
		num_rows,
	})
}

fn primitive<T>(array: &ArrayRef, num_rows: usize) -> ColumnRef
where
	T: ArrowPrimitiveType,
	T::Native: NativeValue,
{
	match array.as_any().downcast_ref::<PrimitiveArray<T>>() {
		Some(values) => Arc::new(PrimitiveColumn {
			values: values.clone(),
		}),
		None => unknown(num_rows),
	}
}

/// Fixed-size lists flatten to a tabular column over the item values. A
/// nested list of 64-bit word pairs (128-bit items) flattens through both
/// levels.
fn list_column(array: &FixedSizeListArray, num_rows: usize) -> ColumnRef {
	let (values, item_len) = match array.values().as_any().downcast_ref::<FixedSizeListArray>() {
		Some(inner) => (
			inner.values().clone(),
			array.value_length() as usize * inner.value_length() as usize,
		),
		None => (array.values().clone(), array.value_length() as usize),
	};
	// With rows present the per-row width comes from the data itself.
	let ncols = if num_rows > 0 {
		values.len() / num_rows
	} else {
		item_len
	};
	match values.data_type() {
		DataType::Int8 => list::<Int8Type>(&values, ncols, num_rows),
		DataType::Int16 => list::<Int16Type>(&values, ncols, num_rows),
		DataType::Int32 => list::<Int32Type>(&values, ncols, num_rows),
		DataType::Int64 => list::<Int64Type>(&values, ncols, num_rows),
		DataType::UInt8 => list::<UInt8Type>(&values, ncols, num_rows),
		DataType::UInt16 => list::<UInt16Type>(&values, ncols, num_rows),
		DataType::UInt32 => list::<UInt32Type>(&values, ncols, num_rows),
		DataType::UInt64 => list::<UInt64Type>(&values, ncols, num_rows),
		DataType::Float16 => list::<Float16Type>(&values, ncols, num_rows),
		DataType::Float32 => list::<Float32Type>(&values, ncols, num_rows),
		DataType::Float64 => list::<Float64Type>(&values, ncols, num_rows),
		other => {
			debug!(kind = %other, "unrecognized list item kind");
			unknown(num_rows)
		}
	}
}

fn list<T>(values: &ArrayRef, ncols: usize, num_rows: usize) -> ColumnRef
where
	T: ArrowPrimitiveType,
	T::Native: NativeValue,
{
	match values.as_any().downcast_ref::<PrimitiveArray<T>>() {
		Some(values) => Arc::new(ListColumn {
			values: values.clone(),
			ncols,
		}),
		None => unknown(num_rows),
	}
}

struct BoolColumn {
	values: BooleanArray,
}

impl Column for BoolColumn {
	fn num_rows(&self) -> usize {
		self.values.len()
	}

	fn value(&self, row: usize) -> Value {
		Value::Boolean(self.values.value(row))
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Bool)
	}
}

struct PrimitiveColumn<T: ArrowPrimitiveType> {
	values: PrimitiveArray<T>,
}

impl<T> Column for PrimitiveColumn<T>
where
	T: ArrowPrimitiveType,
	T::Native: NativeValue,
{
	fn num_rows(&self) -> usize {
		self.values.len()
	}

	fn value(&self, row: usize) -> Value {
		self.values.value(row).to_value()
	}

	fn element(&self) -> SigElem {
		SigElem::Type(T::Native::TYPE)
	}
}

struct StringColumn {
	values: StringArray,
}

impl Column for StringColumn {
	fn num_rows(&self) -> usize {
		self.values.len()
	}

	fn value(&self, row: usize) -> Value {
		Value::utf8(self.values.value(row))
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Utf8)
	}
}

/// A flattened fixed-size list: `ncols` interleaved sub-columns over one
/// backing array.
pub(crate) struct ListColumn<T: ArrowPrimitiveType> {
	values: PrimitiveArray<T>,
	ncols: usize,
}

impl<T> Column for ListColumn<T>
where
	T: ArrowPrimitiveType,
	T::Native: NativeValue,
{
	fn num_rows(&self) -> usize {
		if self.ncols > 0 {
			self.values.len() / self.ncols
		} else {
			0
		}
	}

	fn value(&self, row: usize) -> Value {
		Value::Tuple(self.row(row))
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::List(Box::new(T::Native::TYPE)))
	}

	fn as_tabular(&self) -> Option<&dyn Tabular> {
		Some(self)
	}
}

impl<T> Tabular for ListColumn<T>
where
	T: ArrowPrimitiveType,
	T::Native: NativeValue,
{
	fn num_cols(&self) -> usize {
		self.ncols
	}

	fn column(&self, index: usize) -> ColumnRef {
		Arc::new(ListItemColumn {
			values: self.values.clone(),
			ncols: self.ncols,
			index,
		})
	}
}

struct ListItemColumn<T: ArrowPrimitiveType> {
	values: PrimitiveArray<T>,
	ncols: usize,
	index: usize,
}

impl<T> Column for ListItemColumn<T>
where
	T: ArrowPrimitiveType,
	T::Native: NativeValue,
{
	fn num_rows(&self) -> usize {
		if self.ncols > 0 {
			self.values.len() / self.ncols
		} else {
			0
		}
	}

	fn value(&self, row: usize) -> Value {
		self.values.value(row * self.ncols + self.index).to_value()
	}

	fn element(&self) -> SigElem {
		SigElem::Type(T::Native::TYPE)
	}
}

/// Nested struct storage: one adapted sub-column per field.
struct StructColumn {
	cols: Vec<ColumnRef>,
	num_rows: usize,
}

impl Column for StructColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, row: usize) -> Value {
		Value::Tuple(self.row(row))
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Record)
	}

	fn as_tabular(&self) -> Option<&dyn Tabular> {
		Some(self)
	}
}

impl Tabular for StructColumn {
	fn num_cols(&self) -> usize {
		self.cols.len()
	}

	fn column(&self, index: usize) -> ColumnRef {
		self.cols[index].clone()
	}
}

/// Placeholder for storage or types the decoder does not understand.
pub(crate) struct UnknownColumn {
	pub num_rows: usize,
}

impl Column for UnknownColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, _row: usize) -> Value {
		Value::utf8("unknown")
	}

	fn render(&self, _row: usize) -> String {
		"unknown".to_string()
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Unknown)
	}
}

#[cfg(test)]
mod tests {
	use arrow::array::{Float64Array, Int64Array, UInt64Array};
	use arrow::buffer::NullBuffer;
	use arrow::datatypes::Field;

	use super::*;

	fn fixed_size_list(values: ArrayRef, len: i32) -> ArrayRef {
		let field = Arc::new(Field::new("item", values.data_type().clone(), false));
		Arc::new(
			FixedSizeListArray::new(field, len, values, None::<NullBuffer>),
		)
	}

	#[test]
	fn test_int64() {
		let array: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
		let col = physical_column(&array, 3);
		assert_eq!(col.num_rows(), 3);
		assert_eq!(col.value(1), Value::Int8(2));
		assert_eq!(col.element(), SigElem::Type(Type::Int8));
	}

	#[test]
	fn test_bool_and_string() {
		let array: ArrayRef = Arc::new(BooleanArray::from(vec![true, false]));
		let col = physical_column(&array, 2);
		assert_eq!(col.value(0), Value::Boolean(true));

		let array: ArrayRef = Arc::new(StringArray::from(vec!["a", "b"]));
		let col = physical_column(&array, 2);
		assert_eq!(col.value(1), Value::utf8("b"));
		assert_eq!(col.render(1), "\"b\"");
	}

	#[test]
	fn test_float64() {
		let array: ArrayRef = Arc::new(Float64Array::from(vec![1.5]));
		let col = physical_column(&array, 1);
		assert_eq!(col.value(0), Value::float8(1.5));
	}

	#[test]
	fn test_word_pair_list() {
		// Two rows of (lo, hi) pairs.
		let values: ArrayRef = Arc::new(UInt64Array::from(vec![1, 0, 2, 0]));
		let array = fixed_size_list(values, 2);
		let col = physical_column(&array, 2);
		let tab = col.as_tabular().unwrap();
		assert_eq!(tab.num_cols(), 2);
		assert_eq!(tab.column(0).value(1), Value::Uint8(2));
		assert_eq!(col.value(0), Value::Tuple(vec![Value::Uint8(1), Value::Uint8(0)]));
		assert_eq!(col.element(), SigElem::Type(Type::List(Box::new(Type::Uint8))));
	}

	#[test]
	fn test_nested_word_pair_list_flattens() {
		// One row of two 128-bit items, each a (lo, hi) pair.
		let words: ArrayRef = Arc::new(UInt64Array::from(vec![1, 0, 3, 0]));
		let inner = fixed_size_list(words, 2);
		let array = fixed_size_list(inner, 2);
		let col = physical_column(&array, 1);
		let tab = col.as_tabular().unwrap();
		assert_eq!(tab.num_cols(), 4);
		assert_eq!(tab.column(2).value(0), Value::Uint8(3));
	}

	#[test]
	fn test_unknown_storage() {
		let values: ArrayRef = Arc::new(Int64Array::from(vec![1]));
		let field = Arc::new(Field::new("item", DataType::Int64, false));
		let array: ArrayRef =
			Arc::new(arrow::array::ListArray::new(
				field,
				arrow::buffer::OffsetBuffer::new(vec![0, 1].into()),
				values,
				None,
			));
		let col = physical_column(&array, 1);
		assert_eq!(col.render(0), "unknown");
		assert_eq!(col.element(), SigElem::Type(Type::Unknown));
	}
}
