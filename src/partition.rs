// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use arrow::record_batch::RecordBatch;
use once_cell::sync::OnceCell;

use crate::column::{ColumnRef, physical_column};
use crate::signature::Signature;
use crate::value::Value;

/// One decoded result partition: an Arrow record plus lazily-built
/// column adapters over its arrays.
pub struct Partition {
	record: RecordBatch,
	cols: OnceCell<Vec<ColumnRef>>,
}

impl Partition {
	pub fn new(record: RecordBatch) -> Self {
		Self {
			record,
			cols: OnceCell::new(),
		}
	}

	pub fn num_rows(&self) -> usize {
		self.record.num_rows()
	}

	pub fn num_cols(&self) -> usize {
		self.record.num_columns()
	}

	pub fn columns(&self) -> &[ColumnRef] {
		self.cols.get_or_init(|| {
			let num_rows = self.record.num_rows();
			self.record.columns().iter().map(|c| physical_column(c, num_rows)).collect()
		})
	}

	pub fn column(&self, index: usize) -> ColumnRef {
		self.columns()[index].clone()
	}

	/// The storage-level signature, one element per physical column.
	pub fn signature(&self) -> Signature {
		Signature(self.columns().iter().map(|c| c.element()).collect())
	}

	pub fn row(&self, row: usize) -> Vec<Value> {
		self.columns().iter().map(|c| c.value(row)).collect()
	}

	pub fn strings(&self, row: usize) -> Vec<String> {
		self.columns().iter().map(|c| c.render(row)).collect()
	}

	pub fn record(&self) -> &RecordBatch {
		&self.record
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use arrow::array::{ArrayRef, Int64Array, StringArray};
	use arrow::datatypes::{DataType, Field, Schema};

	use super::*;
	use crate::signature::SigElem;
	use crate::value::Type;

	fn partition() -> Partition {
		let schema = Arc::new(Schema::new(vec![
			Field::new("v1", DataType::Int64, false),
			Field::new("v2", DataType::Utf8, false),
		]));
		let cols: Vec<ArrayRef> = vec![
			Arc::new(Int64Array::from(vec![1, 2])),
			Arc::new(StringArray::from(vec!["a", "b"])),
		];
		Partition::new(RecordBatch::try_new(schema, cols).unwrap())
	}

	#[test]
	fn test_shape() {
		let p = partition();
		assert_eq!(p.num_rows(), 2);
		assert_eq!(p.num_cols(), 2);
	}

	#[test]
	fn test_signature() {
		let p = partition();
		assert_eq!(
			p.signature().elements(),
			&[SigElem::Type(Type::Int8), SigElem::Type(Type::Utf8)]
		);
	}

	#[test]
	fn test_rows() {
		let p = partition();
		assert_eq!(p.row(1), vec![Value::Int8(2), Value::utf8("b")]);
		assert_eq!(p.strings(0), vec!["1".to_string(), "\"a\"".to_string()]);
	}
}
