// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use super::{Column, ColumnRef, Tabular};
use crate::signature::SigElem;
use crate::value::Value;

/// A constant column repeating one folded literal.
pub(crate) struct LiteralColumn {
	pub value: Value,
	pub num_rows: usize,
}

impl Column for LiteralColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, _row: usize) -> Value {
		self.value.clone()
	}

	fn element(&self) -> SigElem {
		SigElem::Lit(self.value.clone())
	}
}

/// A constant composite: its sub-columns are themselves constant.
pub(crate) struct ConstColumn {
	pub cols: Vec<ColumnRef>,
	pub num_rows: usize,
}

impl Column for ConstColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, row: usize) -> Value {
		Value::Tuple(self.row(row))
	}

	fn element(&self) -> SigElem {
		SigElem::Const(self.cols.iter().map(|c| c.element()).collect())
	}

	fn as_tabular(&self) -> Option<&dyn Tabular> {
		Some(self)
	}
}

impl Tabular for ConstColumn {
	fn num_cols(&self) -> usize {
		self.cols.len()
	}

	fn column(&self, index: usize) -> ColumnRef {
		self.cols[index].clone()
	}
}

/// A value compositor column over resolved argument columns.
pub(crate) struct ValueColumn {
	pub cols: Vec<ColumnRef>,
	pub num_rows: usize,
}

impl Column for ValueColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, row: usize) -> Value {
		Value::Tuple(self.row(row))
	}

	fn element(&self) -> SigElem {
		SigElem::Value(self.cols.iter().map(|c| c.element()).collect())
	}

	fn as_tabular(&self) -> Option<&dyn Tabular> {
		Some(self)
	}
}

impl Tabular for ValueColumn {
	fn num_cols(&self) -> usize {
		self.cols.len()
	}

	fn column(&self, index: usize) -> ColumnRef {
		self.cols[index].clone()
	}
}
