// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Column abstractions over decoded partition data.

pub(crate) mod builtin;
mod literal;
mod physical;
mod union;

use std::sync::Arc;

pub(crate) use literal::{ConstColumn, LiteralColumn, ValueColumn};
pub use physical::physical_column;
pub(crate) use physical::UnknownColumn;
pub(crate) use union::{NilColumn, UnionColumn};

use crate::signature::SigElem;
use crate::value::Value;

/// A randomly-indexable column of decoded values.
pub trait Column: Send + Sync {
	fn num_rows(&self) -> usize;

	/// The value at the given row.
	fn value(&self, row: usize) -> Value;

	/// The textual form of the value at the given row.
	fn render(&self, row: usize) -> String {
		self.value(row).to_string()
	}

	/// The signature element this column contributes.
	fn element(&self) -> SigElem;

	/// Composite columns expose their sub-columns.
	fn as_tabular(&self) -> Option<&dyn Tabular> {
		None
	}
}

/// A composite column made of sub-columns, one value per sub-column
/// per row.
pub trait Tabular: Column {
	fn num_cols(&self) -> usize;

	fn column(&self, index: usize) -> ColumnRef;

	fn row(&self, row: usize) -> Vec<Value> {
		(0..self.num_cols()).map(|i| self.column(i).value(row)).collect()
	}

	fn strings(&self, row: usize) -> Vec<String> {
		(0..self.num_cols()).map(|i| self.column(i).render(row)).collect()
	}
}

pub type ColumnRef = Arc<dyn Column>;
