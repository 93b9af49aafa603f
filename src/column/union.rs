// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use super::{Column, ColumnRef};
use crate::signature::SigElem;
use crate::value::{Type, Value};

/// The nil placeholder padding narrow relations inside a union.
pub(crate) struct NilColumn {
	pub num_rows: usize,
}

impl Column for NilColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, _row: usize) -> Value {
		Value::Undefined
	}

	fn element(&self) -> SigElem {
		SigElem::Type(Type::Undefined)
	}
}

/// A column concatenating the row ranges of several source columns.
pub(crate) struct UnionColumn {
	cols: Vec<ColumnRef>,
	num_rows: usize,
	element: SigElem,
}

impl UnionColumn {
	pub fn new(cols: Vec<ColumnRef>) -> Self {
		let num_rows = cols.iter().map(|c| c.num_rows()).sum();
		let element = common_element(&cols);
		Self {
			cols,
			num_rows,
			element,
		}
	}

	fn locate(&self, row: usize) -> Option<(&ColumnRef, usize)> {
		let mut offset = row;
		for col in &self.cols {
			if offset < col.num_rows() {
				return Some((col, offset));
			}
			offset -= col.num_rows();
		}
		None
	}
}

/// The shared element of all sources, or `Mixed` when they disagree.
fn common_element(cols: &[ColumnRef]) -> SigElem {
	let mut iter = cols.iter();
	let first = match iter.next() {
		Some(col) => col.element(),
		None => return SigElem::Type(Type::Undefined),
	};
	if iter.all(|col| col.element() == first) {
		first
	} else {
		SigElem::Type(Type::Mixed)
	}
}

impl Column for UnionColumn {
	fn num_rows(&self) -> usize {
		self.num_rows
	}

	fn value(&self, row: usize) -> Value {
		match self.locate(row) {
			Some((col, offset)) => col.value(offset),
			None => Value::Undefined,
		}
	}

	fn render(&self, row: usize) -> String {
		match self.locate(row) {
			Some((col, offset)) => col.render(offset),
			None => Value::Undefined.to_string(),
		}
	}

	fn element(&self) -> SigElem {
		self.element.clone()
	}
}
