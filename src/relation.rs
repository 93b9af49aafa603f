// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Relation assembly: a metadata signature applied to a partition
//! yields a typed, randomly-indexable relation.

use std::ops::Deref;
use std::sync::Arc;

use tracing::debug;

use crate::column::builtin::{builtin_value, builtin_value_column, CharColumn, Int128Column, Uint128Column};
use crate::column::{
	ColumnRef, ConstColumn, LiteralColumn, NilColumn, UnionColumn, UnknownColumn, ValueColumn,
};
use crate::error::DecodeError;
use crate::partition::Partition;
use crate::signature::{SigElem, Signature};
use crate::value::{Type, Value};

/// A typed relation over shared column data. Cloning is cheap; columns
/// are reference counted.
#[derive(Clone)]
pub struct Relation {
	sig: Signature,
	cols: Vec<ColumnRef>,
	num_rows: usize,
}

impl Relation {
	/// Assembles a relation by resolving each signature element against
	/// the partition's physical columns, consumed left to right.
	pub fn assemble(sig: &Signature, partition: &Partition) -> Result<Relation, DecodeError> {
		let physical = partition.columns();
		let required = sig.iter().filter(|e| consumes_column(e)).count();
		if required > physical.len() {
			return Err(DecodeError::ColumnCountMismatch {
				required,
				available: physical.len(),
			});
		}
		// A fully-constant signature is a single fact.
		let num_rows = if required == 0 {
			1
		} else {
			partition.num_rows()
		};

		let mut next = 0;
		let mut cols = Vec::with_capacity(sig.len());
		for elem in sig.iter() {
			match elem {
				SigElem::Type(t) => {
					let col = &physical[next];
					next += 1;
					cols.push(relation_column(t, col, num_rows));
				}
				SigElem::Value(children) => {
					let col = &physical[next];
					next += 1;
					cols.push(value_column(children, col, num_rows));
				}
				SigElem::Lit(value) => cols.push(Arc::new(LiteralColumn {
					value: value.clone(),
					num_rows,
				}) as ColumnRef),
				SigElem::Const(children) => cols.push(const_column(children, num_rows)),
			}
		}
		if next < physical.len() {
			debug!(extra = physical.len() - next, "ignoring extra partition columns");
		}

		Ok(Relation {
			sig: derive_signature(&cols),
			cols,
			num_rows,
		})
	}

	pub fn num_rows(&self) -> usize {
		self.num_rows
	}

	pub fn num_cols(&self) -> usize {
		self.cols.len()
	}

	pub fn signature(&self) -> &Signature {
		&self.sig
	}

	pub fn column(&self, index: usize) -> ColumnRef {
		self.cols[index].clone()
	}

	pub fn columns(&self) -> &[ColumnRef] {
		&self.cols
	}

	pub fn row(&self, row: usize) -> Vec<Value> {
		self.cols.iter().map(|c| c.value(row)).collect()
	}

	pub fn strings(&self, row: usize) -> Vec<String> {
		self.cols.iter().map(|c| c.render(row)).collect()
	}

	/// A view over columns `[lo, hi)`; `None` means up to the last
	/// column. No data is copied.
	pub fn slice(&self, lo: usize, hi: Option<usize>) -> Relation {
		let hi = hi.unwrap_or(self.cols.len()).min(self.cols.len());
		let lo = lo.min(hi);
		Relation {
			sig: Signature(self.sig.elements()[lo..hi].to_vec()),
			cols: self.cols[lo..hi].to_vec(),
			num_rows: self.num_rows,
		}
	}

	/// Concatenates relations row-wise. The result is as wide as the
	/// widest input; narrower inputs are padded with the nil
	/// placeholder.
	pub fn union(relations: &[Relation]) -> Relation {
		match relations {
			[] => Relation {
				sig: Signature::default(),
				cols: Vec::new(),
				num_rows: 0,
			},
			[only] => only.clone(),
			_ => {
				let width = relations.iter().map(|r| r.num_cols()).max().unwrap_or(0);
				let cols: Vec<ColumnRef> = (0..width)
					.map(|i| {
						let sources = relations
							.iter()
							.map(|r| {
								if i < r.num_cols() {
									r.cols[i].clone()
								} else {
									Arc::new(NilColumn {
										num_rows: r.num_rows,
									}) as ColumnRef
								}
							})
							.collect();
						Arc::new(UnionColumn::new(sources)) as ColumnRef
					})
					.collect();
				Relation {
					sig: derive_signature(&cols),
					num_rows: relations.iter().map(|r| r.num_rows).sum(),
					cols,
				}
			}
		}
	}
}

impl std::fmt::Debug for Relation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Relation")
			.field("sig", &self.sig)
			.field("num_rows", &self.num_rows)
			.finish_non_exhaustive()
	}
}

fn consumes_column(elem: &SigElem) -> bool {
	matches!(elem, SigElem::Type(_) | SigElem::Value(_))
}

/// The relation signature falls out of the resolved columns.
fn derive_signature(cols: &[ColumnRef]) -> Signature {
	Signature(cols.iter().map(|c| c.element()).collect())
}

/// Resolves a runtime type against its physical column. `Char` and the
/// 128-bit integers need reinterpretation; other relation primitives
/// arrive as-is.
fn relation_column(t: &Type, col: &ColumnRef, num_rows: usize) -> ColumnRef {
	match t {
		Type::Char => Arc::new(CharColumn {
			inner: col.clone(),
		}),
		Type::Int16 => Arc::new(Int128Column {
			inner: col.clone(),
		}),
		Type::Uint16 => Arc::new(Uint128Column {
			inner: col.clone(),
		}),
		_ if t.is_relation_primitive() => col.clone(),
		_ => {
			debug!(%t, "type not representable in a relation column");
			Arc::new(UnknownColumn {
				num_rows,
			})
		}
	}
}

/// A constant element produces columns with no physical backing.
fn const_column(children: &[SigElem], num_rows: usize) -> ColumnRef {
	if let Some(value) = builtin_value(children) {
		return Arc::new(LiteralColumn {
			value,
			num_rows,
		});
	}
	let cols = children
		.iter()
		.map(|child| match child {
			SigElem::Lit(value) => Arc::new(LiteralColumn {
				value: value.clone(),
				num_rows,
			}) as ColumnRef,
			SigElem::Const(grand) => const_column(grand, num_rows),
			other => {
				debug!(%other, "non-constant element in constant position");
				Arc::new(UnknownColumn {
					num_rows,
				})
			}
		})
		.collect();
	Arc::new(ConstColumn {
		cols,
		num_rows,
	})
}

/// A value compositor resolves against one physical column: either a
/// recognized builtin, or structurally against the column's sub-columns
/// (the column itself when storage is flat).
fn value_column(children: &[SigElem], col: &ColumnRef, num_rows: usize) -> ColumnRef {
	if let Some(built) = builtin_value_column(children, col, num_rows) {
		return built;
	}
	match col.as_tabular() {
		Some(tab) => {
			let mut sub = 0;
			let mut take = || {
				let taken = if sub < tab.num_cols() {
					Some(tab.column(sub))
				} else {
					None
				};
				sub += 1;
				taken
			};
			let cols = children
				.iter()
				.map(|child| match child {
					SigElem::Lit(value) => Arc::new(LiteralColumn {
						value: value.clone(),
						num_rows,
					}) as ColumnRef,
					SigElem::Const(grand) => const_column(grand, num_rows),
					SigElem::Type(t) => match take() {
						Some(c) => relation_column(t, &c, num_rows),
						None => Arc::new(UnknownColumn {
							num_rows,
						}),
					},
					SigElem::Value(grand) => match take() {
						Some(c) => value_column(grand, &c, num_rows),
						None => Arc::new(UnknownColumn {
							num_rows,
						}),
					},
				})
				.collect();
			Arc::new(ValueColumn {
				cols,
				num_rows,
			})
		}
		// Flat storage: every typed argument reads the same column.
		None => {
			let cols = children
				.iter()
				.map(|child| match child {
					SigElem::Lit(value) => Arc::new(LiteralColumn {
						value: value.clone(),
						num_rows,
					}) as ColumnRef,
					SigElem::Const(grand) => const_column(grand, num_rows),
					SigElem::Type(t) => relation_column(t, col, num_rows),
					SigElem::Value(grand) => value_column(grand, col, num_rows),
				})
				.collect();
			Arc::new(ValueColumn {
				cols,
				num_rows,
			})
		}
	}
}

/// An ordered, non-unique collection of relations.
#[derive(Clone, Default)]
pub struct RelationCollection(pub Vec<Relation>);

impl RelationCollection {
	/// The relations whose signatures start with the given terms; `"_"`
	/// matches any element.
	pub fn select(&self, terms: &[&str]) -> RelationCollection {
		RelationCollection(
			self.0.iter().filter(|r| r.sig.matches_prefix(terms)).cloned().collect(),
		)
	}

	pub fn union(&self) -> Relation {
		Relation::union(&self.0)
	}
}

impl Deref for RelationCollection {
	type Target = [Relation];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<Relation>> for RelationCollection {
	fn from(relations: Vec<Relation>) -> Self {
		RelationCollection(relations)
	}
}

impl FromIterator<Relation> for RelationCollection {
	fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
		RelationCollection(iter.into_iter().collect())
	}
}
