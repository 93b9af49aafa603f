// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::error::DecodeError;
use crate::meta::MetaNode;
use crate::partition::Partition;
use crate::relation::{Relation, RelationCollection};
use crate::signature::Signature;

/// The decoded results of one transaction: interpreted signatures and
/// partitions keyed by result identifier, in arrival order.
///
/// The upstream response decoder fills this container; relations are
/// assembled once on first access and cached.
#[derive(Default)]
pub struct TransactionResult {
	sigs: IndexMap<String, Signature>,
	partitions: IndexMap<String, Arc<Partition>>,
	relations: OnceCell<RelationCollection>,
}

impl TransactionResult {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one result: its metadata tree and its partition record.
	pub fn add(
		&mut self,
		id: impl Into<String>,
		meta: &[MetaNode],
		record: RecordBatch,
	) -> Result<(), DecodeError> {
		let id = id.into();
		self.sigs.insert(id.clone(), Signature::interpret(meta)?);
		self.partitions.insert(id, Arc::new(Partition::new(record)));
		Ok(())
	}

	pub fn add_metadata(
		&mut self,
		id: impl Into<String>,
		meta: &[MetaNode],
	) -> Result<(), DecodeError> {
		self.sigs.insert(id.into(), Signature::interpret(meta)?);
		Ok(())
	}

	pub fn add_partition(&mut self, id: impl Into<String>, record: RecordBatch) {
		self.partitions.insert(id.into(), Arc::new(Partition::new(record)));
	}

	pub fn signature(&self, id: &str) -> Option<&Signature> {
		self.sigs.get(id)
	}

	pub fn signatures(&self) -> &IndexMap<String, Signature> {
		&self.sigs
	}

	pub fn partition(&self, id: &str) -> Option<&Arc<Partition>> {
		self.partitions.get(id)
	}

	pub fn partitions(&self) -> &IndexMap<String, Arc<Partition>> {
		&self.partitions
	}

	/// Assembles one relation per result that has both a signature and
	/// a partition, in arrival order. The collection is built once.
	pub fn relations(&self) -> Result<&RelationCollection, DecodeError> {
		self.relations.get_or_try_init(|| {
			self.sigs
				.iter()
				.filter_map(|(id, sig)| {
					self.partitions.get(id).map(|p| Relation::assemble(sig, p))
				})
				.collect()
		})
	}
}
