// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use relata::meta::{MetaNode, PrimitiveTag};
use relata::{Relation, TransactionResult, Value};

fn int64_batch(values: Vec<i64>) -> RecordBatch {
	let schema = Arc::new(Schema::new(vec![Field::new("v1", DataType::Int64, false)]));
	let cols: Vec<ArrayRef> = vec![Arc::new(Int64Array::from(values))];
	RecordBatch::try_new(schema, cols).unwrap()
}

fn empty_batch() -> RecordBatch {
	let options = RecordBatchOptions::new().with_row_count(Some(0));
	RecordBatch::try_new_with_options(Arc::new(Schema::empty()), vec![], &options).unwrap()
}

fn result_with(results: Vec<(&str, Vec<MetaNode>, RecordBatch)>) -> TransactionResult {
	let mut tx = TransactionResult::new();
	for (id, meta, record) in results {
		tx.add(id, &meta, record).unwrap();
	}
	tx
}

fn output(name: &str, tag: PrimitiveTag) -> Vec<MetaNode> {
	vec![
		MetaNode::symbol("output"),
		MetaNode::symbol(name),
		MetaNode::primitive(tag),
	]
}

#[test]
fn test_slice() {
	let tx = result_with(vec![("0.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![1, 2]))]);
	let relation = tx.relations().unwrap()[0].clone();

	let tail = relation.slice(2, None);
	assert_eq!(tail.num_cols(), 1);
	assert_eq!(tail.num_rows(), 2);
	assert_eq!(tail.row(0), vec![Value::Int8(1)]);
	assert_eq!(tail.signature().to_string(), "(Int8)");

	let middle = relation.slice(1, Some(2));
	assert_eq!(middle.strings(0), vec![":foo"]);
}

#[test]
fn test_union_identity() {
	let tx = result_with(vec![("0.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![1]))]);
	let relation = tx.relations().unwrap()[0].clone();

	let unioned = Relation::union(std::slice::from_ref(&relation));
	assert_eq!(unioned.num_rows(), relation.num_rows());
	assert_eq!(unioned.signature(), relation.signature());
}

#[test]
fn test_union_empty() {
	let unioned = Relation::union(&[]);
	assert_eq!(unioned.num_rows(), 0);
	assert_eq!(unioned.num_cols(), 0);
}

#[test]
fn test_union_concatenates_rows() {
	let tx = result_with(vec![
		("0.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![1, 2])),
		("1.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![3])),
	]);
	let unioned = tx.relations().unwrap().union();

	assert_eq!(unioned.num_rows(), 3);
	assert_eq!(unioned.num_cols(), 3);
	assert_eq!(unioned.row(2), vec![Value::symbol("output"), Value::symbol("foo"), Value::Int8(3)]);
	// Same element on both sides keeps the common type.
	assert_eq!(unioned.signature().to_string(), "(:output, :foo, Int8)");
}

#[test]
fn test_union_pads_narrow_relations() {
	let tx = result_with(vec![
		("0.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![1])),
		("1.arrow", vec![MetaNode::symbol("output")], empty_batch()),
	]);
	let unioned = tx.relations().unwrap().union();

	assert_eq!(unioned.num_cols(), 3);
	assert_eq!(unioned.num_rows(), 2);
	assert_eq!(unioned.row(1), vec![Value::symbol("output"), Value::Undefined, Value::Undefined]);
	// Columns whose sources disagree become mixed.
	assert_eq!(unioned.signature().to_string(), "(:output, Mixed, Mixed)");
}

#[test]
fn test_select_prefix() {
	let tx = result_with(vec![
		("0.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![1])),
		("1.arrow", output("bar", PrimitiveTag::Int64), int64_batch(vec![2])),
		("2.arrow", vec![MetaNode::symbol("rest")], empty_batch()),
	]);
	let relations = tx.relations().unwrap();

	assert_eq!(relations.select(&["output"]).len(), 2);
	assert_eq!(relations.select(&["output", "foo"]).len(), 1);
	assert_eq!(relations.select(&["_", "bar"]).len(), 1);
	assert_eq!(relations.select(&["missing"]).len(), 0);
	assert_eq!(relations.select(&[]).len(), 3);
}

#[test]
fn test_relations_in_arrival_order_and_cached() {
	let tx = result_with(vec![
		("1.arrow", output("b", PrimitiveTag::Int64), int64_batch(vec![1])),
		("0.arrow", output("a", PrimitiveTag::Int64), int64_batch(vec![2])),
	]);
	let first = tx.relations().unwrap();
	assert_eq!(first[0].strings(0)[1], ":b");
	assert_eq!(first[1].strings(0)[1], ":a");

	let again = tx.relations().unwrap();
	assert!(std::ptr::eq(first, again));
}

#[test]
fn test_signature_lookup() {
	let tx = result_with(vec![("0.arrow", output("foo", PrimitiveTag::Int64), int64_batch(vec![1]))]);
	assert_eq!(tx.signature("0.arrow").unwrap().to_string(), "(:output, :foo, Int8)");
	assert!(tx.signature("9.arrow").is_none());
	assert_eq!(tx.partitions().len(), 1);
	assert_eq!(tx.partition("0.arrow").unwrap().num_rows(), 1);
}
