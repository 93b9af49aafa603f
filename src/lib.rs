// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

//! Client-side decoding of typed relational transaction results.
//!
//! A transaction response carries, per result identifier, a metadata
//! tree describing the result's type signature and an Arrow record
//! holding its data. This crate turns the two back into strongly-typed
//! relations:
//!
//! - [`Signature::interpret`] folds a metadata tree into a flat
//!   signature, restoring constant literals into their typed slots;
//! - [`Partition`] adapts an Arrow record into randomly-indexable
//!   columns, dispatching on physical storage alone;
//! - [`Relation::assemble`] resolves a signature against a partition,
//!   reconstructing semantic values (dates, decimals, rationals,
//!   128-bit integers) from their storage encodings;
//! - [`TransactionResult`] collects results per transaction and exposes
//!   the assembled [`RelationCollection`], with signature-prefix
//!   selection and row-wise union.
//!
//! Malformed inputs degrade to `unknown` placeholders wherever a
//! partial result is still usable; only structurally unusable inputs
//! surface a [`DecodeError`].

mod column;
mod error;
pub mod meta;
mod partition;
mod relation;
mod result;
mod signature;
pub mod value;

pub use column::{Column, ColumnRef, Tabular, physical_column};
pub use error::DecodeError;
pub use partition::Partition;
pub use relation::{Relation, RelationCollection};
pub use result::TransactionResult;
pub use signature::{SigElem, Signature};
pub use value::{Type, Value};
