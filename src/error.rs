// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use thiserror::Error;

/// Errors surfaced while decoding transaction results.
///
/// Most malformed inputs degrade to unknown columns or values rather than
/// failing; only structurally unusable inputs produce an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
	/// A constant signature declared more typed slots than it carried
	/// folded literals for.
	#[error("constant signature expects {expected} literals, found {found}")]
	LiteralUnderflow { expected: usize, found: usize },

	/// A signature requires more physical columns than its partition
	/// holds.
	#[error("signature requires {required} partition columns, only {available} available")]
	ColumnCountMismatch { required: usize, available: usize },
}
