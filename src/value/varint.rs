// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::fmt::{self, Display, Formatter};

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// An arbitrary-precision signed integer, used for 128-bit values carried
/// on the wire as a pair of 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarInt(pub BigInt);

impl VarInt {
	/// Reconstructs a signed 128-bit value from its low and high words.
	/// The high word's sign bit determines the overall sign; the whole
	/// 128-bit magnitude is negated accordingly.
	pub fn from_words(lo: u64, hi: u64) -> Self {
		let magnitude = (BigInt::from(hi) << 64usize) + BigInt::from(lo);
		if (hi as i64) < 0 {
			VarInt(-magnitude)
		} else {
			VarInt(magnitude)
		}
	}

	pub fn inner(&self) -> &BigInt {
		&self.0
	}
}

impl From<BigInt> for VarInt {
	fn from(v: BigInt) -> Self {
		VarInt(v)
	}
}

impl From<i64> for VarInt {
	fn from(v: i64) -> Self {
		VarInt(BigInt::from(v))
	}
}

impl Display for VarInt {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// An arbitrary-precision unsigned integer, used for 128-bit values carried
/// on the wire as a pair of 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarUint(pub BigInt);

impl VarUint {
	/// Reconstructs an unsigned 128-bit value from its low and high words.
	pub fn from_words(lo: u64, hi: u64) -> Self {
		VarUint((BigInt::from(hi) << 64usize) + BigInt::from(lo))
	}

	pub fn inner(&self) -> &BigInt {
		&self.0
	}
}

impl From<BigInt> for VarUint {
	fn from(v: BigInt) -> Self {
		VarUint(v)
	}
}

impl From<u64> for VarUint {
	fn from(v: u64) -> Self {
		VarUint(BigInt::from(v))
	}
}

impl Display for VarUint {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_words_positive() {
		assert_eq!(VarInt::from_words(42, 0).to_string(), "42");
		assert_eq!(VarInt::from_words(0, 1).to_string(), "18446744073709551616");
	}

	#[test]
	fn test_from_words_negated_magnitude() {
		// The sign bit of the high word negates the whole magnitude.
		let v = VarInt::from_words(5, 0x8000_0000_0000_0000);
		let expected = -((BigInt::from(0x8000_0000_0000_0000u64) << 64usize) + BigInt::from(5));
		assert_eq!(v.inner(), &expected);
	}

	#[test]
	fn test_unsigned_from_words() {
		let v = VarUint::from_words(u64::MAX, u64::MAX);
		assert_eq!(v.to_string(), "340282366920938463463374607431768211455");
	}
}
