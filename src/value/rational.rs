// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::fmt::{self, Display, Formatter};

use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

/// An exact rational value, kept in reduced form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rational(BigRational);

impl Rational {
	/// Builds `numer / denom`, reduced. A zero denominator has no rational
	/// value and yields `None`.
	pub fn new(numer: BigInt, denom: BigInt) -> Option<Self> {
		use num_traits::Zero;
		if denom.is_zero() {
			return None;
		}
		Some(Rational(BigRational::new(numer, denom)))
	}

	pub fn from_i64(numer: i64, denom: i64) -> Option<Self> {
		Self::new(BigInt::from(numer), BigInt::from(denom))
	}

	pub fn inner(&self) -> &BigRational {
		&self.0
	}
}

impl From<BigRational> for Rational {
	fn from(v: BigRational) -> Self {
		Rational(v)
	}
}

impl Display for Rational {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reduced() {
		let r = Rational::from_i64(2, 4).unwrap();
		assert_eq!(r.to_string(), "1/2");
		assert_eq!(r, Rational::from_i64(1, 2).unwrap());
	}

	#[test]
	fn test_negative_denominator() {
		assert_eq!(Rational::from_i64(1, -2).unwrap().to_string(), "-1/2");
	}

	#[test]
	fn test_zero_denominator() {
		assert!(Rational::from_i64(1, 0).is_none());
	}
}
