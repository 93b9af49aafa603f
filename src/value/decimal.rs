// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::fmt::{self, Display, Formatter};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// An arbitrary-precision scaled decimal.
///
/// `Decimal::new(m, digits)` is exactly `m × 10^(−digits)`; no floating
/// point is involved at any step.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Decimal(BigDecimal);

impl Decimal {
	pub fn new(mantissa: i64, digits: i64) -> Self {
		Self::from_bigint(BigInt::from(mantissa), digits)
	}

	pub fn from_bigint(mantissa: BigInt, digits: i64) -> Self {
		Decimal(BigDecimal::new(mantissa, digits))
	}

	pub fn inner(&self) -> &BigDecimal {
		&self.0
	}
}

impl From<BigDecimal> for Decimal {
	fn from(v: BigDecimal) -> Self {
		Decimal(v)
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}
