// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::{
	cmp::Ordering,
	fmt::{self, Display, Formatter},
	hash::{Hash, Hasher},
	ops::Deref,
};

use half::f16;
use serde::{Deserialize, Serialize};

macro_rules! ordered_float {
	($name:ident, $float:ty, $bits:ty) => {
		/// A totally ordered wrapper so float-carrying values can be
		/// compared and hashed. Ordering follows the IEEE total order
		/// of the underlying bit pattern.
		#[repr(transparent)]
		#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize)]
		pub struct $name(pub $float);

		impl $name {
			pub fn value(&self) -> $float {
				self.0
			}

			#[inline]
			fn key(&self) -> $bits {
				let bits = self.0.to_bits();
				let sign = 1 << (<$bits>::BITS - 1);
				if bits & sign != 0 {
					!bits
				} else {
					bits | sign
				}
			}
		}

		impl Deref for $name {
			type Target = $float;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				Display::fmt(&self.0, f)
			}
		}

		impl From<$float> for $name {
			fn from(v: $float) -> Self {
				$name(v)
			}
		}

		impl From<$name> for $float {
			fn from(v: $name) -> Self {
				v.0
			}
		}

		impl PartialEq for $name {
			fn eq(&self, other: &Self) -> bool {
				self.key() == other.key()
			}
		}

		impl Eq for $name {}

		impl PartialOrd for $name {
			fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
				Some(self.cmp(other))
			}
		}

		impl Ord for $name {
			fn cmp(&self, other: &Self) -> Ordering {
				self.key().cmp(&other.key())
			}
		}

		impl Hash for $name {
			fn hash<H: Hasher>(&self, state: &mut H) {
				self.0.to_bits().hash(state);
			}
		}
	};
}

ordered_float!(OrderedF16, f16, u16);
ordered_float!(OrderedF32, f32, u32);
ordered_float!(OrderedF64, f64, u64);
