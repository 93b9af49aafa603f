// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (day 1 of the Rata Die convention) and the Unix
/// epoch. The engine transmits dates as Rata Die day counts, so day 719163
/// is 1970-01-01.
pub const EPOCH_START_DAYS: i64 = 719163;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds between day 1 of year 1 and the Unix epoch.
pub const EPOCH_START_MILLIS: i64 = EPOCH_START_DAYS * DAY_MILLIS;

/// A calendar date (year, month, day) without time information, always
/// interpreted in UTC.
///
/// Internally stored as days since the Unix epoch (1970-01-01); negative
/// values represent earlier dates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
	days_since_epoch: i64,
}

// Calendar conversion, based on Howard Hinnant's date algorithms.
impl Date {
	#[inline]
	fn is_leap_year(year: i64) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	#[inline]
	fn days_in_month(year: i64, month: u32) -> u32 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}

	fn ymd_to_days(year: i64, month: u32, day: u32) -> Option<i64> {
		if month < 1 || month > 12 || day < 1 || day > Self::days_in_month(year, month) {
			return None;
		}

		// Shift so that March is month 0 of the civil year.
		let (y, m) = if month <= 2 {
			(year - 1, month as i64 + 9)
		} else {
			(year, month as i64 - 3)
		};

		let era = if y >= 0 {
			y
		} else {
			y - 399
		} / 400;
		let yoe = y - era * 400; // [0, 399]
		let doy = (153 * m + 2) / 5 + day as i64 - 1; // [0, 365]
		let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]

		Some(era * 146097 + doe - 719468)
	}

	pub(crate) fn days_to_ymd(days: i64) -> (i64, u32, u32) {
		let days_since_ce = days + 719468;

		let era = if days_since_ce >= 0 {
			days_since_ce
		} else {
			days_since_ce - 146096
		} / 146097;
		let doe = days_since_ce - era * 146097; // [0, 146096]
		let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
		let y = yoe + era * 400;
		let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
		let mp = (5 * doy + 2) / 153; // [0, 11]
		let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
		let m = if mp < 10 {
			mp + 3
		} else {
			mp - 9
		}; // [1, 12]
		let year = if m <= 2 {
			y + 1
		} else {
			y
		};

		(year, m as u32, d as u32)
	}
}

impl Date {
	pub fn new(year: i64, month: u32, day: u32) -> Option<Self> {
		Self::ymd_to_days(year, month, day).map(|days_since_epoch| Self {
			days_since_epoch,
		})
	}

	/// The date corresponding to the given Rata Die day count.
	pub fn from_rata_die(days: i64) -> Self {
		Self {
			days_since_epoch: days - EPOCH_START_DAYS,
		}
	}

	/// The Rata Die day count of this date.
	pub fn rata_die(&self) -> i64 {
		self.days_since_epoch + EPOCH_START_DAYS
	}

	pub fn days_since_epoch(&self) -> i64 {
		self.days_since_epoch
	}

	pub fn year(&self) -> i64 {
		Self::days_to_ymd(self.days_since_epoch).0
	}

	pub fn month(&self) -> u32 {
		Self::days_to_ymd(self.days_since_epoch).1
	}

	pub fn day(&self) -> u32 {
		Self::days_to_ymd(self.days_since_epoch).2
	}
}

impl Display for Date {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let (y, m, d) = Self::days_to_ymd(self.days_since_epoch);
		write!(f, "{:04}-{:02}-{:02}", y, m, d)
	}
}
