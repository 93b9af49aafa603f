// Copyright (c) relata.dev 2025
// This file is licensed under the MIT

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::date::{DAY_MILLIS, Date, EPOCH_START_MILLIS};

/// A calendar timestamp with millisecond precision, always in UTC.
///
/// Internally stored as milliseconds since the Unix epoch; negative values
/// represent earlier instants.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTime {
	millis_since_epoch: i64,
}

impl DateTime {
	pub fn from_millis(millis_since_epoch: i64) -> Self {
		Self {
			millis_since_epoch,
		}
	}

	/// The timestamp corresponding to the given milliseconds since day 1
	/// of year 1 (the Rata Die origin).
	pub fn from_rata_millis(millis: i64) -> Self {
		Self {
			millis_since_epoch: millis - EPOCH_START_MILLIS,
		}
	}

	/// The timestamp at midnight UTC of the given Rata Die day count.
	pub fn from_rata_die(days: i64) -> Self {
		Self::from_rata_millis(days * DAY_MILLIS)
	}

	/// Milliseconds since day 1 of year 1.
	pub fn rata_millis(&self) -> i64 {
		self.millis_since_epoch + EPOCH_START_MILLIS
	}

	pub fn millis_since_epoch(&self) -> i64 {
		self.millis_since_epoch
	}

	/// The calendar date this instant falls on.
	pub fn date(&self) -> Date {
		Date::from_rata_die(self.rata_millis().div_euclid(DAY_MILLIS))
	}

	fn time_of_day(&self) -> (i64, i64, i64, i64) {
		let day_millis = self.millis_since_epoch.rem_euclid(DAY_MILLIS);
		let hour = day_millis / 3_600_000;
		let minute = day_millis % 3_600_000 / 60_000;
		let second = day_millis % 60_000 / 1000;
		(hour, minute, second, day_millis % 1000)
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let days = self.millis_since_epoch.div_euclid(DAY_MILLIS);
		let (y, m, d) = Date::days_to_ymd(days);
		let (hour, minute, second, milli) = self.time_of_day();
		if milli == 0 {
			write!(f, "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z", y, m, d, hour, minute, second)
		} else {
			write!(
				f,
				"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
				y, m, d, hour, minute, second, milli
			)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::date::EPOCH_START_DAYS;

	#[test]
	fn test_epoch_midnight() {
		let ts = DateTime::from_rata_die(EPOCH_START_DAYS);
		assert_eq!(ts.millis_since_epoch(), 0);
		assert_eq!(ts.to_string(), "1970-01-01T00:00:00Z");
	}

	#[test]
	fn test_millis_rendering() {
		let ts = DateTime::from_millis(86_400_000 + 3_661_500);
		assert_eq!(ts.to_string(), "1970-01-02T01:01:01.500Z");
	}

	#[test]
	fn test_before_epoch() {
		let ts = DateTime::from_millis(-1000);
		assert_eq!(ts.to_string(), "1969-12-31T23:59:59Z");
	}

	#[test]
	fn test_rata_round_trip() {
		let ts = DateTime::from_rata_millis(62_135_596_800_123);
		assert_eq!(ts.rata_millis(), 62_135_596_800_123);
	}

	#[test]
	fn test_date_component() {
		let ts = DateTime::from_rata_die(EPOCH_START_DAYS + 31);
		assert_eq!(ts.date().to_string(), "1970-02-01");
	}
}
