use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// The single definition of a user's calendar day: a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserClock {
	offset: FixedOffset,
}

impl UserClock {
	pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
		FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
	}

	pub fn now(&self) -> DateTime<FixedOffset> {
		Utc::now().with_timezone(&self.offset)
	}

	pub fn today(&self) -> NaiveDate {
		self.now().date_naive()
	}

	/// Reads `YYYY-MM-DD`, an RFC 3339 timestamp (moved into the user's day),
	/// or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` already in local time.
	pub fn local_day(&self, raw: &str) -> Option<NaiveDate> {
		let raw = raw.trim();

		if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
			return Some(date);
		}

		if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
			return Some(instant.with_timezone(&self.offset).date_naive());
		}

		NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|local| local.date())
	}
}

impl Default for UserClock {
	/// UTC+06:00
	fn default() -> Self {
		Self {
			offset: FixedOffset::east_opt(6 * 3600).unwrap_or_else(|| Utc.fix()),
		}
	}
}
