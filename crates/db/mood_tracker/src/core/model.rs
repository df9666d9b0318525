use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// One mood log for a single user-local day.
///
/// `mood_level` is `None` when the stored value is missing or not numeric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
	pub date: NaiveDate,
	pub mood_status: String,
	pub mood_level: Option<i64>,
	#[serde(default)]
	pub reason: Vec<String>,
}

impl MoodEntry {
	pub fn new(date: NaiveDate, mood_status: impl Into<String>, mood_level: i64) -> Self {
		Self {
			date,
			mood_status: mood_status.into(),
			mood_level: Some(mood_level),
			reason: Vec::new(),
		}
	}

	pub fn with_reason<I, S>(mut self, reason: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.reason = reason.into_iter().map(Into::into).collect();
		self
	}
}

/// A persisted row of the `mood_tracker` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodRecord {
	pub id: i64,
	pub user_id: i64,
	#[serde(flatten)]
	pub entry: MoodEntry,
	pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMoodEntry {
	pub user_id: i64,
	pub date: NaiveDate,
	pub mood_status: String,
	pub mood_level: i64,
	#[serde(default)]
	pub reason: Vec<String>,
}

impl<'r> FromRow<'r, SqliteRow> for MoodEntry {
	fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
		let reason: Option<String> = row.try_get("reason").ok().flatten();

		Ok(Self {
			date: row.try_get("date")?,
			mood_status: row.try_get("mood_status")?,
			mood_level: decode_level(row),
			reason: decode_reason(reason.as_deref()),
		})
	}
}

impl<'r> FromRow<'r, SqliteRow> for MoodRecord {
	fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			user_id: row.try_get("user_id")?,
			entry: MoodEntry::from_row(row)?,
			created_at: row.try_get("created_at").ok().flatten(),
		})
	}
}

// SQLite keeps whatever the writer stored, so a level may come back as text.
fn decode_level(row: &SqliteRow) -> Option<i64> {
	if let Ok(level) = row.try_get::<Option<i64>, _>("mood_level") {
		return level;
	}

	row
		.try_get::<Option<String>, _>("mood_level")
		.ok()
		.flatten()
		.and_then(|raw| raw.trim().parse::<i64>().ok())
}

/// Normalizes the stored `reason` column into a tag list.
///
/// NULL or blank becomes an empty list, a JSON array keeps its scalar members,
/// and any other scalar is wrapped into a single-element list.
pub fn decode_reason(raw: Option<&str>) -> Vec<String> {
	let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
		return Vec::new();
	};

	match serde_json::from_str::<Value>(raw) {
		Ok(Value::Array(items)) => items.into_iter().filter_map(scalar_to_tag).collect(),
		Ok(Value::Null) => Vec::new(),
		Ok(other) => scalar_to_tag(other).into_iter().collect(),
		Err(_) => vec![raw.to_string()],
	}
}

fn scalar_to_tag(value: Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}
