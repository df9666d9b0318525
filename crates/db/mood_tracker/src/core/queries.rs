use crate::core::model::{MoodEntry, MoodRecord, NewMoodEntry};
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{Error, SqlitePool};

const RECORD_COLUMNS: &str = "id, user_id, date, mood_status, mood_level, reason, created_at";

pub async fn insert_mood_entry(pool: &SqlitePool, entry: &NewMoodEntry) -> Result<MoodRecord, Error> {
	let sql = format!(
		r#"
        INSERT INTO mood_tracker (user_id, mood_status, mood_level, reason, date)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {RECORD_COLUMNS}
        "#
	);

	sqlx::query_as::<_, MoodRecord>(&sql)
		.bind(entry.user_id)
		.bind(&entry.mood_status)
		.bind(entry.mood_level)
		.bind(Json(&entry.reason))
		.bind(entry.date)
		.fetch_one(pool)
		.await
}

pub async fn fetch_latest(pool: &SqlitePool, user_id: i64) -> Result<Option<MoodRecord>, Error> {
	let sql = format!(
		r#"
        SELECT {RECORD_COLUMNS}
        FROM mood_tracker
        WHERE user_id = ?
        ORDER BY date DESC, id DESC
        LIMIT 1
        "#
	);

	sqlx::query_as::<_, MoodRecord>(&sql).bind(user_id).fetch_optional(pool).await
}

pub async fn fetch_latest_on(pool: &SqlitePool, user_id: i64, date: NaiveDate) -> Result<Option<MoodRecord>, Error> {
	let sql = format!(
		r#"
        SELECT {RECORD_COLUMNS}
        FROM mood_tracker
        WHERE user_id = ? AND date = ?
        ORDER BY id DESC
        LIMIT 1
        "#
	);

	sqlx::query_as::<_, MoodRecord>(&sql).bind(user_id).bind(date).fetch_optional(pool).await
}

/// Entries with `from <= date <= to`, oldest first and insertion order within a day.
pub async fn fetch_between(pool: &SqlitePool, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<MoodEntry>, Error> {
	sqlx::query_as::<_, MoodEntry>(
		r#"
        SELECT date, mood_status, mood_level, reason
        FROM mood_tracker
        WHERE user_id = ? AND date >= ? AND date <= ?
        ORDER BY date ASC, id ASC
        "#,
	)
	.bind(user_id)
	.bind(from)
	.bind(to)
	.fetch_all(pool)
	.await
}

pub async fn fetch_distinct_dates(pool: &SqlitePool, user_id: i64) -> Result<Vec<NaiveDate>, Error> {
	sqlx::query_scalar::<_, NaiveDate>("SELECT DISTINCT date FROM mood_tracker WHERE user_id = ? ORDER BY date ASC")
		.bind(user_id)
		.fetch_all(pool)
		.await
}
