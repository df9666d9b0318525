use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

pub const DEFAULT_MOOD: &str = "neutral";
pub const DEFAULT_MOOD_COLOR: &str = "#EEDCF9";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Journal {
	pub j_id: i64,
	pub user_id: i64,
	pub title: String,
	pub information: String,
	pub date: NaiveDate,
	pub time: String,
	pub mood: String,
	pub mood_color: String,
}

#[derive(Debug, Clone)]
pub struct NewJournal {
	pub user_id: i64,
	pub title: String,
	pub information: String,
	pub date: NaiveDate,
	pub time: String,
	pub mood: Option<String>,
	pub mood_color: Option<String>,
}

pub async fn insert(pool: &SqlitePool, journal: &NewJournal) -> Result<Journal, sqlx::Error> {
	sqlx::query_as::<_, Journal>("INSERT INTO journal (user_id, title, information, date, time, mood, mood_color) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *")
		.bind(journal.user_id)
		.bind(&journal.title)
		.bind(&journal.information)
		.bind(journal.date)
		.bind(&journal.time)
		.bind(journal.mood.as_deref().unwrap_or(DEFAULT_MOOD))
		.bind(journal.mood_color.as_deref().unwrap_or(DEFAULT_MOOD_COLOR))
		.fetch_one(pool)
		.await
}

/// Newest first.
pub async fn for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Journal>, sqlx::Error> {
	sqlx::query_as::<_, Journal>("SELECT * FROM journal WHERE user_id = ? ORDER BY date DESC, time DESC, j_id DESC")
		.bind(user_id)
		.fetch_all(pool)
		.await
}

pub async fn update(pool: &SqlitePool, id: i64, title: &str, information: &str, mood: &str, mood_color: Option<&str>) -> Result<Option<Journal>, sqlx::Error> {
	sqlx::query_as::<_, Journal>("UPDATE journal SET title = ?, information = ?, mood = ?, mood_color = ? WHERE j_id = ? RETURNING *")
		.bind(title)
		.bind(information)
		.bind(mood)
		.bind(mood_color.unwrap_or(DEFAULT_MOOD_COLOR))
		.bind(id)
		.fetch_optional(pool)
		.await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
	let result = sqlx::query("DELETE FROM journal WHERE j_id = ?").bind(id).execute(pool).await?;
	Ok(result.rows_affected() > 0)
}
