use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ForumPost {
	pub id: i64,
	pub user_id: i64,
	pub content: String,
	pub mood: String,
	pub timestamp: NaiveDateTime,
}

pub async fn insert(pool: &SqlitePool, user_id: i64, content: &str, mood: &str) -> Result<ForumPost, sqlx::Error> {
	sqlx::query_as::<_, ForumPost>("INSERT INTO forum (user_id, content, mood) VALUES (?, ?, ?) RETURNING *")
		.bind(user_id)
		.bind(content)
		.bind(mood)
		.fetch_one(pool)
		.await
}

pub async fn for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<ForumPost>, sqlx::Error> {
	sqlx::query_as::<_, ForumPost>("SELECT * FROM forum WHERE user_id = ? ORDER BY timestamp DESC, id DESC")
		.bind(user_id)
		.fetch_all(pool)
		.await
}

pub async fn all(pool: &SqlitePool) -> Result<Vec<ForumPost>, sqlx::Error> {
	sqlx::query_as::<_, ForumPost>("SELECT * FROM forum ORDER BY timestamp DESC, id DESC").fetch_all(pool).await
}

pub async fn update(pool: &SqlitePool, post_id: i64, content: &str, mood: &str) -> Result<Option<ForumPost>, sqlx::Error> {
	sqlx::query_as::<_, ForumPost>("UPDATE forum SET content = ?, mood = ? WHERE id = ? RETURNING *")
		.bind(content)
		.bind(mood)
		.bind(post_id)
		.fetch_optional(pool)
		.await
}

pub async fn delete(pool: &SqlitePool, post_id: i64) -> Result<bool, sqlx::Error> {
	let result = sqlx::query("DELETE FROM forum WHERE id = ?").bind(post_id).execute(pool).await?;
	Ok(result.rows_affected() > 0)
}
