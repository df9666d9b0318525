use serde::Serialize;
use serde_json::{json, Value};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
struct ChatRow {
	id: i64,
	user_id: i64,
	conversation: Option<String>,
	date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatConversation {
	pub id: i64,
	pub user_id: i64,
	pub conversation: Value,
	pub date: String,
}

impl From<ChatRow> for ChatConversation {
	fn from(row: ChatRow) -> Self {
		let conversation = row
			.conversation
			.and_then(|raw| serde_json::from_str(&raw).ok())
			.unwrap_or_else(|| json!({ "messages": [] }));

		Self {
			id: row.id,
			user_id: row.user_id,
			conversation,
			date: row.date,
		}
	}
}

pub async fn save(pool: &SqlitePool, user_id: i64, conversation: &Value, date: &str) -> Result<ChatConversation, sqlx::Error> {
	let row = sqlx::query_as::<_, ChatRow>("INSERT INTO chatbot (user_id, conversation, date) VALUES (?, ?, ?) RETURNING *")
		.bind(user_id)
		.bind(conversation.to_string())
		.bind(date)
		.fetch_one(pool)
		.await?;

	Ok(row.into())
}

/// Oldest first.
pub async fn history(pool: &SqlitePool, user_id: i64) -> Result<Vec<ChatConversation>, sqlx::Error> {
	let rows = sqlx::query_as::<_, ChatRow>("SELECT * FROM chatbot WHERE user_id = ? ORDER BY date ASC, id ASC")
		.bind(user_id)
		.fetch_all(pool)
		.await?;

	Ok(rows.into_iter().map(ChatConversation::from).collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::memory_pool;

	#[tokio::test]
	async fn test_history_round_trip_and_null_conversation() {
		let pool = memory_pool().await;
		save(&pool, 4, &json!({ "messages": [{ "role": "user", "text": "hi" }] }), "2024-06-03").await.unwrap();
		sqlx::query("INSERT INTO chatbot (user_id, conversation, date) VALUES (4, NULL, '2024-06-04')").execute(&pool).await.unwrap();

		let history = history(&pool, 4).await.unwrap();

		assert_eq!(history.len(), 2);
		assert_eq!(history[0].conversation["messages"][0]["text"], "hi");
		assert_eq!(history[1].conversation, json!({ "messages": [] }));
	}

	#[tokio::test]
	async fn test_empty_history() {
		let pool = memory_pool().await;
		assert!(history(&pool, 4).await.unwrap().is_empty());
	}
}
