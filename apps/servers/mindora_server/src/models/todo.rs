use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TodoTask {
	pub id: i64,
	pub user_id: i64,
	pub title: String,
	pub description: String,
	pub priority: String,
	#[serde(rename = "dueDate")]
	pub due_date: Option<String>,
	#[serde(rename = "createdAt")]
	pub created_at: String,
	#[serde(rename = "isCompleted")]
	pub is_completed: bool,
}

#[derive(Debug, Clone)]
pub struct TaskFields {
	pub title: String,
	pub description: String,
	pub priority: String,
	pub due_date: Option<String>,
}

pub async fn for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<TodoTask>, sqlx::Error> {
	sqlx::query_as::<_, TodoTask>("SELECT * FROM todo_list WHERE user_id = ? ORDER BY id ASC")
		.bind(user_id)
		.fetch_all(pool)
		.await
}

pub async fn insert(pool: &SqlitePool, user_id: i64, fields: &TaskFields, created_at: &str) -> Result<TodoTask, sqlx::Error> {
	sqlx::query_as::<_, TodoTask>(
		"INSERT INTO todo_list (user_id, title, description, priority, due_date, created_at, is_completed) VALUES (?, ?, ?, ?, ?, ?, 0) RETURNING *",
	)
	.bind(user_id)
	.bind(&fields.title)
	.bind(&fields.description)
	.bind(&fields.priority)
	.bind(&fields.due_date)
	.bind(created_at)
	.fetch_one(pool)
	.await
}

/// Only the owner's task is touched; `None` means no such task for that user.
pub async fn update(pool: &SqlitePool, user_id: i64, task_id: i64, fields: &TaskFields) -> Result<Option<TodoTask>, sqlx::Error> {
	sqlx::query_as::<_, TodoTask>("UPDATE todo_list SET title = ?, description = ?, priority = ?, due_date = ? WHERE id = ? AND user_id = ? RETURNING *")
		.bind(&fields.title)
		.bind(&fields.description)
		.bind(&fields.priority)
		.bind(&fields.due_date)
		.bind(task_id)
		.bind(user_id)
		.fetch_optional(pool)
		.await
}

pub async fn complete(pool: &SqlitePool, user_id: i64, task_id: i64) -> Result<Option<TodoTask>, sqlx::Error> {
	sqlx::query_as::<_, TodoTask>("UPDATE todo_list SET is_completed = 1 WHERE id = ? AND user_id = ? RETURNING *")
		.bind(task_id)
		.bind(user_id)
		.fetch_optional(pool)
		.await
}

pub async fn delete(pool: &SqlitePool, user_id: i64, task_id: i64) -> Result<bool, sqlx::Error> {
	let result = sqlx::query("DELETE FROM todo_list WHERE id = ? AND user_id = ?").bind(task_id).bind(user_id).execute(pool).await?;
	Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::memory_pool;

	fn fields(title: &str) -> TaskFields {
		TaskFields {
			title: title.to_string(),
			description: "desc".to_string(),
			priority: "high".to_string(),
			due_date: None,
		}
	}

	#[tokio::test]
	async fn test_tasks_are_scoped_to_owner() {
		let pool = memory_pool().await;
		let task = insert(&pool, 1, &fields("walk"), "2024-06-03T10:00:00Z").await.unwrap();

		assert!(update(&pool, 2, task.id, &fields("stolen")).await.unwrap().is_none());
		assert!(complete(&pool, 2, task.id).await.unwrap().is_none());
		assert!(!delete(&pool, 2, task.id).await.unwrap());

		let done = complete(&pool, 1, task.id).await.unwrap().unwrap();
		assert!(done.is_completed);
		assert_eq!(done.title, "walk");

		assert!(delete(&pool, 1, task.id).await.unwrap());
		assert!(for_user(&pool, 1).await.unwrap().is_empty());
	}
}
