use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct SleepRecord {
	pub id: i64,
	pub user_id: i64,
	pub date: NaiveDate,
	pub sleep_hours: f64,
}

pub async fn insert(pool: &SqlitePool, user_id: i64, date: NaiveDate, sleep_hours: f64) -> Result<SleepRecord, sqlx::Error> {
	sqlx::query_as::<_, SleepRecord>("INSERT INTO sleep_tracker (user_id, date, sleep_hours) VALUES (?, ?, ?) RETURNING *")
		.bind(user_id)
		.bind(date)
		.bind(sleep_hours)
		.fetch_one(pool)
		.await
}

pub async fn latest(pool: &SqlitePool, user_id: i64) -> Result<Option<SleepRecord>, sqlx::Error> {
	sqlx::query_as::<_, SleepRecord>("SELECT * FROM sleep_tracker WHERE user_id = ? ORDER BY date DESC, id DESC LIMIT 1")
		.bind(user_id)
		.fetch_optional(pool)
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::memory_pool;

	#[tokio::test]
	async fn test_latest_is_by_date() {
		let pool = memory_pool().await;
		insert(&pool, 1, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(), 6.5).await.unwrap();
		insert(&pool, 1, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), 8.0).await.unwrap();

		let record = latest(&pool, 1).await.unwrap().unwrap();

		assert!((record.sleep_hours - 6.5).abs() < f64::EPSILON);
		assert!(latest(&pool, 2).await.unwrap().is_none());
	}
}
