use super::model::{MoodEntry, MoodRecord, NewMoodEntry};
use super::queries;
use super::schema;
use super::streak::current_streak;
use chrono::{Datelike, Months, NaiveDate};
use sqlx::{Error, SqlitePool};

#[derive(Clone)]
pub struct MoodTrackerRepository {
	pub pool: SqlitePool,
}

impl MoodTrackerRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn init_schema(&self) -> Result<(), Error> {
		schema::init_schema(&self.pool).await
	}

	pub async fn record(&self, entry: NewMoodEntry) -> Result<MoodRecord, Error> {
		queries::insert_mood_entry(&self.pool, &entry).await
	}

	pub async fn latest(&self, user_id: i64) -> Result<Option<MoodRecord>, Error> {
		queries::fetch_latest(&self.pool, user_id).await
	}

	pub async fn latest_on(&self, user_id: i64, date: NaiveDate) -> Result<Option<MoodRecord>, Error> {
		queries::fetch_latest_on(&self.pool, user_id, date).await
	}

	/// Inclusive day range, oldest first.
	pub async fn between(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<MoodEntry>, Error> {
		queries::fetch_between(&self.pool, user_id, from, to).await
	}

	/// Every entry of a calendar month, oldest first. An impossible month yields nothing.
	pub async fn month(&self, user_id: i64, year: i32, month: u32) -> Result<Vec<MoodEntry>, Error> {
		let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
			return Ok(vec![]);
		};
		let Some(last) = first.checked_add_months(Months::new(1)).and_then(|next| next.pred_opt()) else {
			return Ok(vec![]);
		};

		queries::fetch_between(&self.pool, user_id, first, last).await
	}

	pub async fn current_streak(&self, user_id: i64) -> Result<i64, Error> {
		let dates = queries::fetch_distinct_dates(&self.pool, user_id).await?;
		Ok(current_streak(&dates))
	}
}

/// 1-based, Monday-start week of the month that `date` falls in.
pub fn week_of_month(date: NaiveDate) -> u32 {
	let first = date.with_day(1).unwrap_or(date);
	let offset = first.weekday().num_days_from_monday();
	(date.day() + offset - 1) / 7 + 1
}
