use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct StressRecord {
	pub id: i64,
	pub user_id: i64,
	pub stress_level: i64,
	pub cause: Option<String>,
	pub logged_symptoms: Option<String>,
	pub notes: Option<String>,
	pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewStressRecord {
	pub user_id: i64,
	pub stress_level: i64,
	pub cause: Option<String>,
	pub logged_symptoms: Option<String>,
	pub notes: Option<String>,
	pub date: NaiveDate,
}

/// One day of the weekly stress overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStress {
	pub day: NaiveDate,
	pub avg_stress_level: f64,
	pub causes: Vec<String>,
	pub symptoms: Vec<String>,
}

pub async fn insert(pool: &SqlitePool, record: &NewStressRecord) -> Result<StressRecord, sqlx::Error> {
	sqlx::query_as::<_, StressRecord>(
		"INSERT INTO stress_tracker (user_id, stress_level, cause, logged_symptoms, notes, date) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
	)
	.bind(record.user_id)
	.bind(record.stress_level)
	.bind(&record.cause)
	.bind(&record.logged_symptoms)
	.bind(&record.notes)
	.bind(record.date)
	.fetch_one(pool)
	.await
}

pub async fn latest(pool: &SqlitePool, user_id: i64) -> Result<Option<StressRecord>, sqlx::Error> {
	sqlx::query_as::<_, StressRecord>("SELECT * FROM stress_tracker WHERE user_id = ? ORDER BY date DESC, id DESC LIMIT 1")
		.bind(user_id)
		.fetch_optional(pool)
		.await
}

pub async fn latest_on(pool: &SqlitePool, user_id: i64, date: NaiveDate) -> Result<Option<StressRecord>, sqlx::Error> {
	sqlx::query_as::<_, StressRecord>("SELECT * FROM stress_tracker WHERE user_id = ? AND date = ? ORDER BY id DESC LIMIT 1")
		.bind(user_id)
		.bind(date)
		.fetch_optional(pool)
		.await
}

pub async fn between(pool: &SqlitePool, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<StressRecord>, sqlx::Error> {
	sqlx::query_as::<_, StressRecord>("SELECT * FROM stress_tracker WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date ASC, id ASC")
		.bind(user_id)
		.bind(from)
		.bind(to)
		.fetch_all(pool)
		.await
}

/// Groups records per day, newest day first. Averages are rounded to two
/// decimals; causes and symptoms are distinct, in first-seen order.
pub fn summarize_days(records: &[StressRecord]) -> Vec<DailyStress> {
	let mut days: BTreeMap<NaiveDate, Vec<&StressRecord>> = BTreeMap::new();
	for record in records {
		days.entry(record.date).or_default().push(record);
	}

	days.into_iter()
		.rev()
		.map(|(day, records)| {
			#[allow(clippy::cast_precision_loss)]
			let avg = records.iter().map(|r| r.stress_level as f64).sum::<f64>() / records.len() as f64;

			DailyStress {
				day,
				avg_stress_level: (avg * 100.0).round() / 100.0,
				causes: distinct(records.iter().filter_map(|r| r.cause.as_deref())),
				symptoms: distinct(records.iter().filter_map(|r| r.logged_symptoms.as_deref())),
			}
		})
		.collect()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
	let mut out: Vec<String> = Vec::new();
	for value in values {
		if !out.iter().any(|seen| seen == value) {
			out.push(value.to_string());
		}
	}
	out
}
