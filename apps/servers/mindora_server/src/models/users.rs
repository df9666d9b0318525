use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
	Patient,
	Doctor,
}

impl UserKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Patient => "patient",
			Self::Doctor => "doctor",
		}
	}
}

impl fmt::Display for UserKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for UserKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"patient" => Ok(Self::Patient),
			"doctor" => Ok(Self::Doctor),
			other => Err(format!("unknown user type `{other}`")),
		}
	}
}

/// A full `users` row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
	pub id: i64,
	pub email: String,
	#[serde(skip_serializing)]
	pub password_hash: String,
	pub name: String,
	#[sqlx(rename = "type")]
	#[serde(rename = "type")]
	pub user_type: String,
	pub phone_no: Option<String>,
	#[serde(rename = "profileImage")]
	pub profile_image: Option<String>,
	pub emergency_email: Option<String>,
	pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
	pub id: i64,
	pub email: String,
	pub name: String,
	#[sqlx(rename = "type")]
	#[serde(rename = "type")]
	pub user_type: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CreatedUser {
	pub id: i64,
	pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
	pub email: String,
	pub password_hash: String,
	pub name: String,
	pub kind: UserKind,
	pub bdn: Option<String>,
}

/// Where emergency alerts for a user go.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EmergencyContact {
	pub name: String,
	pub emergency_email: String,
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
	sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?").bind(email).fetch_optional(pool).await
}

pub async fn find_summary(pool: &SqlitePool, id: i64) -> Result<Option<UserSummary>, sqlx::Error> {
	sqlx::query_as::<_, UserSummary>("SELECT id, email, name, type FROM users WHERE id = ?")
		.bind(id)
		.fetch_optional(pool)
		.await
}

/// Inserts the user together with its patient or doctor profile row.
pub async fn create(pool: &SqlitePool, user: &NewUser) -> Result<CreatedUser, sqlx::Error> {
	let mut tx = pool.begin().await?;

	let created = sqlx::query_as::<_, CreatedUser>("INSERT INTO users (email, password_hash, name, type) VALUES (?, ?, ?, ?) RETURNING id, email")
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(&user.name)
		.bind(user.kind.as_str())
		.fetch_one(&mut *tx)
		.await?;

	match user.kind {
		UserKind::Patient => {
			sqlx::query("INSERT INTO patient (user_id) VALUES (?)").bind(created.id).execute(&mut *tx).await?;
		}
		UserKind::Doctor => {
			sqlx::query("INSERT INTO doctor (doc_id, bdn) VALUES (?, ?)")
				.bind(created.id)
				.bind(&user.bdn)
				.execute(&mut *tx)
				.await?;
		}
	}

	tx.commit().await?;
	Ok(created)
}

pub async fn update_password(pool: &SqlitePool, email: &str, password_hash: &str) -> Result<bool, sqlx::Error> {
	let result = sqlx::query("UPDATE users SET password_hash = ? WHERE email = ?")
		.bind(password_hash)
		.bind(email)
		.execute(pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn update_profile_image(pool: &SqlitePool, id: i64, image: &str) -> Result<Option<User>, sqlx::Error> {
	sqlx::query_as::<_, User>("UPDATE users SET profile_image = ? WHERE id = ? RETURNING *")
		.bind(image)
		.bind(id)
		.fetch_optional(pool)
		.await
}

/// `None` when the user is unknown or has no emergency address on file.
pub async fn find_emergency_contact(pool: &SqlitePool, id: i64) -> Result<Option<EmergencyContact>, sqlx::Error> {
	sqlx::query_as::<_, EmergencyContact>("SELECT name, emergency_email FROM users WHERE id = ? AND TRIM(COALESCE(emergency_email, '')) <> ''")
		.bind(id)
		.fetch_optional(pool)
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::memory_pool;

	fn new_user(email: &str, kind: UserKind) -> NewUser {
		NewUser {
			email: email.to_string(),
			password_hash: "hash".to_string(),
			name: "Nadia".to_string(),
			kind,
			bdn: (kind == UserKind::Doctor).then(|| "BMDC-1234".to_string()),
		}
	}

	#[tokio::test]
	async fn test_create_adds_profile_row() {
		let pool = memory_pool().await;

		let patient = create(&pool, &new_user("p@example.com", UserKind::Patient)).await.unwrap();
		let doctor = create(&pool, &new_user("d@example.com", UserKind::Doctor)).await.unwrap();

		let patients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patient WHERE user_id = ?").bind(patient.id).fetch_one(&pool).await.unwrap();
		let bdn: Option<String> = sqlx::query_scalar("SELECT bdn FROM doctor WHERE doc_id = ?").bind(doctor.id).fetch_one(&pool).await.unwrap();

		assert_eq!(patients, 1);
		assert_eq!(bdn.as_deref(), Some("BMDC-1234"));
	}

	#[tokio::test]
	async fn test_duplicate_email_is_rejected_by_store() {
		let pool = memory_pool().await;
		create(&pool, &new_user("p@example.com", UserKind::Patient)).await.unwrap();

		assert!(create(&pool, &new_user("p@example.com", UserKind::Doctor)).await.is_err());
	}

	#[tokio::test]
	async fn test_emergency_contact_requires_address() {
		let pool = memory_pool().await;
		let user = create(&pool, &new_user("p@example.com", UserKind::Patient)).await.unwrap();

		assert_eq!(find_emergency_contact(&pool, user.id).await.unwrap(), None);

		sqlx::query("UPDATE users SET emergency_email = '  ' WHERE id = ?").bind(user.id).execute(&pool).await.unwrap();
		assert_eq!(find_emergency_contact(&pool, user.id).await.unwrap(), None);

		sqlx::query("UPDATE users SET emergency_email = 'mom@example.com' WHERE id = ?").bind(user.id).execute(&pool).await.unwrap();
		let contact = find_emergency_contact(&pool, user.id).await.unwrap().unwrap();
		assert_eq!(contact.emergency_email, "mom@example.com");
		assert_eq!(contact.name, "Nadia");
	}

	#[test]
	fn test_user_kind_parsing() {
		assert_eq!("Doctor".parse::<UserKind>(), Ok(UserKind::Doctor));
		assert!("admin".parse::<UserKind>().is_err());
	}
}
