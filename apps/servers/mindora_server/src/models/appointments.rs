use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

pub const PENDING: &str = "Pending";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Appointment {
	pub app_id: i64,
	pub doc_id: i64,
	pub user_id: i64,
	pub status: String,
	pub date: String,
	pub time: String,
	pub reason: String,
	pub reminder: String,
	pub email: Option<String>,
	pub name: String,
	pub institution: String,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
	pub doc_id: i64,
	pub user_id: i64,
	pub name: String,
	pub institution: String,
	pub date: String,
	pub time: String,
	pub reason: String,
	pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ConfirmedAppointment {
	pub app_id: i64,
	pub user_id: i64,
	pub date: String,
	pub time: String,
	pub status: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Therapist {
	pub doc_id: i64,
	pub name: String,
	pub email: String,
	pub phone_no: Option<String>,
	#[serde(rename = "profileImage")]
	pub profile_image: Option<String>,
	pub bdn: Option<String>,
	pub special: Option<String>,
	pub accept_patient: bool,
	pub shortbio: Option<String>,
	pub education: Option<String>,
	pub exp: Option<String>,
	pub profession: Option<String>,
	pub description: Option<String>,
	pub gender: Option<String>,
}

pub async fn book(pool: &SqlitePool, appointment: &NewAppointment) -> Result<Appointment, sqlx::Error> {
	sqlx::query_as::<_, Appointment>(
		"INSERT INTO appointment (doc_id, user_id, status, date, time, reason, reminder, email, name, institution) \
		 VALUES (?, ?, ?, ?, ?, ?, 'yes', ?, ?, ?) RETURNING *",
	)
	.bind(appointment.doc_id)
	.bind(appointment.user_id)
	.bind(PENDING)
	.bind(&appointment.date)
	.bind(&appointment.time)
	.bind(&appointment.reason)
	.bind(&appointment.email)
	.bind(&appointment.name)
	.bind(&appointment.institution)
	.fetch_one(pool)
	.await
}

pub async fn confirmed(pool: &SqlitePool) -> Result<Vec<ConfirmedAppointment>, sqlx::Error> {
	sqlx::query_as::<_, ConfirmedAppointment>("SELECT app_id, user_id, date, time, status FROM appointment WHERE LOWER(status) = 'confirmed' ORDER BY date, time")
		.fetch_all(pool)
		.await
}

pub async fn therapists(pool: &SqlitePool) -> Result<Vec<Therapist>, sqlx::Error> {
	sqlx::query_as::<_, Therapist>(
		"SELECT doctor.doc_id, users.name, users.email, users.phone_no, users.profile_image, doctor.bdn, doctor.special, \
		 doctor.accept_patient, doctor.shortbio, doctor.education, doctor.exp, doctor.profession, doctor.description, doctor.gender \
		 FROM doctor JOIN users ON users.id = doctor.doc_id ORDER BY users.name",
	)
	.fetch_all(pool)
	.await
}
