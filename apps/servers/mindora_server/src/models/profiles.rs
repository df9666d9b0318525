use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PatientProfile {
	pub id: i64,
	pub email: String,
	pub name: String,
	#[sqlx(rename = "type")]
	#[serde(rename = "type")]
	pub user_type: String,
	pub phone_no: Option<String>,
	#[serde(rename = "profileImage")]
	pub profile_image: Option<String>,
	pub emergency_contact: Option<String>,
	pub profession: Option<String>,
	pub bio: Option<String>,
	pub dob: Option<String>,
	pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DoctorProfile {
	pub id: i64,
	pub email: String,
	pub name: String,
	#[sqlx(rename = "type")]
	#[serde(rename = "type")]
	pub user_type: String,
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
	pub dob: Option<String>,
	pub gender: Option<String>,
	/// Appointments booked with this doctor.
	pub patient_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Profile {
	Patient(PatientProfile),
	Doctor(DoctorProfile),
}

/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientUpdate {
	pub name: Option<String>,
	pub email: Option<String>,
	pub profession: Option<String>,
	pub bio: Option<String>,
	pub dob: Option<String>,
	pub gender: Option<String>,
	pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorUpdate {
	pub name: Option<String>,
	pub email: Option<String>,
	pub phone_no: Option<String>,
	pub special: Option<String>,
	pub bdn: Option<String>,
	pub accept_patient: Option<bool>,
	pub shortbio: Option<String>,
	pub education: Option<String>,
	pub exp: Option<String>,
	pub profession: Option<String>,
	pub description: Option<String>,
	pub dob: Option<String>,
	pub gender: Option<String>,
}

const PATIENT_PROFILE: &str = "SELECT users.id, users.email, users.name, users.type, users.phone_no, users.profile_image, \
	users.emergency_email AS emergency_contact, patient.profession, patient.bio, patient.dob, patient.gender \
	FROM users JOIN patient ON patient.user_id = users.id WHERE users.id = ?";

const DOCTOR_PROFILE: &str = "SELECT users.id, users.email, users.name, users.type, users.phone_no, users.profile_image, \
	doctor.bdn, doctor.special, doctor.accept_patient, doctor.shortbio, doctor.education, doctor.exp, doctor.profession, \
	doctor.description, doctor.dob, doctor.gender, \
	(SELECT COUNT(*) FROM appointment WHERE appointment.doc_id = users.id) AS patient_count \
	FROM users JOIN doctor ON doctor.doc_id = users.id WHERE users.id = ?";

pub async fn patient_profile(pool: &SqlitePool, user_id: i64) -> Result<Option<PatientProfile>, sqlx::Error> {
	sqlx::query_as::<_, PatientProfile>(PATIENT_PROFILE).bind(user_id).fetch_optional(pool).await
}

pub async fn doctor_profile(pool: &SqlitePool, user_id: i64) -> Result<Option<DoctorProfile>, sqlx::Error> {
	sqlx::query_as::<_, DoctorProfile>(DOCTOR_PROFILE).bind(user_id).fetch_optional(pool).await
}

pub async fn update_patient(pool: &SqlitePool, user_id: i64, update: &PatientUpdate) -> Result<Option<PatientProfile>, sqlx::Error> {
	let mut tx = pool.begin().await?;

	let touched = sqlx::query(
		"UPDATE users SET name = COALESCE(?, name), email = COALESCE(?, email), emergency_email = COALESCE(?, emergency_email) \
		 WHERE id = ? AND type = 'patient'",
	)
	.bind(&update.name)
	.bind(&update.email)
	.bind(&update.emergency_contact)
	.bind(user_id)
	.execute(&mut *tx)
	.await?
	.rows_affected();

	if touched == 0 {
		return Ok(None);
	}

	sqlx::query(
		"UPDATE patient SET profession = COALESCE(?, profession), bio = COALESCE(?, bio), dob = COALESCE(?, dob), gender = COALESCE(?, gender) \
		 WHERE user_id = ?",
	)
	.bind(&update.profession)
	.bind(&update.bio)
	.bind(&update.dob)
	.bind(&update.gender)
	.bind(user_id)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	patient_profile(pool, user_id).await
}

pub async fn update_doctor(pool: &SqlitePool, user_id: i64, update: &DoctorUpdate) -> Result<Option<DoctorProfile>, sqlx::Error> {
	let mut tx = pool.begin().await?;

	let touched = sqlx::query(
		"UPDATE users SET name = COALESCE(?, name), email = COALESCE(?, email), phone_no = COALESCE(?, phone_no) \
		 WHERE id = ? AND type = 'doctor'",
	)
	.bind(&update.name)
	.bind(&update.email)
	.bind(&update.phone_no)
	.bind(user_id)
	.execute(&mut *tx)
	.await?
	.rows_affected();

	if touched == 0 {
		return Ok(None);
	}

	sqlx::query(
		"UPDATE doctor SET special = COALESCE(?, special), bdn = COALESCE(?, bdn), accept_patient = COALESCE(?, accept_patient), \
		 shortbio = COALESCE(?, shortbio), education = COALESCE(?, education), exp = COALESCE(?, exp), \
		 profession = COALESCE(?, profession), description = COALESCE(?, description), dob = COALESCE(?, dob), \
		 gender = COALESCE(?, gender) WHERE doc_id = ?",
	)
	.bind(&update.special)
	.bind(&update.bdn)
	.bind(update.accept_patient)
	.bind(&update.shortbio)
	.bind(&update.education)
	.bind(&update.exp)
	.bind(&update.profession)
	.bind(&update.description)
	.bind(&update.dob)
	.bind(&update.gender)
	.bind(user_id)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;
	doctor_profile(pool, user_id).await
}
