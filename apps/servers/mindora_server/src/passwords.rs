use crate::error::MindoraError;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;

const SALT_LEN: usize = 16;

/// PHC-format argon2id hash with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, MindoraError> {
	let mut salt = [0u8; SALT_LEN];
	rand::thread_rng().fill(&mut salt);

	let salt = SaltString::encode_b64(&salt).map_err(|e| MindoraError::PasswordHash(format!("failed to encode salt: {e}")))?;

	Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| MindoraError::PasswordHash(e.to_string()))
}

/// A stored hash that cannot be parsed never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
	let Ok(parsed) = PasswordHash::new(stored) else {
		tracing::warn!("stored password hash is not in PHC format");
		return false;
	};

	Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hash_verifies_only_the_original_password() {
		let hash = hash_password("correct horse").unwrap();

		assert!(hash.starts_with("$argon2"));
		assert!(verify_password("correct horse", &hash));
		assert!(!verify_password("battery staple", &hash));
	}

	#[test]
	fn test_salts_differ_between_hashes() {
		assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
	}

	#[test]
	fn test_garbage_hash_never_matches() {
		assert!(!verify_password("anything", "plaintext-from-an-old-import"));
	}
}
