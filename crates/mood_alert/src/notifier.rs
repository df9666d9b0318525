use crate::decision::{AlertType, EmergencyAlertDecision};
use async_trait::async_trait;
use mood_tracker::MoodEntry;
use std::time::Duration;

/// Everything a notifier needs to tell an emergency contact about a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyAlert {
	pub contact_address: String,
	pub user_name: String,
	pub alert_type: AlertType,
	pub relevant_entries: Vec<MoodEntry>,
}

impl EmergencyAlert {
	/// `None` unless the decision actually asks for an alert.
	pub fn from_decision(contact_address: impl Into<String>, user_name: impl Into<String>, decision: EmergencyAlertDecision) -> Option<Self> {
		if !decision.needs_alert || decision.alert_type == AlertType::None {
			return None;
		}

		Some(Self {
			contact_address: contact_address.into(),
			user_name: user_name.into(),
			alert_type: decision.alert_type,
			relevant_entries: decision.relevant_entries,
		})
	}
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
	#[error("no email template for alert type {0}")]
	NoTemplate(AlertType),

	#[error("mail transport failed: {0}")]
	Transport(String),

	#[error("notification timed out after {0:?}")]
	TimedOut(Duration),
}

#[async_trait]
pub trait EmergencyNotifier: Send + Sync + 'static {
	async fn notify(&self, alert: &EmergencyAlert) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	#[test]
	fn test_from_decision_skips_non_alerts() {
		assert!(EmergencyAlert::from_decision("a@b.c", "Rafi", EmergencyAlertDecision::no_alert()).is_none());
	}

	#[test]
	fn test_from_decision_carries_evidence() {
		let entry = MoodEntry::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "Sad", 4);
		let decision = EmergencyAlertDecision::alert(AlertType::NegativeMoodPattern, vec![entry.clone()]);

		let alert = EmergencyAlert::from_decision("contact@example.com", "Rafi", decision).unwrap();

		assert_eq!(alert.contact_address, "contact@example.com");
		assert_eq!(alert.alert_type, AlertType::NegativeMoodPattern);
		assert_eq!(alert.relevant_entries, vec![entry]);
	}
}
