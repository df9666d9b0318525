use mood_tracker::MoodEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
	#[default]
	None,
	NegativeMoodPattern,
	SuddenNegativeShift,
}

impl AlertType {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::NegativeMoodPattern => "negative_mood_pattern",
			Self::SuddenNegativeShift => "sudden_negative_shift",
		}
	}
}

impl fmt::Display for AlertType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of one analysis pass. Built per request and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlertDecision {
	pub needs_alert: bool,
	pub alert_type: AlertType,
	pub relevant_entries: Vec<MoodEntry>,
}

impl EmergencyAlertDecision {
	pub fn no_alert() -> Self {
		Self::default()
	}

	pub fn alert(alert_type: AlertType, relevant_entries: Vec<MoodEntry>) -> Self {
		Self {
			needs_alert: true,
			alert_type,
			relevant_entries,
		}
	}
}
