use crate::decision::{AlertType, EmergencyAlertDecision};
use mood_tracker::MoodEntry;
use std::fmt;
use std::str::FromStr;

/// Statuses that count as negative, compared case-insensitively.
pub const NEGATIVE_MOODS: [&str; 4] = ["sad", "angry", "depressed", "stressed"];

const MIN_HISTORY: usize = 5;
const RECENT_WINDOW: usize = 7;
const HIGH_INTENSITY: i64 = 3;
const PATTERN_THRESHOLD: usize = 5;
const SHIFT_RUN: usize = 3;

pub fn is_negative_status(entry: &MoodEntry) -> bool {
	NEGATIVE_MOODS.iter().any(|mood| entry.mood_status.eq_ignore_ascii_case(mood))
}

/// Negative status at level 3 or above. An unknown level never qualifies.
pub fn is_high_intensity_negative(entry: &MoodEntry) -> bool {
	is_negative_status(entry) && entry.mood_level.is_some_and(|level| level >= HIGH_INTENSITY)
}

/// How entries must line up to form the runs of a sudden negative shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuddenShiftRule {
	/// The shift is never reported.
	#[default]
	Disabled,
	/// Neighbouring entries in the recent window are consecutive.
	ConsecutiveEntries,
	/// Neighbouring entries must also be exactly one calendar day apart.
	ConsecutiveDays,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sudden shift rule `{0}` (expected disabled, consecutive_entries or consecutive_days)")]
pub struct UnknownShiftRule(String);

impl FromStr for SuddenShiftRule {
	type Err = UnknownShiftRule;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
			"disabled" | "off" => Ok(Self::Disabled),
			"consecutive_entries" => Ok(Self::ConsecutiveEntries),
			"consecutive_days" => Ok(Self::ConsecutiveDays),
			_ => Err(UnknownShiftRule(s.to_string())),
		}
	}
}

impl fmt::Display for SuddenShiftRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Disabled => "disabled",
			Self::ConsecutiveEntries => "consecutive_entries",
			Self::ConsecutiveDays => "consecutive_days",
		})
	}
}

/// Scans the most recent mood entries for patterns worth escalating.
///
/// Entries are sorted by date (stable, so same-day entries keep their input
/// order) and only the last seven are inspected. Fewer than five entries in
/// total is never escalated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodPatternAnalyzer {
	shift_rule: SuddenShiftRule,
}

impl MoodPatternAnalyzer {
	pub const fn new(shift_rule: SuddenShiftRule) -> Self {
		Self { shift_rule }
	}

	pub fn analyze(&self, entries: &[MoodEntry]) -> EmergencyAlertDecision {
		if entries.len() < MIN_HISTORY {
			return EmergencyAlertDecision::no_alert();
		}

		let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
		sorted.sort_by_key(|entry| entry.date);
		let window = &sorted[sorted.len().saturating_sub(RECENT_WINDOW)..];

		let negative: Vec<MoodEntry> = window.iter().filter(|entry| is_high_intensity_negative(entry)).map(|entry| (*entry).clone()).collect();
		if negative.len() >= PATTERN_THRESHOLD {
			return EmergencyAlertDecision::alert(AlertType::NegativeMoodPattern, negative);
		}

		if let Some(relevant) = self.sudden_shift(window) {
			return EmergencyAlertDecision::alert(AlertType::SuddenNegativeShift, relevant);
		}

		EmergencyAlertDecision::no_alert()
	}

	// First boundary with >= 3 calm entries right before it and >= 3
	// high-intensity negative entries starting at it.
	fn sudden_shift(&self, window: &[&MoodEntry]) -> Option<Vec<MoodEntry>> {
		if self.shift_rule == SuddenShiftRule::Disabled {
			return None;
		}

		for boundary in 1..window.len() {
			if !self.adjacent(window[boundary - 1], window[boundary]) {
				continue;
			}

			let mut calm = 0;
			for i in (0..boundary).rev() {
				if is_negative_status(window[i]) || (i + 1 < boundary && !self.adjacent(window[i], window[i + 1])) {
					break;
				}
				calm += 1;
			}

			let mut low = 0;
			for i in boundary..window.len() {
				if !is_high_intensity_negative(window[i]) || (i > boundary && !self.adjacent(window[i - 1], window[i])) {
					break;
				}
				low += 1;
			}

			if calm >= SHIFT_RUN && low >= SHIFT_RUN {
				return Some(window[boundary - calm..boundary + low].iter().map(|entry| (*entry).clone()).collect());
			}
		}

		None
	}

	fn adjacent(&self, earlier: &MoodEntry, later: &MoodEntry) -> bool {
		match self.shift_rule {
			SuddenShiftRule::Disabled => false,
			SuddenShiftRule::ConsecutiveEntries => true,
			SuddenShiftRule::ConsecutiveDays => earlier.date.succ_opt() == Some(later.date),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn entry(day: u32, status: &str, level: i64) -> MoodEntry {
		MoodEntry::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), status, level)
	}

	fn analyzer() -> MoodPatternAnalyzer {
		MoodPatternAnalyzer::default()
	}

	#[test]
	fn test_fewer_than_five_entries_never_alert() {
		for len in 0..5 {
			let entries: Vec<_> = (1..=len).map(|d| entry(d, "Depressed", 5)).collect();
			let decision = analyzer().analyze(&entries);

			assert!(!decision.needs_alert);
			assert_eq!(decision.alert_type, AlertType::None);
			assert!(decision.relevant_entries.is_empty());
		}
	}

	#[test]
	fn test_five_of_seven_negative_entries_alert() {
		let entries = vec![
			entry(1, "Sad", 4),
			entry(2, "Happy", 1),
			entry(3, "Sad", 4),
			entry(4, "Sad", 4),
			entry(5, "Happy", 1),
			entry(6, "Sad", 4),
			entry(7, "Sad", 4),
		];

		let decision = analyzer().analyze(&entries);

		assert!(decision.needs_alert);
		assert_eq!(decision.alert_type, AlertType::NegativeMoodPattern);
		assert_eq!(decision.relevant_entries.len(), 5);
		assert!(decision.relevant_entries.windows(2).all(|w| w[0].date <= w[1].date));
	}

	#[test]
	fn test_level_boundary() {
		let at_two: Vec<_> = (1..=7).map(|d| entry(d, "sad", 2)).collect();
		assert!(!analyzer().analyze(&at_two).needs_alert);

		let at_three: Vec<_> = (1..=5).map(|d| entry(d, "sad", 3)).collect();
		assert!(analyzer().analyze(&at_three).needs_alert);
	}

	#[test]
	fn test_status_is_case_insensitive() {
		let upper: Vec<_> = (1..=5).map(|d| entry(d, "SAD", 3)).collect();
		let lower: Vec<_> = (1..=5).map(|d| entry(d, "sad", 3)).collect();

		let upper_decision = analyzer().analyze(&upper);
		let lower_decision = analyzer().analyze(&lower);

		assert_eq!(upper_decision.alert_type, lower_decision.alert_type);
		assert_eq!(upper_decision.relevant_entries.len(), 5);
	}

	#[test]
	fn test_every_negative_mood_counts_and_others_do_not() {
		let entries = vec![entry(1, "Sad", 3), entry(2, "Angry", 3), entry(3, "Depressed", 3), entry(4, "Stressed", 3), entry(5, "Anxious", 5), entry(6, "Lonely", 5)];
		assert!(!analyzer().analyze(&entries).needs_alert);

		let entries = vec![entry(1, "Sad", 3), entry(2, "Angry", 3), entry(3, "Depressed", 3), entry(4, "Stressed", 3), entry(5, "sAd", 5)];
		assert!(analyzer().analyze(&entries).needs_alert);
	}

	#[test]
	fn test_padded_status_is_not_negative() {
		let entries = vec![entry(1, "Sad", 3), entry(2, "Angry", 3), entry(3, "Depressed", 3), entry(4, "Stressed", 3), entry(5, " sad ", 5)];
		assert!(!analyzer().analyze(&entries).needs_alert);
	}

	#[test]
	fn test_unknown_level_never_counts() {
		let mut entries: Vec<_> = (1..=5).map(|d| entry(d, "Sad", 4)).collect();
		entries[2].mood_level = None;

		assert!(!analyzer().analyze(&entries).needs_alert);
	}

	#[test]
	fn test_input_order_does_not_matter() {
		let entries = vec![entry(3, "Sad", 4), entry(1, "Angry", 5), entry(7, "Happy", 1), entry(2, "Sad", 3), entry(6, "Depressed", 4), entry(5, "Calm", 2), entry(4, "Stressed", 3)];
		let mut reversed = entries.clone();
		reversed.reverse();

		let forward = analyzer().analyze(&entries);
		assert_eq!(forward, analyzer().analyze(&reversed));
		assert_eq!(forward.alert_type, AlertType::NegativeMoodPattern);
		let days: Vec<_> = forward.relevant_entries.iter().map(|e| e.date).collect();
		let mut sorted_days = days.clone();
		sorted_days.sort();
		assert_eq!(days, sorted_days);
	}

	#[test]
	fn test_equal_dates_keep_input_order() {
		let entries = vec![entry(1, "Sad", 3), entry(1, "Angry", 3), entry(2, "Sad", 3), entry(2, "Depressed", 3), entry(3, "Stressed", 3)];
		let decision = analyzer().analyze(&entries);
		let statuses: Vec<_> = decision.relevant_entries.iter().map(|e| e.mood_status.as_str()).collect();

		assert_eq!(statuses, vec!["Sad", "Angry", "Sad", "Depressed", "Stressed"]);
	}

	#[test]
	fn test_only_recent_window_is_considered() {
		// Days 1-3 are negative but fall out of the seven most recent entries.
		let mut entries: Vec<_> = (1..=3).map(|d| entry(d, "Sad", 5)).collect();
		entries.extend((4..=7).map(|d| entry(d, "Happy", 1)));
		entries.extend((8..=10).map(|d| entry(d, "Sad", 5)));

		assert!(!analyzer().analyze(&entries).needs_alert);
	}

	#[test]
	fn test_shift_disabled_by_default() {
		let entries = vec![entry(1, "Happy", 2), entry(2, "Calm", 1), entry(3, "Happy", 3), entry(4, "Sad", 4), entry(5, "Angry", 4), entry(6, "Sad", 5)];
		assert!(!analyzer().analyze(&entries).needs_alert);
	}

	#[test]
	fn test_shift_by_consecutive_entries() {
		let entries = vec![entry(1, "Happy", 2), entry(3, "Calm", 1), entry(5, "Happy", 3), entry(6, "Sad", 4), entry(8, "Angry", 4), entry(9, "Sad", 5)];
		let decision = MoodPatternAnalyzer::new(SuddenShiftRule::ConsecutiveEntries).analyze(&entries);

		assert_eq!(decision.alert_type, AlertType::SuddenNegativeShift);
		assert_eq!(decision.relevant_entries, entries);
	}

	#[test]
	fn test_shift_by_consecutive_days_needs_calendar_adjacency() {
		let gapped = vec![entry(1, "Happy", 2), entry(3, "Calm", 1), entry(5, "Happy", 3), entry(6, "Sad", 4), entry(8, "Angry", 4), entry(9, "Sad", 5)];
		assert!(!MoodPatternAnalyzer::new(SuddenShiftRule::ConsecutiveDays).analyze(&gapped).needs_alert);

		let daily = vec![entry(1, "Sad", 1), entry(2, "Happy", 2), entry(3, "Calm", 1), entry(4, "Happy", 3), entry(5, "Sad", 4), entry(6, "Angry", 4), entry(7, "Sad", 5)];
		let decision = MoodPatternAnalyzer::new(SuddenShiftRule::ConsecutiveDays).analyze(&daily);

		assert_eq!(decision.alert_type, AlertType::SuddenNegativeShift);
		assert_eq!(decision.relevant_entries, daily[1..].to_vec());
	}

	#[test]
	fn test_negative_pattern_wins_over_shift() {
		let entries = vec![entry(1, "Happy", 2), entry(2, "Calm", 1), entry(3, "Sad", 4), entry(4, "Sad", 4), entry(5, "Angry", 4), entry(6, "Sad", 5), entry(7, "Sad", 5)];
		let decision = MoodPatternAnalyzer::new(SuddenShiftRule::ConsecutiveEntries).analyze(&entries);

		assert_eq!(decision.alert_type, AlertType::NegativeMoodPattern);
	}

	#[test]
	fn test_shift_rule_parses_config_values() {
		assert_eq!("disabled".parse::<SuddenShiftRule>().unwrap(), SuddenShiftRule::Disabled);
		assert_eq!("consecutive-days".parse::<SuddenShiftRule>().unwrap(), SuddenShiftRule::ConsecutiveDays);
		assert_eq!("Consecutive_Entries".parse::<SuddenShiftRule>().unwrap(), SuddenShiftRule::ConsecutiveEntries);
		assert!("weekly".parse::<SuddenShiftRule>().is_err());
	}
}
