use chrono::NaiveDate;

/// Length of the run of consecutive calendar days that ends on the most recent
/// logged day. Duplicate days count once.
pub fn current_streak(dates: &[NaiveDate]) -> i64 {
	let mut days = dates.to_vec();
	days.sort_unstable();
	days.dedup();

	let mut streak = 0;
	let mut expected = None;
	for day in days.iter().rev() {
		match expected {
			Some(next) if next != *day => break,
			_ => {
				streak += 1;
				expected = day.pred_opt();
			}
		}
	}
	streak
}
