pub mod core;

pub use crate::core::{current_streak, week_of_month, MoodEntry, MoodRecord, MoodTrackerRepository, NewMoodEntry};
