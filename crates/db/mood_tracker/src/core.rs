pub mod model;
pub mod queries;
pub mod repository;
pub mod schema;
pub mod streak;

// Re-export commonly used types
pub use model::*;
pub use repository::{week_of_month, MoodTrackerRepository};
pub use streak::current_streak;
