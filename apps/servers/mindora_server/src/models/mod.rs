pub mod appointments;
pub mod chat;
pub mod forum;
pub mod journal;
pub mod profiles;
pub mod sleep;
pub mod stress;
pub mod todo;
pub mod users;
