pub mod admin;
pub mod appointments;
pub mod chat;
pub mod doctors;
pub mod health;
