pub mod assistant;
pub mod booking;
pub mod directory;
