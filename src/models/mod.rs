pub mod appointment;
pub mod conversation;
pub mod doctor;
pub mod intent;

pub use appointment::{Appointment, AppointmentStatus};
pub use conversation::ConversationEntry;
pub use doctor::Doctor;
pub use intent::Intent;
