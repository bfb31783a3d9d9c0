use chrono::{Duration, NaiveDateTime, Timelike};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::Doctor;

#[derive(Debug)]
pub enum BookingError {
    OutsideWorkingHours { schedule: String },
    Conflict,
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::OutsideWorkingHours { schedule } => {
                write!(
                    f,
                    "That time is outside the doctor's working hours. They are available: {schedule}"
                )
            }
            BookingError::Conflict => {
                write!(
                    f,
                    "Sorry, that time slot is already taken. Could you pick a different time?"
                )
            }
        }
    }
}

pub fn validate_appointment_time(
    conn: &Connection,
    doctor: &Doctor,
    dt: &NaiveDateTime,
    duration_minutes: i32,
) -> Result<(), BookingError> {
    // The whole appointment must sit inside the doctor's working window.
    // The duration is caller-supplied and can be anything up to i32::MAX,
    // so the window math runs in i64.
    let weekday = dt.format("%A").to_string();
    let start_minute = i64::from(dt.hour() * 60 + dt.minute());
    let end_minute = start_minute + i64::from(duration_minutes);

    if !doctor.works_on(&weekday)
        || start_minute < i64::from(doctor.start_hour) * 60
        || end_minute > i64::from(doctor.end_hour) * 60
    {
        return Err(BookingError::OutsideWorkingHours {
            schedule: format!("{}, {}", doctor.days_label(), doctor.hours_label()),
        });
    }

    // Check for conflicts with the doctor's other appointments that day
    let day_start = dt.date().and_hms_opt(0, 0, 0).unwrap_or(*dt);
    let day_end = dt.date().and_hms_opt(23, 59, 59).unwrap_or(*dt);

    let appointments =
        queries::get_appointments_for_doctor_in_range(conn, &doctor.id, &day_start, &day_end)
            .map_err(|_| BookingError::Conflict)?;

    let proposed_end = *dt + Duration::minutes(duration_minutes as i64);

    for appointment in &appointments {
        let appointment_end =
            appointment.date_time + Duration::minutes(appointment.duration_minutes as i64);
        // Overlap: existing starts before proposed ends AND existing ends after proposed starts
        if appointment.date_time < proposed_end && appointment_end > *dt {
            return Err(BookingError::Conflict);
        }
    }

    Ok(())
}
