use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Appointment, AppointmentStatus, ConversationEntry, Doctor};

// ── Doctors ──

pub fn list_doctors(conn: &Connection) -> anyhow::Result<Vec<Doctor>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty, available_days, start_hour, end_hour
         FROM doctors ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_doctor_row(row)))?;

    let mut doctors = vec![];
    for row in rows {
        doctors.push(row??);
    }
    Ok(doctors)
}

pub fn find_doctors_by_specialty(conn: &Connection, filter: &str) -> anyhow::Result<Vec<Doctor>> {
    // Literal substring match: '%' and '_' in the filter carry no wildcard meaning.
    let needle = filter.to_lowercase();
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty, available_days, start_hour, end_hour
         FROM doctors WHERE instr(LOWER(specialty), ?1) > 0 ORDER BY name ASC",
    )?;

    let rows = stmt.query_map(params![needle], |row| Ok(parse_doctor_row(row)))?;

    let mut doctors = vec![];
    for row in rows {
        doctors.push(row??);
    }
    Ok(doctors)
}

pub fn get_doctor_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Doctor>> {
    let result = conn.query_row(
        "SELECT id, name, specialty, available_days, start_hour, end_hour
         FROM doctors WHERE id = ?1",
        params![id],
        |row| Ok(parse_doctor_row(row)),
    );

    match result {
        Ok(doctor) => Ok(Some(doctor?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_doctor_row(row: &rusqlite::Row) -> anyhow::Result<Doctor> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let specialty: String = row.get(2)?;
    let days_json: String = row.get(3)?;
    let start_hour: i32 = row.get(4)?;
    let end_hour: i32 = row.get(5)?;

    let available_days: Vec<String> = serde_json::from_str(&days_json).unwrap_or_default();

    Ok(Doctor {
        id,
        name,
        specialty,
        available_days,
        start_hour,
        end_hour,
    })
}

// ── Appointments ──

pub fn create_appointment(conn: &Connection, appointment: &Appointment) -> anyhow::Result<()> {
    let date_time = appointment.date_time.format("%Y-%m-%d %H:%M:%S").to_string();
    let created_at = appointment.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let updated_at = appointment.updated_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO appointments (id, patient_id, patient_name, doctor_id, date_time, duration_minutes, status, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            appointment.id,
            appointment.patient_id,
            appointment.patient_name,
            appointment.doctor_id,
            date_time,
            appointment.duration_minutes,
            appointment.status.as_str(),
            appointment.notes,
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_appointments_for_doctor_in_range(
    conn: &Connection,
    doctor_id: &str,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> anyhow::Result<Vec<Appointment>> {
    let start_str = start.format("%Y-%m-%d %H:%M:%S").to_string();
    let end_str = end.format("%Y-%m-%d %H:%M:%S").to_string();

    let mut stmt = conn.prepare(
        "SELECT id, patient_id, patient_name, doctor_id, date_time, duration_minutes, status, notes, created_at, updated_at
         FROM appointments
         WHERE doctor_id = ?1 AND date_time >= ?2 AND date_time <= ?3 AND status != 'cancelled'
         ORDER BY date_time ASC",
    )?;

    let rows = stmt.query_map(params![doctor_id, start_str, end_str], |row| {
        Ok(parse_appointment_row(row))
    })?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn get_patient_appointments(
    conn: &Connection,
    patient_id: &str,
) -> anyhow::Result<Vec<AppointmentSummary>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.patient_name, d.name, d.specialty, a.date_time, a.duration_minutes, a.status, a.notes, a.created_at
         FROM appointments a
         INNER JOIN doctors d ON a.doctor_id = d.id
         WHERE a.patient_id = ?1 AND a.status != 'cancelled'
         ORDER BY a.date_time ASC",
    )?;

    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(parse_appointment_summary_row(row))
    })?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn get_all_appointments(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<AppointmentSummary>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            "SELECT a.id, a.patient_id, a.patient_name, d.name, d.specialty, a.date_time, a.duration_minutes, a.status, a.notes, a.created_at \
             FROM appointments a INNER JOIN doctors d ON a.doctor_id = d.id \
             WHERE a.status = ?1 ORDER BY a.date_time DESC LIMIT ?2"
                .to_string(),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            "SELECT a.id, a.patient_id, a.patient_name, d.name, d.specialty, a.date_time, a.duration_minutes, a.status, a.notes, a.created_at \
             FROM appointments a INNER JOIN doctors d ON a.doctor_id = d.id \
             ORDER BY a.date_time DESC LIMIT ?1"
                .to_string(),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| {
        Ok(parse_appointment_summary_row(row))
    })?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn update_appointment_status(
    conn: &Connection,
    id: &str,
    status: &AppointmentStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now()
        .naive_utc()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let count = conn.execute(
        "UPDATE appointments SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

/// Appointment joined with the doctor it belongs to, for listing views.
pub struct AppointmentSummary {
    pub id: String,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub doctor_name: String,
    pub doctor_specialty: String,
    pub date_time: NaiveDateTime,
    pub duration_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let id: String = row.get(0)?;
    let patient_id: String = row.get(1)?;
    let patient_name: Option<String> = row.get(2)?;
    let doctor_id: String = row.get(3)?;
    let date_time_str: String = row.get(4)?;
    let duration_minutes: i32 = row.get(5)?;
    let status_str: String = row.get(6)?;
    let notes: Option<String> = row.get(7)?;
    let created_at_str: String = row.get(8)?;
    let updated_at_str: String = row.get(9)?;

    let date_time = NaiveDateTime::parse_from_str(&date_time_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Appointment {
        id,
        patient_id,
        patient_name,
        doctor_id,
        date_time,
        duration_minutes,
        status: AppointmentStatus::from_str(&status_str),
        notes,
        created_at,
        updated_at,
    })
}

fn parse_appointment_summary_row(row: &rusqlite::Row) -> anyhow::Result<AppointmentSummary> {
    let date_time_str: String = row.get(5)?;
    let created_at_str: String = row.get(9)?;

    let date_time = NaiveDateTime::parse_from_str(&date_time_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(AppointmentSummary {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        patient_name: row.get(2)?,
        doctor_name: row.get(3)?,
        doctor_specialty: row.get(4)?,
        date_time,
        duration_minutes: row.get(6)?,
        status: row.get(7)?,
        notes: row.get(8)?,
        created_at,
    })
}

// ── Conversations ──

pub fn insert_conversation(
    conn: &Connection,
    user_id: Option<&str>,
    message: &str,
    intent: &str,
    response: &str,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO conversations (user_id, message, intent, response) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, message, intent, response],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_recent_conversations(
    conn: &Connection,
    intent_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<ConversationEntry>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match intent_filter {
        Some(intent) => (
            "SELECT id, user_id, message, intent, response, created_at \
             FROM conversations WHERE intent = ?1 ORDER BY id DESC LIMIT ?2"
                .to_string(),
            vec![
                Box::new(intent.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            "SELECT id, user_id, message, intent, response, created_at \
             FROM conversations ORDER BY id DESC LIMIT ?1"
                .to_string(),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| {
        Ok(ConversationEntry {
            id: row.get(0)?,
            user_id: row.get(1)?,
            message: row.get(2)?,
            intent: row.get(3)?,
            response: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;

    let mut entries = vec![];
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

// ── Dashboard ──

pub struct DashboardStats {
    pub doctor_count: i64,
    pub upcoming_appointments: i64,
    pub total_conversations: i64,
    pub conversations_today: i64,
}

pub fn get_dashboard_stats(conn: &Connection) -> anyhow::Result<DashboardStats> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();

    let doctor_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))
        .unwrap_or(0);

    let upcoming_appointments: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM appointments WHERE date_time > ?1 AND status = 'scheduled'",
            params![now],
            |row| row.get(0),
        )
        .unwrap_or(0);

    let total_conversations: i64 = conn
        .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))
        .unwrap_or(0);

    let conversations_today: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM conversations WHERE created_at >= datetime('now', 'start of day')",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(DashboardStats {
        doctor_count,
        upcoming_appointments,
        total_conversations,
        conversations_today,
    })
}

pub fn get_intent_breakdown(conn: &Connection) -> anyhow::Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT intent, COUNT(*) as total FROM conversations GROUP BY intent ORDER BY total DESC",
    )?;

    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut breakdown = vec![];
    for row in rows {
        breakdown.push(row?);
    }
    Ok(breakdown)
}
