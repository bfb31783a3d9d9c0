use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub available_days: Vec<String>,
    pub start_hour: i32,
    pub end_hour: i32,
}

impl Doctor {
    pub fn days_label(&self) -> String {
        self.available_days.join(", ")
    }

    pub fn hours_label(&self) -> String {
        format!("{}:00 - {}:00", self.start_hour, self.end_hour)
    }

    pub fn works_on(&self, weekday: &str) -> bool {
        self.available_days
            .iter()
            .any(|d| d.eq_ignore_ascii_case(weekday))
    }
}
