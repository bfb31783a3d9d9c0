use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    BookAppointment,
    DoctorSearch,
    FaqHours,
    SymptomTriage,
    CancelAppointment,
    Emergency,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::BookAppointment => "book_appointment",
            Intent::DoctorSearch => "doctor_search",
            Intent::FaqHours => "faq_hours",
            Intent::SymptomTriage => "symptom_triage",
            Intent::CancelAppointment => "cancel_appointment",
            Intent::Emergency => "emergency",
            Intent::Fallback => "fallback",
        }
    }
}
