use crate::models::{Doctor, Intent};
use crate::services::directory::DoctorDirectory;

use super::patterns::{EMERGENCY_PHRASES, SPECIALTY_KEYWORDS};

const GREETING: &str = "Hello! I'm the CareDesk assistant. I can help you with:\n\n\
- Booking an appointment with one of our doctors\n\
- Finding a doctor by specialty\n\
- Clinic visiting hours\n\
- General guidance when you're feeling unwell\n\n\
How can I help you today?";

const FALLBACK: &str = "I'm not sure I understood that. I can help you with:\n\n\
- Booking an appointment\n\
- Finding a doctor by specialty\n\
- Clinic visiting hours\n\n\
Could you rephrase your question?";

const FAQ_HOURS: &str = "Our clinic hours:\n\n\
Visiting hours: Monday to Saturday, 8:00 - 20:00\n\
Outpatient departments: Monday to Friday, 9:00 - 17:00\n\
Pharmacy: every day, 8:00 - 22:00\n\n\
Individual doctors keep their own consultation hours. Ask me to list our doctors to see them.";

const CANCEL_INSTRUCTIONS: &str = "I can help with that. Please share your appointment \
reference ID, or tell me the doctor and date of the visit you'd like to cancel, \
and the front desk will confirm the cancellation.";

const EMERGENCY_ALERT: &str = "This sounds like it could be a medical emergency.\n\n\
Please call 911 (or your local emergency number) right away.\n\
Our emergency department at 42 Harbor Street is open 24/7.\n\
Clinic emergency line: (555) 014-2007.\n\n\
Do not wait for an online reply. Seek immediate medical attention.";

const TRIAGE_DEFERRAL: &str = "I'm sorry you're not feeling well. I can't assess symptoms \
myself. If they are severe or getting worse, please call 911 or go to the nearest \
emergency department.\n\n\
For non-urgent concerns I can book you an appointment with one of our doctors. \
Would you like that?";

const NO_DOCTORS: &str = "I'm sorry, no doctors are available for booking right now. \
Please check back later or call the front desk.";

/// Maps a classified intent to the reply the patient sees. Directory-backed
/// intents degrade to a polite message when the lookup fails, so the chat
/// endpoint never errors out over a directory problem.
pub struct ResponseGenerator {
    emergency_phrases: &'static [&'static str],
    specialty_keywords: &'static [(&'static str, &'static str)],
}

impl ResponseGenerator {
    pub fn new() -> Self {
        Self {
            emergency_phrases: EMERGENCY_PHRASES,
            specialty_keywords: SPECIALTY_KEYWORDS,
        }
    }

    pub async fn respond(
        &self,
        intent: Intent,
        message: &str,
        directory: &dyn DoctorDirectory,
    ) -> String {
        match intent {
            Intent::Greeting => GREETING.to_string(),
            Intent::BookAppointment => self.booking_options(directory).await,
            Intent::DoctorSearch => self.doctor_search(message, directory).await,
            Intent::FaqHours => FAQ_HOURS.to_string(),
            Intent::SymptomTriage => self.triage(message),
            Intent::CancelAppointment => CANCEL_INSTRUCTIONS.to_string(),
            Intent::Emergency => EMERGENCY_ALERT.to_string(),
            Intent::Fallback => FALLBACK.to_string(),
        }
    }

    async fn booking_options(&self, directory: &dyn DoctorDirectory) -> String {
        let doctors = self.lookup(directory.list_all().await);
        if doctors.is_empty() {
            return NO_DOCTORS.to_string();
        }

        let mut reply = String::from("Here are our available doctors:\n\n");
        for (i, doctor) in doctors.iter().enumerate() {
            reply.push_str(&format!(
                "{}. {} - {} ({}, {})\n",
                i + 1,
                doctor.name,
                doctor.specialty,
                doctor.days_label(),
                doctor.hours_label(),
            ));
        }
        reply.push_str(
            "\nReply with the doctor or specialty you'd like, along with a preferred day and time.",
        );
        reply
    }

    async fn doctor_search(&self, message: &str, directory: &dyn DoctorDirectory) -> String {
        let filter = self.specialty_filter(message);
        let doctors = match filter {
            Some(specialty) => self.lookup(directory.find_by_specialty(specialty).await),
            None => self.lookup(directory.list_all().await),
        };

        if doctors.is_empty() {
            return "I couldn't find a matching doctor. Which specialty do you need? \
                    We cover Cardiology, Orthopedics, Pediatrics, Neurology and General Medicine."
                .to_string();
        }

        let mut reply = match filter {
            Some(specialty) => format!("Here are our {specialty} doctors:\n\n"),
            None => String::from("Here are all our doctors:\n\n"),
        };
        for doctor in &doctors {
            reply.push_str(&format!(
                "- {}\n  Specialty: {}\n  Days: {}\n  Hours: {}\n",
                doctor.name,
                doctor.specialty,
                doctor.days_label(),
                doctor.hours_label(),
            ));
        }
        reply.push_str("\nWould you like to book an appointment with one of them?");
        reply
    }

    fn triage(&self, message: &str) -> String {
        let lower = message.to_lowercase();
        // The intent label comes from the caller, so emergency phrasing is
        // re-checked here before giving general symptom advice.
        if self.emergency_phrases.iter().any(|p| lower.contains(p)) {
            return EMERGENCY_ALERT.to_string();
        }
        TRIAGE_DEFERRAL.to_string()
    }

    fn specialty_filter(&self, message: &str) -> Option<&'static str> {
        let lower = message.to_lowercase();
        self.specialty_keywords
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, specialty)| *specialty)
    }

    fn lookup(&self, result: anyhow::Result<Vec<Doctor>>) -> Vec<Doctor> {
        match result {
            Ok(doctors) => doctors,
            Err(e) => {
                tracing::warn!(error = %e, "doctor directory lookup failed");
                Vec::new()
            }
        }
    }
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubDirectory {
        doctors: Vec<Doctor>,
    }

    #[async_trait]
    impl DoctorDirectory for StubDirectory {
        async fn list_all(&self) -> anyhow::Result<Vec<Doctor>> {
            Ok(self.doctors.clone())
        }

        async fn find_by_specialty(&self, filter: &str) -> anyhow::Result<Vec<Doctor>> {
            let filter = filter.to_lowercase();
            Ok(self
                .doctors
                .iter()
                .filter(|d| d.specialty.to_lowercase().contains(&filter))
                .cloned()
                .collect())
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl DoctorDirectory for FailingDirectory {
        async fn list_all(&self) -> anyhow::Result<Vec<Doctor>> {
            Err(anyhow::anyhow!("directory unavailable"))
        }

        async fn find_by_specialty(&self, _filter: &str) -> anyhow::Result<Vec<Doctor>> {
            Err(anyhow::anyhow!("directory unavailable"))
        }
    }

    fn doctor(name: &str, specialty: &str) -> Doctor {
        Doctor {
            id: format!("doc-{name}"),
            name: name.to_string(),
            specialty: specialty.to_string(),
            available_days: vec!["Monday".to_string(), "Wednesday".to_string()],
            start_hour: 9,
            end_hour: 17,
        }
    }

    fn stub() -> StubDirectory {
        StubDirectory {
            doctors: vec![
                doctor("Dr. Adams", "Cardiology"),
                doctor("Dr. Brooks", "Pediatrics"),
            ],
        }
    }

    #[tokio::test]
    async fn test_booking_lists_numbered_doctors() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::BookAppointment, "book an appointment", &stub())
            .await;
        assert!(reply.contains("1. Dr. Adams - Cardiology"));
        assert!(reply.contains("2. Dr. Brooks - Pediatrics"));
        assert!(reply.contains("Monday, Wednesday"));
        assert!(reply.contains("9:00 - 17:00"));
    }

    #[tokio::test]
    async fn test_booking_with_empty_directory() {
        let r = ResponseGenerator::new();
        let empty = StubDirectory { doctors: vec![] };
        let reply = r
            .respond(Intent::BookAppointment, "book an appointment", &empty)
            .await;
        assert!(reply.contains("no doctors are available"));
    }

    #[tokio::test]
    async fn test_search_filters_by_specialty_keyword() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::DoctorSearch, "find me a cardiologist", &stub())
            .await;
        assert!(reply.contains("Here are our Cardiology doctors"));
        assert!(reply.contains("Dr. Adams"));
        assert!(!reply.contains("Dr. Brooks"));
    }

    #[tokio::test]
    async fn test_search_without_keyword_lists_everyone() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::DoctorSearch, "show me doctors", &stub())
            .await;
        assert!(reply.contains("Here are all our doctors"));
        assert!(reply.contains("Dr. Adams"));
        assert!(reply.contains("Dr. Brooks"));
    }

    #[tokio::test]
    async fn test_search_with_no_match_names_specialties() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::DoctorSearch, "find me a neurologist", &stub())
            .await;
        assert!(reply.contains("couldn't find a matching doctor"));
        assert!(reply.contains("Neurology"));
    }

    #[tokio::test]
    async fn test_triage_rechecks_emergency_phrases() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::SymptomTriage, "I have chest pain", &stub())
            .await;
        assert!(reply.contains("911"));
        assert!(reply.contains("emergency"));
    }

    #[tokio::test]
    async fn test_triage_defers_for_ordinary_symptoms() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::SymptomTriage, "I have a headache", &stub())
            .await;
        assert!(reply.contains("can't assess symptoms"));
        assert!(reply.contains("book you an appointment"));
    }

    #[tokio::test]
    async fn test_static_templates() {
        let r = ResponseGenerator::new();
        let greeting = r.respond(Intent::Greeting, "hello", &stub()).await;
        assert!(greeting.contains("How can I help you today?"));

        let hours = r.respond(Intent::FaqHours, "when do you open", &stub()).await;
        assert!(hours.contains("Visiting hours"));

        let cancel = r
            .respond(Intent::CancelAppointment, "cancel my appointment", &stub())
            .await;
        assert!(cancel.contains("reference ID"));

        let emergency = r.respond(Intent::Emergency, "call 911", &stub()).await;
        assert!(emergency.contains("911"));

        let fallback = r.respond(Intent::Fallback, "qwerty", &stub()).await;
        assert!(fallback.contains("rephrase"));
    }

    #[tokio::test]
    async fn test_directory_failure_degrades_gracefully() {
        let r = ResponseGenerator::new();
        let reply = r
            .respond(Intent::BookAppointment, "book an appointment", &FailingDirectory)
            .await;
        assert!(reply.contains("no doctors are available"));

        let reply = r
            .respond(Intent::DoctorSearch, "show me doctors", &FailingDirectory)
            .await;
        assert!(reply.contains("couldn't find a matching doctor"));
    }
}
