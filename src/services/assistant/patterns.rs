use crate::models::Intent;

/// Phrases that always mean an emergency, matched as plain substrings so
/// multi-word symptoms like "chest pain" are caught anywhere in a message.
pub const EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "unconscious",
    "stroke",
    "heart attack",
];

pub const EMERGENCY_KEYWORDS: &str = r"\b(emergency|urgent|911|ambulance|critical)\b";

/// Intent rules checked in order, first match wins. The booking and cancel
/// rules pair an action word with a target word so that a lone mention of
/// "appointment" does not read as a booking request.
pub const INTENT_RULES: &[(Intent, &str)] = &[
    (
        Intent::Greeting,
        r"\b(hello|hi|hey|greetings|good\s+(morning|afternoon|evening))\b",
    ),
    (
        Intent::BookAppointment,
        r"\b(book|schedule|appointment|visit|reserve|slot|make)\b.*\b(appointment|doctor|visit)\b",
    ),
    (
        Intent::DoctorSearch,
        r"\b(find|search|show|list|which|doctor|doctors|specialist|physician|cardiologist|cardiology|pediatrician|pediatrics|orthopedic|orthopedics|neurologist|neurology)\b",
    ),
    (
        Intent::FaqHours,
        r"\b(hours|timing|timings|open|opens|opening|close|closes|closing|closed)\b",
    ),
    (
        Intent::SymptomTriage,
        r"\b(pain|ache|fever|cough|dizzy|dizziness|nausea|vomiting|sweating|bleeding|headache|rash|swelling|sore\s+throat|fatigue)\b",
    ),
    (
        Intent::CancelAppointment,
        r"\b(cancel|remove)\b.*\b(appointment|booking)\b",
    ),
];

/// Keyword fragments mapped to the specialty they select in the directory.
/// Fragments so "cardiologist" and "cardiology" both hit the same entry.
pub const SPECIALTY_KEYWORDS: &[(&str, &str)] = &[
    ("cardio", "Cardiology"),
    ("ortho", "Orthopedics"),
    ("pediat", "Pediatrics"),
    ("neuro", "Neurology"),
    ("general", "General Medicine"),
];
