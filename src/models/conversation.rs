use serde::{Deserialize, Serialize};

/// One classified exchange: what the patient sent and what the assistant
/// replied, kept for the admin activity view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: i64,
    pub user_id: Option<String>,
    pub message: String,
    pub intent: String,
    pub response: String,
    pub created_at: String,
}
