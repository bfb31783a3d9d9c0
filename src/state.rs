use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::assistant::{IntentClassifier, ResponseGenerator};
use crate::services::directory::DoctorDirectory;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub classifier: IntentClassifier,
    pub responder: ResponseGenerator,
    pub directory: Box<dyn DoctorDirectory>,
}
