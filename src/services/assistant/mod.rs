pub mod classifier;
pub mod patterns;
pub mod responder;

pub use classifier::IntentClassifier;
pub use responder::ResponseGenerator;
