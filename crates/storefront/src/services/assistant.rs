//! Health-assistant service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

/// Style constraints sent with every assistant exchange.
pub const SYSTEM_PROMPT: &str = "You are a pharmacist's assistant for a generic-medicine store. \
Answer in short bullet points. Compare generic and branded options by active salt and price. \
Never diagnose; for dosage changes or persistent symptoms, advise consulting a doctor.";

/// Reply shown whenever the assistant cannot answer.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process that right now. \
Please try again in a moment, or ask a pharmacist for urgent questions.";

/// Errors returned by the assistant backend.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The backend did not produce a reply.
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),
}

/// Trait for answering free-text customer questions.
///
/// Callers treat any failure as non-fatal and fall back to
/// [`FALLBACK_REPLY`] instead of propagating the error.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Answers a customer question.
    async fn ask(&self, user_text: &str) -> Result<String, AssistantError>;
}

#[derive(Debug, Default)]
struct InMemoryAssistantState {
    questions: u32,
    fail_on_ask: bool,
}

/// In-memory assistant returning canned guidance, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssistantService {
    state: Arc<RwLock<InMemoryAssistantState>>,
}

impl InMemoryAssistantService {
    /// Creates a new in-memory assistant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the assistant to fail every ask call.
    pub fn set_fail_on_ask(&self, fail: bool) {
        self.state.write().unwrap().fail_on_ask = fail;
    }

    /// Returns the number of questions asked, including failed ones.
    pub fn question_count(&self) -> u32 {
        self.state.read().unwrap().questions
    }
}

#[async_trait]
impl AssistantService for InMemoryAssistantService {
    async fn ask(&self, user_text: &str) -> Result<String, AssistantError> {
        {
            let mut state = self.state.write().unwrap();
            state.questions += 1;
            if state.fail_on_ask {
                return Err(AssistantError::Unavailable(
                    "assistant backend offline".to_string(),
                ));
            }
        }

        let text = user_text.to_lowercase();
        let reply = if text.contains("generic") || text.contains("brand") {
            "- A generic medicine has the same active salt as its branded equivalent\n\
             - Strength and quality standards are identical; the price is usually much lower\n\
             - Check the salt name on the strip to compare like for like"
        } else if text.contains("fever") || text.contains("headache") || text.contains("pain") {
            "- Paracetamol is the common first choice for fever and mild pain\n\
             - Take it after food and stay within the printed daily limit\n\
             - See a doctor if symptoms last more than three days"
        } else if text.contains("antibiotic") {
            "- Antibiotics work only against bacterial infections\n\
             - Always finish the full prescribed course\n\
             - They require a doctor's prescription; do not self-medicate"
        } else {
            "- Check the medicine page for uses, dosage and side effects\n\
             - Generic equivalents are listed with their savings against the branded price\n\
             - For anything urgent or personal, consult a doctor or pharmacist"
        };
        Ok(reply.to_string())
    }
}
