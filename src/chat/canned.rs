use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use super::{ Answer, AnswerProvider, ChatError };

pub const CANNED_ANSWER: &str =
    "Based on our documentation, all our N95 masks are NIOSH-approved under approval number TC-84A-XXXX. They are manufactured at our facility in Cleveland, Ohio, ensuring compliance with all relevant U.S. standards.";
pub const CANNED_SOURCES: &str = "Doc 4.2 §1.3, Compliance Sheet B §5";

/// Stands in for the procurement documentation service: waits a fixed delay,
/// then gives the same answer to every question.
#[derive(Debug, Clone)]
pub struct CannedAnswerProvider {
    delay: Duration,
}

impl CannedAnswerProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnswerProvider for CannedAnswerProvider {
    async fn answer(&self, question: &str) -> Result<Answer, ChatError> {
        debug!("Canned provider asked {:?}, replying in {:?}", question, self.delay);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Answer {
            text: CANNED_ANSWER.to_string(),
            sources: CANNED_SOURCES.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}
