pub mod canned;
pub mod session;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use self::canned::CannedAnswerProvider;

pub use self::session::{ ChatEvent, ChatLog, ChatSession };

pub const DEFAULT_ANSWER_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    pub sources: String,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("answer provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of answers for the procurement chat. Implementations differ in
/// latency and determinism only; the chat state machine does not care.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn answer(&self, question: &str) -> Result<Answer, ChatError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct AnswerConfig {
    pub delay: Duration,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self { delay: DEFAULT_ANSWER_DELAY }
    }
}

pub fn new_provider(config: &AnswerConfig) -> Arc<dyn AnswerProvider> {
    Arc::new(CannedAnswerProvider::new(config.delay))
}
