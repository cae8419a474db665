use log::{ error, info };
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{ broadcast, Mutex };
use uuid::Uuid;

use super::{ Answer, AnswerProvider };
use crate::models::chat::ChatEntry;

pub const THINKING_TEXT: &str = "Thinking...";
pub const FALLBACK_ANSWER: &str =
    "Sorry, the procurement assistant could not answer right now. Please try again.";

const EVENT_CAPACITY: usize = 64;

/// Conversation log. Entries are only appended or resolved in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
    scroll_to: Option<Uuid>,
}

impl ChatLog {
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Id of the entry the view should be scrolled to.
    pub fn scroll_to(&self) -> Option<Uuid> {
        self.scroll_to
    }

    pub fn has_pending(&self) -> bool {
        self.entries.iter().any(|e| e.loading)
    }

    fn push(&mut self, entry: ChatEntry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        self.scroll_to = Some(id);
        id
    }

    fn resolve(&mut self, id: Uuid, text: String, sources: Option<String>) -> Option<&ChatEntry> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.text = text;
        entry.sources = sources;
        entry.loading = false;
        self.scroll_to = self.entries.last().map(|e| e.id);
        self.entries.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Pending {
        id: Uuid,
    },
    Answered {
        id: Uuid,
        text: String,
        sources: Option<String>,
        timestamp: i64,
    },
}

#[derive(Clone)]
pub struct ChatSession {
    log: Arc<Mutex<ChatLog>>,
    provider: Arc<dyn AnswerProvider>,
    events: broadcast::Sender<ChatEvent>,
}

impl ChatSession {
    pub fn new(provider: Arc<dyn AnswerProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            log: Arc::new(Mutex::new(ChatLog::default())),
            provider,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> ChatLog {
        self.log.lock().await.clone()
    }

    /// Posts a question. Blank input is ignored and returns `None`.
    ///
    /// Otherwise the question and a "Thinking..." placeholder are appended
    /// and an answer task is spawned. The placeholder is replaced in place
    /// once the provider answers; nothing cancels or orders those tasks.
    pub async fn submit(&self, question: &str) -> Option<Uuid> {
        if question.trim().is_empty() {
            return None;
        }

        let placeholder_id = {
            let mut log = self.log.lock().await;
            log.push(ChatEntry::user(question));
            log.push(ChatEntry::placeholder(THINKING_TEXT))
        };
        let _ = self.events.send(ChatEvent::Pending { id: placeholder_id });

        let session = self.clone();
        let question = question.to_string();
        tokio::spawn(async move {
            session.answer(placeholder_id, question).await;
        });

        Some(placeholder_id)
    }

    async fn answer(&self, placeholder_id: Uuid, question: String) {
        let (text, sources) = match self.provider.answer(&question).await {
            Ok(Answer { text, sources }) => (text, Some(sources)),
            Err(e) => {
                error!("Provider '{}' failed to answer: {}", self.provider.name(), e);
                (FALLBACK_ANSWER.to_string(), None)
            }
        };

        let mut log = self.log.lock().await;
        let Some(entry) = log.resolve(placeholder_id, text, sources) else {
            error!("Placeholder {} vanished before it could be answered", placeholder_id);
            return;
        };
        info!("Answered chat placeholder {}", placeholder_id);
        let _ = self.events.send(ChatEvent::Answered {
            id: entry.id,
            text: entry.text.clone(),
            sources: entry.sources.clone(),
            timestamp: entry.timestamp,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::canned::{ CannedAnswerProvider, CANNED_ANSWER, CANNED_SOURCES };
    use crate::chat::ChatError;
    use crate::models::chat::ChatRole;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::time::Instant;

    fn canned_session() -> ChatSession {
        ChatSession::new(Arc::new(CannedAnswerProvider::new(Duration::from_millis(1500))))
    }

    async fn wait_answered(rx: &mut broadcast::Receiver<ChatEvent>) -> Uuid {
        loop {
            if let ChatEvent::Answered { id, .. } = rx.recv().await.expect("event") {
                return id;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn question_shows_placeholder_then_resolves_in_place() {
        let session = canned_session();
        let mut rx = session.subscribe();
        let start = Instant::now();

        let placeholder = session.submit("What certifications?").await.expect("accepted");

        let log = session.snapshot().await;
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].role, ChatRole::User);
        assert_eq!(log.entries()[0].text, "What certifications?");
        assert_eq!(log.entries()[1].id, placeholder);
        assert!(log.entries()[1].loading);
        assert_eq!(log.entries()[1].text, THINKING_TEXT);
        assert_eq!(log.scroll_to(), Some(placeholder));

        assert_eq!(wait_answered(&mut rx).await, placeholder);
        assert!(start.elapsed() >= Duration::from_millis(1500));

        let log = session.snapshot().await;
        assert_eq!(log.entries().len(), 2);
        let bot = &log.entries()[1];
        assert_eq!(bot.id, placeholder);
        assert!(!bot.loading);
        assert_eq!(bot.text, CANNED_ANSWER);
        assert_eq!(bot.sources.as_deref(), Some(CANNED_SOURCES));
        assert_eq!(log.scroll_to(), Some(placeholder));
    }

    #[tokio::test(start_paused = true)]
    async fn placeholder_still_loading_before_delay_elapses() {
        let session = canned_session();
        session.submit("Lead time?").await.expect("accepted");

        tokio::time::advance(Duration::from_millis(1499)).await;
        tokio::task::yield_now().await;

        assert!(session.snapshot().await.has_pending());
    }

    #[tokio::test]
    async fn blank_questions_are_ignored() {
        let session = canned_session();
        assert!(session.submit("").await.is_none());
        assert!(session.submit("   \n\t").await.is_none());
        assert!(session.snapshot().await.entries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_questions_each_get_their_own_placeholder() {
        let session = canned_session();
        let mut rx = session.subscribe();

        let first = session.submit("one").await.expect("accepted");
        let second = session.submit("two").await.expect("accepted");
        assert_ne!(first, second);
        assert_eq!(session.snapshot().await.entries().len(), 4);

        let mut answered = vec![wait_answered(&mut rx).await, wait_answered(&mut rx).await];
        answered.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(answered, expected);
        let log = session.snapshot().await;
        assert_eq!(log.entries().len(), 4);
        assert!(!log.has_pending());
    }

    struct SlowFirst;

    #[async_trait]
    impl AnswerProvider for SlowFirst {
        async fn answer(&self, question: &str) -> Result<Answer, ChatError> {
            let delay = if question == "slow" { 3000 } else { 100 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Answer {
                text: format!("re: {}", question),
                sources: String::new(),
            })
        }

        fn name(&self) -> &'static str {
            "slow-first"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn answers_are_not_forced_into_submission_order() {
        let session = ChatSession::new(Arc::new(SlowFirst));
        let mut rx = session.subscribe();

        let slow = session.submit("slow").await.expect("accepted");
        let fast = session.submit("fast").await.expect("accepted");

        assert_eq!(wait_answered(&mut rx).await, fast);
        assert_eq!(wait_answered(&mut rx).await, slow);

        let texts: Vec<String> = session
            .snapshot().await
            .entries()
            .iter()
            .map(|e| e.text.clone())
            .collect();
        assert_eq!(texts, vec!["slow", "re: slow", "fast", "re: fast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn resolving_an_earlier_answer_scrolls_to_newest_entry() {
        let session = ChatSession::new(Arc::new(SlowFirst));
        let mut rx = session.subscribe();

        let fast = session.submit("fast").await.expect("accepted");
        let slow = session.submit("slow").await.expect("accepted");
        assert_eq!(session.snapshot().await.scroll_to(), Some(slow));

        assert_eq!(wait_answered(&mut rx).await, fast);
        let log = session.snapshot().await;
        assert!(!log.entries()[1].loading);
        assert!(log.entries()[3].loading);
        assert_eq!(log.scroll_to(), Some(slow));

        assert_eq!(wait_answered(&mut rx).await, slow);
        assert_eq!(session.snapshot().await.scroll_to(), Some(slow));
    }

    struct Broken;

    #[async_trait]
    impl AnswerProvider for Broken {
        async fn answer(&self, _question: &str) -> Result<Answer, ChatError> {
            Err(ChatError::Unavailable("offline".into()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn provider_failure_resolves_placeholder_with_fallback() {
        let session = ChatSession::new(Arc::new(Broken));
        let mut rx = session.subscribe();

        session.submit("anyone there?").await.expect("accepted");
        wait_answered(&mut rx).await;

        let log = session.snapshot().await;
        assert_eq!(log.entries()[1].text, FALLBACK_ANSWER);
        assert!(log.entries()[1].sources.is_none());
    }
}
