use serde::{ Serialize, Deserialize };
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub sources: Option<String>,
    pub loading: bool,
    pub timestamp: i64,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text.into(), false)
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Bot, text.into(), true)
    }

    fn new(role: ChatRole, text: String, loading: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            sources: None,
            loading,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
