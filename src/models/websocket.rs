use serde::{ Serialize, Deserialize };
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "chat")] Chat {
        content: String,
    },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "processing")] Processing {
        id: Uuid,
    },
    #[serde(rename = "response")] Response {
        id: Uuid,
        content: String,
        sources: Option<String>,
        timestamp: i64,
    },
    #[serde(rename = "error")] Error {
        message: String,
    },
}
