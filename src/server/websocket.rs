use crate::chat::ChatEvent;
use crate::error::StorefrontError;
use crate::models::websocket::{ ClientMessage, ServerMessage };
use crate::storefront::Storefront;

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use tokio::sync::{ broadcast, Mutex };
use tokio::net::TcpListener;
use tokio::io::{ AsyncRead, AsyncWrite };

use tokio_tungstenite::{ accept_async, WebSocketStream };
use tokio_tungstenite::tungstenite::protocol::Message;

use lazy_static::lazy_static;
use governor::{ RateLimiter, Quota, state::{ InMemoryState, NotKeyed }, clock::DefaultClock };

use log::{ info, warn, error };
use futures::{ SinkExt, StreamExt };

const MAX_MESSAGE_SIZE: usize = 64 * 1024;

lazy_static! {
    static ref CONNECTION_LIMITER: RateLimiter<NotKeyed, InMemoryState, DefaultClock> =
        RateLimiter::direct(Quota::per_second(NonZeroU32::MIN.saturating_add(9)));
}

impl From<ChatEvent> for ServerMessage {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::Pending { id } => ServerMessage::Processing { id },
            ChatEvent::Answered { id, text, sources, timestamp } =>
                ServerMessage::Response {
                    id,
                    content: text,
                    sources,
                    timestamp,
                },
        }
    }
}

fn encode(message: &ServerMessage) -> Result<Message, StorefrontError> {
    Ok(Message::Text(serde_json::to_string(message)?))
}

pub async fn start_ws_server(
    addr: &str,
    storefront: Arc<Mutex<Storefront>>
) -> Result<(), StorefrontError> {
    let listener = TcpListener::bind(addr).await.map_err(|source| StorefrontError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    info!("WS chat server listening on: {}", addr);
    serve_ws(listener, storefront).await
}

pub async fn serve_ws(
    listener: TcpListener,
    storefront: Arc<Mutex<Storefront>>
) -> Result<(), StorefrontError> {
    loop {
        let (stream, peer) = listener.accept().await?;

        if CONNECTION_LIMITER.check().is_err() {
            warn!("Global connection rate limit exceeded for {}. Dropping connection.", peer);
            continue;
        }

        info!("Incoming connection from: {}", peer);
        let storefront = Arc::clone(&storefront);

        tokio::spawn(async move {
            match accept_async(stream).await {
                Ok(ws) => handle_connection(peer, ws, storefront).await,
                Err(e) => error!("Handshake failed for {}: {}", peer, e),
            }
        });
    }
}

pub async fn handle_connection<S>(
    peer: SocketAddr,
    websocket: WebSocketStream<S>,
    storefront: Arc<Mutex<Storefront>>
)
    where S: AsyncRead + AsyncWrite + Unpin
{
    let mut events = storefront.lock().await.chat().subscribe();
    let (mut tx, mut rx) = websocket.split();

    loop {
        let outgoing = tokio::select! {
            incoming = rx.next() => {
                match incoming {
                    Some(Ok(message)) => {
                        match on_message(peer, message, &storefront).await {
                            Reply::Send(reply) => Some(reply),
                            Reply::Nothing => None,
                            Reply::Close => break,
                        }
                    }
                    Some(Err(e)) => {
                        info!("WebSocket connection closed or errored for {}: {}", peer, e);
                        break;
                    }
                    None => break,
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => Some(ServerMessage::from(event)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("{} missed {} chat events", peer, skipped);
                        None
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        };

        let Some(reply) = outgoing else {
            continue;
        };
        let frame = match encode(&reply) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to encode reply for {}: {}", peer, e);
                continue;
            }
        };
        if let Err(e) = tx.send(frame).await {
            error!("Error sending message to {}: {}", peer, e);
            break;
        }
    }
    info!("WebSocket connection closed for {}", peer);
}

enum Reply {
    Send(ServerMessage),
    Nothing,
    Close,
}

async fn on_message(peer: SocketAddr, message: Message, storefront: &Mutex<Storefront>) -> Reply {
    if message.len() > MAX_MESSAGE_SIZE {
        warn!("Message from {} exceeds {} bytes", peer, MAX_MESSAGE_SIZE);
        return Reply::Send(ServerMessage::Error {
            message: "Message too large".to_string(),
        });
    }

    match message {
        Message::Text(text) =>
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Chat { content }) => {
                    let accepted = storefront.lock().await.post_question(&content).await;
                    match accepted {
                        // The pending event reaches the client through the broadcast.
                        Some(_) => Reply::Nothing,
                        None =>
                            Reply::Send(ServerMessage::Error {
                                message: "Question must not be blank".to_string(),
                            }),
                    }
                }
                Err(e) => {
                    warn!("Failed to parse message from {}: {}", peer, e);
                    Reply::Send(ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    })
                }
            }
        Message::Close(_) => {
            info!("Received close frame from {}", peer);
            Reply::Close
        }
        Message::Binary(_) => {
            warn!("Ignoring binary message from {}", peer);
            Reply::Nothing
        }
        _ => Reply::Nothing,
    }
}
