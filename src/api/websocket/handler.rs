//! `/ws` connection handling
//!
//! Each client gets a welcome frame carrying the current sequence id, then
//! every `entry_logged` event as it is broadcast. A JSON `{"type":"ping"}`
//! is answered with `{"type":"pong"}`.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use super::events::{ClientMessage, LaggedNotice, PongMessage, WelcomeMessage, WsMessage};
use super::state::AppState;

/// Whether the connection loop keeps going
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// What to do with one inbound frame
#[derive(Debug, PartialEq)]
enum Reply {
    Nothing,
    Pong,
    Frame(Message),
    Close,
}

/// GET /ws - Upgrade to a live update stream
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| serve_client(socket, state))
}

async fn serve_client(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before reading the sequence id so the welcome never skips an event
    let mut events = state.subscribe();
    let welcome = WelcomeMessage::new(state.current_sequence_id());
    if send_json(&mut socket, &welcome).await == Flow::Close {
        return;
    }
    debug!(sequence_id = welcome.current_sequence_id, "websocket client connected");

    loop {
        let flow = tokio::select! {
            event = events.recv() => forward_event(&mut socket, event).await,
            frame = socket.recv() => match frame {
                Some(Ok(frame)) => answer(&mut socket, reply_for(frame)).await,
                Some(Err(e)) => {
                    debug!(error = %e, "websocket receive failed");
                    Flow::Close
                }
                None => Flow::Close,
            },
        };
        if flow == Flow::Close {
            break;
        }
    }
    debug!("websocket client disconnected");
}

async fn forward_event(socket: &mut WebSocket, event: Result<WsMessage, RecvError>) -> Flow {
    match event {
        Ok(msg) => send_json(socket, &msg).await,
        Err(RecvError::Lagged(missed)) => {
            warn!(missed, "websocket client lagged behind");
            send_json(socket, &LaggedNotice::new(missed)).await
        }
        Err(RecvError::Closed) => Flow::Close,
    }
}

async fn answer(socket: &mut WebSocket, reply: Reply) -> Flow {
    match reply {
        Reply::Nothing => Flow::Continue,
        Reply::Pong => send_json(socket, &PongMessage::default()).await,
        Reply::Frame(frame) => send(socket, frame).await,
        Reply::Close => Flow::Close,
    }
}

fn reply_for(frame: Message) -> Reply {
    match frame {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::Ping) => Reply::Pong,
            Err(_) => Reply::Nothing,
        },
        Message::Ping(data) => Reply::Frame(Message::Pong(data)),
        Message::Binary(_) | Message::Pong(_) => Reply::Nothing,
        Message::Close(_) => Reply::Close,
    }
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> Flow {
    match serde_json::to_string(value) {
        Ok(json) => send(socket, Message::Text(json)).await,
        Err(e) => {
            warn!(error = %e, "failed to encode websocket frame");
            Flow::Continue
        }
    }
}

async fn send(socket: &mut WebSocket, frame: Message) -> Flow {
    match socket.send(frame).await {
        Ok(()) => Flow::Continue,
        Err(_) => Flow::Close,
    }
}
