//! WebSocket stream of committed kernel events

use crate::api::handlers::ApiState;
use crate::core::LoggedEvent;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};

/// Frames sent to WebSocket clients
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsFrame {
    /// Connection established
    Connected { message: String },
    /// A committed event
    Event(LoggedEvent),
    /// The client fell behind and missed events
    Lagged { skipped: u64 },
}

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ApiState>) -> impl IntoResponse {
    let rx = state.kernel.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, mut rx: broadcast::Receiver<LoggedEvent>) {
    let (mut sender, mut receiver) = socket.split();

    // Send welcome message
    let welcome = WsFrame::Connected {
        message: "Connected to ledger kernel event stream".to_string(),
    };
    if let Ok(json) = serde_json::to_string(&welcome) {
        let _ = sender.send(Message::Text(json.into())).await;
    }

    // Forward committed events to this client
    let mut send_task = tokio::spawn(async move {
        loop {
            let frame = match rx.recv().await {
                Ok(event) => WsFrame::Event(event),
                Err(RecvError::Lagged(skipped)) => WsFrame::Lagged { skipped },
                Err(RecvError::Closed) => break,
            };
            if let Ok(json) = serde_json::to_string(&frame) {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming messages (for ping/pong and graceful close)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(Message::Text(text)) => {
                    log::debug!("Ignoring client message: {}", text.as_str());
                }
                Err(e) => {
                    log::warn!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    log::info!("WebSocket connection closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use chrono::Utc;

    #[test]
    fn test_frame_serialization() {
        let frame = WsFrame::Event(LoggedEvent {
            sequence: 3,
            event: Event::OperatorsCleared { size: 2 },
            recorded_at: Utc::now(),
        });

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "Event");
        assert_eq!(json["data"]["sequence"], 3);
        assert_eq!(json["data"]["event"]["event"], "OperatorsCleared");

        let lagged = serde_json::to_value(WsFrame::Lagged { skipped: 7 }).unwrap();
        assert_eq!(lagged["data"]["skipped"], 7);
    }
}
