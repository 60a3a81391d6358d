// SPDX-License-Identifier: MIT
//! Terminal WebSocket channel (`/ws`).
//!
//! Not a PTY stream: each inbound `terminal-command` message produces exactly
//! one reply, either `terminal-output` or `error`. Messages on a connection
//! are handled strictly in arrival order; connections are independent.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::execute::run_snippet;
use crate::AppContext;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum Inbound {
    TerminalCommand {
        command: String,
        #[serde(default)]
        language: Option<String>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum Outbound {
    TerminalOutput { output: String },
    Error { message: String },
}

impl Outbound {
    fn into_message(self) -> Message {
        Message::Text(serde_json::to_string(&self).unwrap_or_default().into())
    }
}

pub async fn ws_upgrade(
    State(ctx): State<Arc<AppContext>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, ctx))
}

async fn handle_socket(socket: WebSocket, ctx: Arc<AppContext>) {
    debug!("terminal connection opened");
    let (mut sink, mut stream) = socket.split();

    while let Some(msg) = stream.next().await {
        let msg = match msg {
            Ok(m) => m,
            Err(e) => {
                warn!(err = %e, "terminal ws error");
                break;
            }
        };

        let reply = match msg {
            Message::Text(text) => Some(handle_text(text.as_str(), &ctx)),
            Message::Close(_) => break,
            // Ping/pong are answered by the protocol layer; binary frames are
            // not part of this channel's contract.
            Message::Binary(_) => Some(Outbound::Error {
                message: "binary frames are not supported".to_string(),
            }),
            _ => None,
        };

        if let Some(reply) = reply {
            if sink.send(reply.into_message()).await.is_err() {
                break;
            }
        }
    }

    debug!("terminal connection closed");
}

fn handle_text(text: &str, ctx: &AppContext) -> Outbound {
    match serde_json::from_str::<Inbound>(text) {
        Ok(Inbound::TerminalCommand { command, language }) => {
            ctx.metrics.inc_terminal_commands();
            ctx.metrics.inc_executions();
            let language = language.as_deref().unwrap_or("bash");
            let output = run_snippet(&command, language);
            Outbound::TerminalOutput { output }
        }
        Err(e) => {
            debug!(err = %e, "malformed terminal message");
            Outbound::Error {
                message: format!("malformed message: {e}"),
            }
        }
    }
}
