//! WebSocket connection manager for the chat/collaboration channel.
//!
//! `ChatSocket` owns at most one transport at a time. Inbound text frames
//! are appended to an append-only message log; the UI and the edit
//! reconciler subscribe to the log. There is no reconnect logic: a dropped
//! connection stays dropped until `connect` is called again.
//!
//! The socket task itself requires a browser environment and is gated
//! behind the `browser` feature.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc;

use crate::error::ClientError;
use crate::state::connection::ConnectionState;
use crate::store::Subject;

/// Connection manager publishing connection state and the raw message log.
///
/// Clones are cheap handles over the same connection.
#[derive(Clone)]
pub struct ChatSocket {
    connection: Subject<ConnectionState>,
    messages: Subject<Vec<String>>,
    outbound: Rc<RefCell<Option<mpsc::UnboundedSender<String>>>>,
}

impl Default for ChatSocket {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSocket {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connection: Subject::new(ConnectionState::default()),
            messages: Subject::new(Vec::new()),
            outbound: Rc::new(RefCell::new(None)),
        }
    }

    #[must_use]
    pub fn connection(&self) -> &Subject<ConnectionState> {
        &self.connection
    }

    /// Append-only log of raw inbound frames. Cleared only by `disconnect`.
    #[must_use]
    pub fn messages(&self) -> &Subject<Vec<String>> {
        &self.messages
    }

    #[must_use]
    pub fn client_id(&self) -> Option<String> {
        self.connection.get().client_id
    }

    /// Open a connection to `/ws/chat/<client_id>`, tearing down any
    /// existing one first. Connection progress is reported through the
    /// connection subject; this call itself does not fail.
    #[cfg(feature = "browser")]
    pub fn connect(&self, client_id: &str) {
        self.disconnect();

        self.connection.set(ConnectionState {
            connected: false,
            client_id: Some(client_id.to_owned()),
            last_error: None,
        });

        let url = match page_chat_url(client_id) {
            Ok(url) => url,
            Err(message) => {
                self.connection.update(|c| c.last_error = Some(message));
                return;
            }
        };

        let (tx, rx) = mpsc::unbounded();
        *self.outbound.borrow_mut() = Some(tx);

        wasm_bindgen_futures::spawn_local(socket_loop(
            self.connection.clone(),
            self.messages.clone(),
            url,
            rx,
        ));
    }

    /// Forward a text frame verbatim.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotConnected`] when no open transport exists.
    pub fn send(&self, message: &str) -> Result<(), ClientError> {
        if !self.connection.get().connected {
            return Err(ClientError::NotConnected);
        }
        let guard = self.outbound.borrow();
        let tx = guard.as_ref().ok_or(ClientError::NotConnected)?;
        tx.unbounded_send(message.to_owned())
            .map_err(|_| ClientError::NotConnected)
    }

    /// Close the transport, clear the client id and the message log, and
    /// publish the disconnected state.
    pub fn disconnect(&self) {
        // Dropping the sender ends the socket task, which closes the
        // transport.
        self.outbound.borrow_mut().take();
        self.messages.set(Vec::new());
        self.connection.set(ConnectionState::default());
    }
}

/// Build the chat endpoint URL: `wss:` when the page is served over
/// `https:`, `ws:` otherwise, same host as the page.
#[must_use]
pub fn chat_url(secure: bool, host: &str, client_id: &str) -> String {
    let proto = if secure { "wss" } else { "ws" };
    format!("{proto}://{host}/ws/chat/{client_id}")
}

#[cfg(feature = "browser")]
fn page_chat_url(client_id: &str) -> Result<String, String> {
    let location = web_sys::window()
        .map(|w| w.location())
        .ok_or_else(|| "no window".to_owned())?;
    let protocol = location.protocol().unwrap_or_default();
    let host = location
        .host()
        .map_err(|_| "page host unavailable".to_owned())?;
    Ok(chat_url(protocol == "https:", &host, client_id))
}

/// Run one connection to completion: forward outbound frames, append
/// inbound frames to the log, publish state transitions.
#[cfg(feature = "browser")]
async fn socket_loop(
    connection: Subject<ConnectionState>,
    messages: Subject<Vec<String>>,
    url: String,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::{Message, futures::WebSocket};

    let ws = match WebSocket::open(&url) {
        Ok(ws) => ws,
        Err(e) => {
            connection.update(|c| {
                c.last_error = Some(format!("Failed to initialize WebSocket: {e}"));
            });
            return;
        }
    };
    let (mut ws_write, mut ws_read) = ws.split();

    connection.update(|c| {
        c.connected = true;
        c.last_error = None;
    });

    let send_task = async {
        while let Some(msg) = rx.next().await {
            if ws_write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(frame) = ws_read.next().await {
            match frame {
                Ok(Message::Text(text)) => messages.update(|log| log.push(text)),
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    // Non-fatal: closing is the transport's own decision.
                    log::warn!("WebSocket error: {e}");
                    connection.update(|c| {
                        c.last_error = Some("WebSocket connection error".to_owned());
                    });
                }
            }
        }
    };

    // Either the caller dropped the sender (disconnect) or the transport
    // closed; both end the connection.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    connection.update(|c| c.connected = false);
}
