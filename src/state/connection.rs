#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

/// WebSocket connection state published for the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub connected: bool,
    pub client_id: Option<String>,
    /// Last transport error; non-fatal, cleared on the next connect.
    pub last_error: Option<String>,
}
