use super::*;

#[test]
fn network_error_displays_published_message() {
    let err = ClientError::Network("HTTP error! status: 502".to_owned());
    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[test]
fn not_connected_error_names_the_transport() {
    assert_eq!(ClientError::NotConnected.to_string(), "WebSocket is not connected");
}
