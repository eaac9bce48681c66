use super::*;

// =============================================================
// URL derivation
// =============================================================

#[test]
fn chat_url_uses_wss_on_secure_pages() {
    assert_eq!(
        chat_url(true, "slides.example.com", "c-1"),
        "wss://slides.example.com/ws/chat/c-1"
    );
}

#[test]
fn chat_url_uses_ws_on_plain_pages() {
    assert_eq!(
        chat_url(false, "localhost:8000", "c-1"),
        "ws://localhost:8000/ws/chat/c-1"
    );
}

// =============================================================
// Send gating
// =============================================================

#[test]
fn send_without_a_connection_fails() {
    let socket = ChatSocket::new();
    assert_eq!(socket.send("hi"), Err(ClientError::NotConnected));
}

#[test]
fn send_before_the_transport_opens_fails() {
    let socket = ChatSocket::new();
    // A sender exists but the open has not completed yet.
    let (tx, _rx) = mpsc::unbounded();
    *socket.outbound.borrow_mut() = Some(tx);

    assert_eq!(socket.send("hi"), Err(ClientError::NotConnected));
}

#[test]
fn send_forwards_verbatim_once_connected() {
    use futures::StreamExt;

    let socket = ChatSocket::new();
    let (tx, mut rx) = mpsc::unbounded();
    *socket.outbound.borrow_mut() = Some(tx);
    socket.connection.update(|c| {
        c.connected = true;
        c.client_id = Some("c-1".to_owned());
    });

    socket.send("hello there").expect("send");

    let forwarded = futures::executor::block_on(rx.next()).expect("frame");
    assert_eq!(forwarded, "hello there");
}

// =============================================================
// Disconnect
// =============================================================

#[test]
fn disconnect_clears_id_log_and_connected_flag() {
    let socket = ChatSocket::new();
    let (tx, _rx) = mpsc::unbounded();
    *socket.outbound.borrow_mut() = Some(tx);
    socket.connection.set(ConnectionState {
        connected: true,
        client_id: Some("c-1".to_owned()),
        last_error: Some("stale".to_owned()),
    });
    socket.messages.update(|log| log.push("old".to_owned()));

    socket.disconnect();

    assert_eq!(socket.connection.get(), ConnectionState::default());
    assert!(socket.messages.get().is_empty());
    assert!(socket.outbound.borrow().is_none());
    assert_eq!(socket.client_id(), None);
}

#[test]
fn disconnect_drops_the_outbound_sender() {
    let socket = ChatSocket::new();
    let (tx, mut rx) = mpsc::unbounded();
    *socket.outbound.borrow_mut() = Some(tx);

    socket.disconnect();

    // The socket task observes the closed channel and shuts down.
    assert!(rx.try_next().is_ok_and(|frame| frame.is_none()));
}

// =============================================================
// Message log
// =============================================================

#[test]
fn message_log_is_append_only_and_observable() {
    let socket = ChatSocket::new();
    let seen = std::rc::Rc::new(RefCell::new(0usize));

    let seen_clone = std::rc::Rc::clone(&seen);
    let _sub = socket.messages().subscribe(move |log| {
        *seen_clone.borrow_mut() = log.len();
    });

    socket.messages.update(|log| log.push("one".to_owned()));
    socket.messages.update(|log| log.push("two".to_owned()));

    assert_eq!(*seen.borrow(), 2);
    assert_eq!(socket.messages().get(), vec!["one".to_owned(), "two".to_owned()]);
}
