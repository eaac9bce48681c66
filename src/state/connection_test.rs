use super::*;

#[test]
fn connection_state_default_is_disconnected() {
    let state = ConnectionState::default();
    assert!(!state.connected);
    assert!(state.client_id.is_none());
    assert!(state.last_error.is_none());
}
