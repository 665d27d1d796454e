use huddle_core::ServerMessage;

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_peer_disconnect_triggers_leave() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();

    let room_id = alice.create_room("Alice").await.unwrap();
    bob.join_room(room_id, "Bob").await.unwrap();
    alice
        .wait_for(|m| matches!(m, ServerMessage::UserJoined { .. }))
        .await
        .unwrap();

    bob.disconnect();

    assert_eq!(
        alice.recv().await.unwrap(),
        ServerMessage::UserLeft {
            session_id: bob.session_id
        }
    );
    assert!(!coordinator.is_connected(&bob.session_id));
    assert_eq!(coordinator.lookup_room(&bob.session_id), None);
    assert_eq!(coordinator.room(&room_id).unwrap().member_count(), 1);

    // A duplicate close signal must not notify again.
    bob.disconnect();
    alice.assert_silent().await;
}
