use huddle_core::{ClientMessage, ErrorReason, ServerMessage};
use huddle_server::ServerConfig;

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_peer_sends_message() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();

    let room_id = alice.create_room("Alice").await.unwrap();
    bob.join_room(room_id, "Bob").await.unwrap();
    alice.recv().await.unwrap();

    alice.say("Hello from Alice");

    match bob.recv().await.unwrap() {
        ServerMessage::NewMessage {
            sender,
            display_name,
            text,
            timestamp,
        } => {
            assert_eq!(sender, alice.session_id);
            assert_eq!(display_name, "Alice");
            assert_eq!(text, "Hello from Alice");
            assert!(timestamp > 0);
        }
        other => panic!("Expected new-message, got {:?}", other),
    }

    // Never echoed back to the sender.
    alice.assert_silent().await;
}

#[tokio::test]
async fn test_oversized_or_empty_message_is_rejected() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();

    let room_id = alice.create_room("Alice").await.unwrap();
    bob.join_room(room_id, "Bob").await.unwrap();
    alice.recv().await.unwrap();

    let too_long = "a".repeat(ServerConfig::default().max_message_len + 1);
    alice.send(ClientMessage::SendMessage { text: too_long });
    alice.say("   ");

    for _ in 0..2 {
        assert_eq!(
            alice.recv().await.unwrap(),
            ServerMessage::Error {
                reason: ErrorReason::InvalidRequest
            }
        );
    }
    bob.assert_silent().await;
}

#[tokio::test]
async fn test_message_outside_room_goes_nowhere() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut loner = TestClient::connect(&coordinator).await.unwrap();
    alice.create_room("Alice").await.unwrap();

    loner.say("anyone?");

    loner.assert_silent().await;
    alice.assert_silent().await;
}
