use huddle_core::ServerMessage;
use serde_json::json;

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_ice_candidate_exchange() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();

    let room_id = alice.create_room("Alice").await.unwrap();
    bob.join_room(room_id, "Bob").await.unwrap();
    alice.recv().await.unwrap();

    let offer = json!({ "type": "offer", "sdp": "v=0\r\no=- 1 2 IN IP4 127.0.0.1\r\n" });
    let answer = json!({ "type": "answer", "sdp": "v=0\r\n" });
    let candidate = json!({
        "candidate": "candidate:0 1 UDP 2122252543 192.168.1.2 50000 typ host",
        "sdpMid": "0",
        "sdpMLineIndex": 0
    });

    alice.offer(bob.session_id, offer.clone());
    assert_eq!(
        bob.recv().await.unwrap(),
        ServerMessage::Offer {
            sender: alice.session_id,
            data: offer
        }
    );

    bob.answer(alice.session_id, answer.clone());
    assert_eq!(
        alice.recv().await.unwrap(),
        ServerMessage::Answer {
            sender: bob.session_id,
            data: answer
        }
    );

    alice.ice_candidate(bob.session_id, candidate.clone());
    bob.ice_candidate(alice.session_id, candidate.clone());
    assert_eq!(
        bob.recv().await.unwrap(),
        ServerMessage::IceCandidate {
            sender: alice.session_id,
            data: candidate.clone()
        }
    );
    assert_eq!(
        alice.recv().await.unwrap(),
        ServerMessage::IceCandidate {
            sender: bob.session_id,
            data: candidate
        }
    );
}

#[tokio::test]
async fn test_relay_to_departed_peer_is_silent() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();

    let room_id = alice.create_room("Alice").await.unwrap();
    bob.join_room(room_id, "Bob").await.unwrap();
    alice.recv().await.unwrap();

    bob.disconnect();
    alice.recv().await.unwrap();

    alice.offer(bob.session_id, json!({ "sdp": "late" }));
    alice.ice_candidate(bob.session_id, json!({ "candidate": "late" }));

    alice.assert_silent().await;
    bob.assert_silent().await;
    assert!(coordinator.is_connected(&alice.session_id));
}
