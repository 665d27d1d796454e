use huddle_core::{ClientMessage, ServerMessage};

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_get_rooms_lists_only_live_rooms() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();
    let mut carol = TestClient::connect(&coordinator).await.unwrap();
    let mut browser = TestClient::connect(&coordinator).await.unwrap();

    let busy = alice.create_room("Alice").await.unwrap();
    bob.join_room(busy, "Bob").await.unwrap();
    let abandoned = carol.create_room("Carol").await.unwrap();
    carol.send(ClientMessage::LeaveRoom);
    carol.recv().await.unwrap();

    browser.send(ClientMessage::GetRooms);

    match browser.recv().await.unwrap() {
        ServerMessage::RoomsList { rooms } => {
            assert_eq!(rooms.len(), 1);
            assert_eq!(rooms[0].room_id, busy);
            assert_eq!(rooms[0].member_count, 2);
            assert!(rooms.iter().all(|r| r.room_id != abandoned));
        }
        other => panic!("Expected rooms-list, got {:?}", other),
    }

    // Only the requester gets the snapshot.
    alice
        .wait_for(|m| matches!(m, ServerMessage::UserJoined { .. }))
        .await
        .unwrap();
    alice.assert_silent().await;
    bob.assert_silent().await;
}
