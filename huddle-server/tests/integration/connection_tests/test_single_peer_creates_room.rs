use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_single_peer_creates_room() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator)
        .await
        .expect("Failed to connect");

    let room_id = alice.create_room("Alice").await.expect("Create failed");

    assert_eq!(coordinator.lookup_room(&alice.session_id), Some(room_id));

    let room = coordinator.room(&room_id).expect("Room should exist");
    assert_eq!(room.member_count(), 1);
    assert!(room.contains(&alice.session_id));

    let listed = coordinator.list_rooms();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].room_id, room_id);
    assert_eq!(listed[0].member_count, 1);
}
