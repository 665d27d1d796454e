use huddle_core::{ClientMessage, FileMeta, ServerMessage};

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_peer_shares_file() {
    init_tracing();

    let coordinator = create_test_coordinator();
    let mut alice = TestClient::connect(&coordinator).await.unwrap();
    let mut bob = TestClient::connect(&coordinator).await.unwrap();

    let room_id = alice.create_room("Alice").await.unwrap();
    bob.join_room(room_id, "Bob").await.unwrap();
    alice.recv().await.unwrap();

    let file = FileMeta {
        name: "notes.pdf".to_string(),
        path: "/uploads/1718000000000-notes.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        size: 48_213,
    };
    bob.send(ClientMessage::SendFile { file: file.clone() });

    match alice.recv().await.unwrap() {
        ServerMessage::NewFile {
            sender,
            display_name,
            file: shared,
            ..
        } => {
            assert_eq!(sender, bob.session_id);
            assert_eq!(display_name, "Bob");
            assert_eq!(shared, file);
        }
        other => panic!("Expected new-file, got {:?}", other),
    }
    bob.assert_silent().await;
}
