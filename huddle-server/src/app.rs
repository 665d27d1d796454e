use crate::Coordinator;
use crate::signaling::ws_handler;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use huddle_core::RoomSummary;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub fn router(coordinator: Coordinator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/rooms", get(list_rooms))
        .layer(cors)
        .with_state(coordinator)
}

async fn list_rooms(State(coordinator): State<Coordinator>) -> Json<Vec<RoomSummary>> {
    Json(coordinator.list_rooms())
}

/// Serves the signaling endpoints on an already bound listener until the
/// process is stopped.
pub async fn serve(listener: TcpListener, coordinator: Coordinator) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Signaling server listening on http://{}", addr);
    }
    axum::serve(listener, router(coordinator)).await
}
