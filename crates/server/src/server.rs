use axum::{Json, Router, routing::get};

use std::sync::Arc;

use crate::expenses;
use api_types::Message;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Liveness check.
async fn root() -> Json<Message> {
    Json(Message::new("API working"))
}

/// Assemble the full route table around `state`.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/expenses", expenses::routes())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
