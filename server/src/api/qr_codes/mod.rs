//! QR menu code API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/qr", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/menu", post(handler::menu_code))
        .route("/menu/{id}", post(handler::item_code))
}
