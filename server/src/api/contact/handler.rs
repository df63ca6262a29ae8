//! Contact message handlers
//!
//! Message status (`new` / `read` / `replied`) is a plain admin bookkeeping
//! field with no transition rules, so it bypasses the workflow engine.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use shared::models::{ContactMessage, ContactMessageCreate, MessageStatus};
use shared::util;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: MessageStatus,
}

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// GET /api/contact
pub async fn list(State(state): State<ServerState>) -> Json<Vec<ContactMessage>> {
    Json(state.contact_messages().list())
}

/// POST /api/contact
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContactMessageCreate>,
) -> AppResult<Json<ContactMessage>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.subject, "subject", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;

    let created = state.contact_messages().add(ContactMessage {
        id: String::new(),
        name: payload.name,
        phone: payload.phone,
        subject: payload.subject,
        message: payload.message,
        date_submitted: util::now_iso(),
        status: MessageStatus::New,
    })?;
    tracing::info!(id = %created.id, subject = %created.subject, "contact message received");
    Ok(Json(created))
}

/// PUT /api/contact/{id}/status — any status to any status.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusChange>,
) -> AppResult<Json<ContactMessage>> {
    let updated = state
        .contact_messages()
        .update_with(&id, |message| message.status = payload.status)?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Contact message {id} not found")))
}

/// DELETE /api/contact/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let deleted = state.contact_messages().delete(&id)?;
    if !deleted {
        return Err(AppError::not_found(format!(
            "Contact message {id} not found"
        )));
    }
    tracing::info!(%id, "contact message deleted");
    Ok(Json(Deleted { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactMessageCreate {
        ContactMessageCreate {
            name: "Carla".into(),
            phone: "+351911111111".into(),
            subject: "Hours".into(),
            message: "Are you open Sundays?".into(),
        }
    }

    #[tokio::test]
    async fn new_message_starts_in_new() {
        let state = ServerState::for_tests();
        let created = create(State(state), Json(form())).await.unwrap();
        assert_eq!(created.status, MessageStatus::New);
    }

    #[tokio::test]
    async fn status_moves_freely_in_any_direction() {
        let state = ServerState::for_tests();
        let created = create(State(state.clone()), Json(form())).await.unwrap();

        for status in [MessageStatus::Replied, MessageStatus::New, MessageStatus::Read] {
            let updated = update_status(
                State(state.clone()),
                Path(created.id.clone()),
                Json(StatusChange { status }),
            )
            .await
            .unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn empty_message_body_is_rejected() {
        let state = ServerState::for_tests();
        let mut payload = form();
        payload.message = String::new();

        let err = create(State(state), Json(payload)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
