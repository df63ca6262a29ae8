//! Reservation handlers
//!
//! Creation comes from the public booking form; status changes go through
//! the workflow engine.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use shared::models::{Reservation, ReservationCreate, ReservationStatus};
use shared::util;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, parse_date, parse_time, validate_email,
    validate_optional_text, validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use crate::workflow::ReservationTransition;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: ReservationStatus,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// GET /api/reservations — newest first.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Reservation>> {
    Json(state.reservations().list())
}

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    parse_date(&payload.date)?;
    parse_time(&payload.time)?;
    validate_positive(payload.guests, "guests")?;
    validate_optional_text(&payload.special_requests, "specialRequests", MAX_NOTE_LEN)?;

    let created = state.reservations().add(Reservation {
        id: String::new(),
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        date: payload.date,
        time: payload.time,
        guests: payload.guests,
        special_requests: payload.special_requests,
        status: ReservationStatus::Pending,
        created_at: util::now_iso(),
    })?;
    tracing::info!(id = %created.id, date = %created.date, "reservation created");
    Ok(Json(created))
}

/// PUT /api/reservations/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusChange>,
) -> AppResult<Json<Reservation>> {
    let transition = ReservationTransition::from_target(payload.status).ok_or_else(|| {
        AppError::business_rule(format!(
            "Cannot set a reservation back to {}",
            payload.status.as_str()
        ))
    })?;

    let updated = state.workflow().apply_reservation(&id, transition)?;
    Ok(Json(updated))
}

/// DELETE /api/reservations/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let deleted = state.reservations().delete(&id)?;
    if !deleted {
        return Err(AppError::not_found(format!("Reservation {id} not found")));
    }
    tracing::info!(%id, "reservation deleted");
    Ok(Json(Deleted { deleted }))
}
