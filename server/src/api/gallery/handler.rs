//! Gallery handlers

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use shared::models::{GalleryImage, GalleryImageCreate, GalleryImageUpdate};
use shared::util;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// GET /api/gallery
pub async fn list(State(state): State<ServerState>) -> Json<Vec<GalleryImage>> {
    Json(state.gallery_images().list())
}

/// POST /api/gallery
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GalleryImageCreate>,
) -> AppResult<Json<GalleryImage>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.image_url, "imageUrl", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;

    let created = state.gallery_images().add(GalleryImage {
        id: String::new(),
        title: payload.title,
        description: payload.description,
        image_url: payload.image_url,
        category: payload.category,
        date_added: util::now_iso(),
    })?;
    tracing::info!(id = %created.id, title = %created.title, "gallery image added");
    Ok(Json(created))
}

/// PUT /api/gallery/{id} — partial update.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<GalleryImageUpdate>,
) -> AppResult<Json<GalleryImage>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(image_url) = &payload.image_url {
        validate_required_text(image_url, "imageUrl", MAX_NOTE_LEN)?;
    }

    let updated = state.gallery_images().update_with(&id, |image| {
        if let Some(title) = payload.title {
            image.title = title;
        }
        if let Some(description) = payload.description {
            image.description = description;
        }
        if let Some(image_url) = payload.image_url {
            image.image_url = image_url;
        }
        if let Some(category) = payload.category {
            image.category = Some(category);
        }
    })?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Gallery image {id} not found")))
}

/// DELETE /api/gallery/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let deleted = state.gallery_images().delete(&id)?;
    if !deleted {
        return Err(AppError::not_found(format!("Gallery image {id} not found")));
    }
    tracing::info!(%id, "gallery image deleted");
    Ok(Json(Deleted { deleted }))
}
