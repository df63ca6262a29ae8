//! Menu item handlers

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

fn validate_fields(
    name: &str,
    description: &str,
    price: f64,
    category: &str,
) -> Result<(), AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    if description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("description is too long"));
    }
    validate_price(price, "price")?;
    Ok(())
}

/// GET /api/menu
pub async fn list(State(state): State<ServerState>) -> Json<Vec<MenuItem>> {
    Json(state.menu_items().list())
}

/// GET /api/menu/{id}
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    state
        .menu_items()
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_fields(
        &payload.name,
        &payload.description,
        payload.price,
        &payload.category,
    )?;

    let created = state.menu_items().add(MenuItem {
        id: String::new(),
        menu_id: payload.menu_id,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        category: payload.category,
        image: payload.image,
    })?;
    tracing::info!(id = %created.id, name = %created.name, "menu item created");
    Ok(Json(created))
}

/// PUT /api/menu/{id} — partial update, only present fields change.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let updated = state.menu_items().update_with(&id, |item| {
        if let Some(menu_id) = payload.menu_id {
            item.menu_id = menu_id;
        }
        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = description;
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(category) = payload.category {
            item.category = category;
        }
        if let Some(image) = payload.image {
            item.image = image;
        }
    })?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))
}

/// DELETE /api/menu/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let deleted = state.menu_items().delete(&id)?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {id} not found")));
    }
    tracing::info!(%id, "menu item deleted");
    Ok(Json(Deleted { deleted }))
}
